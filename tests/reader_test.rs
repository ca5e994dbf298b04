//! Integration tests for loading span records and rendering results.

use std::fs::File;
use std::io::Write;

use pdfstructure::render::{to_json, to_outline, to_text};
use pdfstructure::{extract_from_json, Document, JsonFormat, RawSpan, Structure};
use tempfile::NamedTempFile;

fn records() -> Vec<RawSpan> {
    vec![
        RawSpan::new(0, 0, 0, 0, "Situation Overview")
            .with_size(16.0)
            .with_bbox(50.0, 40.0, 250.0, 60.0)
            .with_origin(50.0, 56.0)
            .with_total_y(56.0),
        RawSpan::new(0, 1, 0, 0, "Flooding displaced thousands of")
            .with_bbox(50.0, 90.0, 500.0, 102.0)
            .with_origin(50.0, 100.0)
            .with_total_y(100.0),
        RawSpan::new(0, 1, 1, 0, "families in the delta.")
            .with_bbox(50.0, 104.0, 200.0, 116.0)
            .with_origin(50.0, 114.0)
            .with_total_y(114.0),
        RawSpan::new(0, 2, 0, 0, "1")
            .with_bbox(290.0, 790.0, 296.0, 802.0)
            .with_origin(290.0, 800.0)
            .with_total_y(800.0),
    ]
}

#[test]
fn test_document_from_reader() {
    let mut file = NamedTempFile::new().unwrap();
    let json = serde_json::to_string(&records()).unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let doc = Document::from_reader(File::open(file.path()).unwrap()).unwrap();
    assert_eq!(doc.raw_spans().len(), 4);
    assert_eq!(doc.lines().len(), 3);
    assert_eq!(
        doc.items(),
        vec!["Situation Overview", "Flooding displaced thousands of families in the delta."]
    );
}

#[test]
fn test_minimal_records_use_defaults() {
    let json = r#"[
        {"page_number": 0, "block_number": 0, "line_number": 0, "span_number": 0,
         "text": "Key Messages", "size": 14.0, "font": "Arial-BoldMT",
         "bbox": [50.0, 40.0, 200.0, 56.0], "origin": [50.0, 54.0], "total_y": 54.0},
        {"page_number": 0, "block_number": 1, "line_number": 0, "span_number": 0,
         "text": "Access remains limited.", "size": 11.0,
         "bbox": [50.0, 90.0, 300.0, 102.0], "origin": [50.0, 100.0], "total_y": 100.0},
        {"page_number": 0, "block_number": 2, "line_number": 0, "span_number": 0,
         "text": "Aid is delivered weekly.", "size": 11.0,
         "bbox": [50.0, 130.0, 300.0, 142.0], "origin": [50.0, 140.0], "total_y": 140.0}
    ]"#;
    let doc = Document::from_json(json).unwrap();
    let lines = doc.lines();
    assert_eq!(lines[0].color, "#000000");
    assert!(lines[0].bold);
    assert!(!lines[1].bold);
    assert!(!lines[1].img);
    let headings: Vec<&str> = doc.headings().iter().map(|h| h.text.as_str()).collect();
    assert_eq!(headings, vec!["Key Messages"]);
}

#[test]
fn test_render_structure() {
    let doc = Document::new(records()).unwrap();
    let structure = doc.structure();

    assert_eq!(to_outline(&structure), "Situation Overview");
    assert_eq!(
        to_text(&structure),
        "Situation Overview\n\nFlooding displaced thousands of families in the delta."
    );

    let json = to_json(&structure, JsonFormat::Compact).unwrap();
    let back: Structure = serde_json::from_str(&json).unwrap();
    assert_eq!(back.items, structure.items);
    assert_eq!(back.headings.len(), 1);
}

#[test]
fn test_extract_from_json() {
    let json = serde_json::to_string(&records()).unwrap();
    let structure = extract_from_json(&json).unwrap().unwrap();
    assert_eq!(structure.heading_texts(), vec!["Situation Overview"]);
    assert!(extract_from_json("null").unwrap().is_none());
    assert!(extract_from_json("{").is_err());
}
