//! # pdfstructure
//!
//! Reconstruct the logical structure of a multi-page document from the flat
//! stream of positioned text spans a page-layout decoder emits.
//!
//! The pipeline merges fragments into logical lines, restores reading order,
//! strips layout noise (repeating headers and footers, page numbers, footnote
//! markers, photo captions) and segments what is left into titles, headings
//! and paragraph or bullet items.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfstructure::Document;
//!
//! fn main() -> pdfstructure::Result<()> {
//!     let json = std::fs::read_to_string("spans.json")?;
//!     let doc = Document::from_json(&json)?;
//!
//!     for heading in doc.headings() {
//!         println!("# {}", heading.text.trim());
//!     }
//!     for item in doc.items() {
//!         println!("{}", item);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Stages
//!
//! - [`normalize`]: inline merge, block ordering, same-style and bullet joins
//! - [`noise`]: photo blocks, page labels, repeating headers/footers, superscripts
//! - [`structure`]: titles, headings and items
//! - [`predicates`]: the classifiers the stages share

pub mod document;
pub mod error;
pub mod model;
pub mod noise;
pub mod normalize;
pub mod options;
pub mod predicates;
pub mod render;
pub mod structure;
pub mod text;

// Re-export commonly used types
pub use document::{clean_lines, Document};
pub use error::{Error, Result};
pub use model::{BBox, Item, Point, RawSpan, Span, Structure};
pub use noise::{Edge, Granularity};
pub use options::{BulletPrefix, StructureOptions};
pub use render::JsonFormat;

/// Reconstruct the structure of a document from decoder records.
///
/// An absent record stream (e.g. the document could not be fetched) is not
/// an error: it yields `Ok(None)`.
///
/// # Example
///
/// ```
/// use pdfstructure::{extract_structure, RawSpan, StructureOptions};
///
/// let spans = vec![
///     RawSpan::new(0, 0, 0, 0, "Overview").with_size(16.0).with_total_y(40.0),
///     RawSpan::new(0, 1, 0, 0, "Body text runs over").with_total_y(80.0),
///     RawSpan::new(0, 1, 1, 0, "two lines.").with_total_y(94.0),
/// ];
/// let structure = extract_structure(Some(spans), &StructureOptions::default())
///     .unwrap()
///     .unwrap();
/// assert_eq!(structure.heading_texts(), vec!["Overview"]);
///
/// assert!(extract_structure(None, &StructureOptions::default()).unwrap().is_none());
/// ```
pub fn extract_structure(
    spans: Option<Vec<RawSpan>>,
    options: &StructureOptions,
) -> Result<Option<Structure>> {
    let Some(spans) = spans else {
        log::debug!("No span records supplied, nothing to extract");
        return Ok(None);
    };
    let doc = Document::with_options(spans, options.clone())?;
    Ok(Some(doc.structure()))
}

/// Reconstruct the structure of a JSON record stream with default options.
///
/// `null` stands for an absent record stream and yields `Ok(None)`.
pub fn extract_from_json(json: &str) -> Result<Option<Structure>> {
    let spans: Option<Vec<RawSpan>> = serde_json::from_str(json)?;
    extract_structure(spans, &StructureOptions::default())
}

/// Extract item texts from decoder records with default options.
pub fn extract_items(spans: Vec<RawSpan>) -> Result<Vec<String>> {
    Ok(Document::new(spans)?.items())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_absent_input() {
        assert!(extract_structure(None, &StructureOptions::default())
            .unwrap()
            .is_none());
        assert!(extract_from_json("null").unwrap().is_none());
    }

    #[test]
    fn test_extract_empty_input() {
        let structure = extract_from_json("[]").unwrap().unwrap();
        assert!(structure.is_empty());
        assert!(structure.items.is_empty());
    }

    #[test]
    fn test_extract_items() {
        let items = extract_items(vec![
            RawSpan::new(0, 0, 0, 0, "Summary.")
                .with_bbox(0.0, 30.0, 100.0, 42.0)
                .with_total_y(40.0),
            RawSpan::new(0, 0, 1, 0, "Body text continues across the page.")
                .with_bbox(0.0, 44.0, 500.0, 56.0)
                .with_total_y(54.0),
        ])
        .unwrap();
        assert_eq!(items, vec!["Summary.", "Body text continues across the page."]);
    }
}
