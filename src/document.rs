//! Per-document context running the structure pipeline.

use std::io::Read;

use crate::error::Result;
use crate::model::{Item, RawSpan, Span, Structure};
use crate::options::StructureOptions;
use crate::{noise, normalize, structure};

/// A document's span records, cleaned once at construction.
///
/// The cleaned lines and the body-text font importance are computed eagerly
/// and kept as fields; titles, headings and items are derived on demand.
#[derive(Debug, Clone)]
pub struct Document {
    raw_spans: Vec<Span>,
    lines: Vec<Span>,
    body_font_importance: Option<i64>,
    options: StructureOptions,
}

impl Document {
    /// Build a document from decoder records with default options.
    pub fn new(raw: Vec<RawSpan>) -> Result<Self> {
        Self::with_options(raw, StructureOptions::default())
    }

    /// Build a document from decoder records.
    pub fn with_options(raw: Vec<RawSpan>, options: StructureOptions) -> Result<Self> {
        let raw_spans = Span::decorate_all(raw);
        let lines = clean_lines(raw_spans.clone(), &options)?;
        let body_font_importance = structure::body_font_importance(&lines);

        Ok(Self {
            raw_spans,
            lines,
            body_font_importance,
            options,
        })
    }

    /// Build a document from a JSON array of decoder records.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: Vec<RawSpan> = serde_json::from_str(json)?;
        Self::new(raw)
    }

    /// Build a document from a reader yielding a JSON array of decoder records.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let raw: Vec<RawSpan> = serde_json::from_reader(reader)?;
        Self::new(raw)
    }

    /// Decorated records as supplied, before any cleaning.
    pub fn raw_spans(&self) -> &[Span] {
        &self.raw_spans
    }

    /// Cleaned records in reading order.
    pub fn lines(&self) -> &[Span] {
        &self.lines
    }

    /// Options the document was cleaned with.
    pub fn options(&self) -> &StructureOptions {
        &self.options
    }

    /// Check if no content survived cleaning.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Most frequent font importance among the cleaned lines.
    pub fn body_font_importance(&self) -> Option<i64> {
        self.body_font_importance
    }

    /// Lines that look like titles.
    pub fn titles(&self) -> Vec<&Span> {
        structure::titles(&self.lines)
    }

    /// Titles more emphasised than the body text.
    pub fn headings(&self) -> Vec<&Span> {
        structure::headings(&self.lines, self.body_font_importance)
    }

    /// Paragraph and bullet items with their bullet flag.
    pub fn item_records(&self) -> Vec<Item> {
        structure::to_items(&self.lines, self.options.bullet_prefix)
    }

    /// Paragraph and bullet item texts.
    pub fn items(&self) -> Vec<String> {
        self.item_records().into_iter().map(|i| i.text).collect()
    }

    /// Snapshot of the cleaned lines and every derived view.
    pub fn structure(&self) -> Structure {
        Structure {
            lines: self.lines.clone(),
            titles: self.titles().into_iter().cloned().collect(),
            headings: self.headings().into_iter().cloned().collect(),
            items: self.items(),
        }
    }
}

/// Run the normalisation and noise-removal stages over decorated records.
pub fn clean_lines(spans: Vec<Span>, options: &StructureOptions) -> Result<Vec<Span>> {
    let count = spans.len();

    let spans = normalize::merge_inline_text(spans, options);
    let spans = normalize::sort_blocks_by_y(spans);
    let spans = normalize::combine_spans_same_style(spans);
    let spans = normalize::combine_bullet_spans(spans);

    let mut spans = noise::remove_photo_blocks(spans);

    // Dropping repeating headers can expose labels that sat between them
    for _ in 0..options.cleanup_passes {
        spans = noise::remove_page_labels_references(spans);
        spans = noise::drop_all_repeating_headers_footers(spans, options)?;
    }

    let spans = noise::remove_reference_labels(spans, options.superscript_max_size);
    let spans = noise::remove_date_superscripts(spans, options.superscript_max_size);

    log::debug!("Cleaned {} spans into {} lines", count, spans.len());
    Ok(spans)
}
