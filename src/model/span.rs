//! Span-level types.

use serde::{Deserialize, Serialize};

use crate::predicates;
use crate::text;

/// One positioned text fragment as supplied by the page-layout decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSpan {
    /// Page number (0-indexed, as emitted by the decoder)
    pub page_number: u32,

    /// Block number within the page
    pub block_number: u32,

    /// Line number within the block
    pub line_number: u32,

    /// Span number within the line, in emission order
    pub span_number: u32,

    /// Text content
    pub text: String,

    /// Font name (e.g., "Arial-BoldMT")
    #[serde(default)]
    pub font: String,

    /// Font size in points
    pub size: f64,

    /// Explicit boldness flag; derived from the font name when absent
    #[serde(default)]
    pub bold: Option<bool>,

    /// Text color as `#rrggbb`
    #[serde(default = "default_color")]
    pub color: String,

    /// Color of the largest colored drawing behind the span, if any
    #[serde(default)]
    pub highlight_color: Option<String>,

    /// Bounding box as `[x1, y1, x2, y2]`
    pub bbox: [f64; 4],

    /// Baseline origin as `[x, y]`, page-relative
    pub origin: [f64; 2],

    /// Origin y plus the height of all preceding pages
    pub total_y: f64,

    /// Whether the span lies fully inside a page image
    #[serde(default)]
    pub img: bool,
}

fn default_color() -> String {
    "#000000".to_string()
}

impl RawSpan {
    /// Create a span with default typography and zero geometry.
    pub fn new(
        page_number: u32,
        block_number: u32,
        line_number: u32,
        span_number: u32,
        text: impl Into<String>,
    ) -> Self {
        Self {
            page_number,
            block_number,
            line_number,
            span_number,
            text: text.into(),
            font: "Helvetica".to_string(),
            size: 11.0,
            bold: None,
            color: default_color(),
            highlight_color: None,
            bbox: [0.0; 4],
            origin: [0.0; 2],
            total_y: 0.0,
            img: false,
        }
    }

    /// Set the font name.
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    /// Set the font size.
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Set the boldness flag explicitly.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    /// Set the text color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the highlight color.
    pub fn with_highlight(mut self, color: impl Into<String>) -> Self {
        self.highlight_color = Some(color.into());
        self
    }

    /// Set the bounding box.
    pub fn with_bbox(mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        self.bbox = [x1, y1, x2, y2];
        self
    }

    /// Set the page-relative origin.
    pub fn with_origin(mut self, x: f64, y: f64) -> Self {
        self.origin = [x, y];
        self
    }

    /// Set the document-wide vertical coordinate.
    pub fn with_total_y(mut self, total_y: f64) -> Self {
        self.total_y = total_y;
        self
    }

    /// Mark the span as lying inside a page image.
    pub fn in_image(mut self, img: bool) -> Self {
        self.img = img;
        self
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BBox {
    /// Width of the box.
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }
}

/// A point in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A decorated span record.
///
/// After normalisation one record may stand for several merged fragments;
/// it then keeps the smallest `index` and `span_number` of the group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Position of the (first) source fragment in the decoder stream
    pub index: usize,
    pub page_number: u32,
    pub block_number: u32,
    pub line_number: u32,
    pub span_number: u32,

    /// Text content
    pub text: String,
    /// Lower-cased alphanumeric form of `text`, used for comparisons
    pub text_base: String,

    pub font: String,
    pub size: f64,
    /// `round(size * 2)`, half-point resolution
    pub double_size_int: i64,
    pub bold: bool,
    pub color: String,
    pub highlight_color: Option<String>,

    pub bbox: BBox,
    pub origin: Point,
    pub total_y: f64,
    pub img: bool,

    /// Signature of font face, size, color and highlight
    pub style: String,
    /// Ordinal emphasis score: size, then weight, then case
    pub font_importance: i64,
}

impl Span {
    /// Decorate a decoder record.
    pub fn from_raw(index: usize, raw: RawSpan) -> Self {
        let text = raw.text.replace('\r', "\n");
        let bold = raw.bold.unwrap_or_else(|| is_bold_font(&raw.font));
        let double_size_int = (raw.size * 2.0).round_ties_even() as i64;
        let style = style_signature(
            &raw.font,
            double_size_int,
            &raw.color,
            raw.highlight_color.as_deref(),
        );
        let font_importance = predicates::font_importance(double_size_int, bold, &text);

        Self {
            index,
            page_number: raw.page_number,
            block_number: raw.block_number,
            line_number: raw.line_number,
            span_number: raw.span_number,
            text_base: text::text_base(&text),
            text,
            font: raw.font,
            size: raw.size,
            double_size_int,
            bold,
            color: raw.color,
            highlight_color: raw.highlight_color,
            bbox: BBox {
                x1: raw.bbox[0],
                y1: raw.bbox[1],
                x2: raw.bbox[2],
                y2: raw.bbox[3],
            },
            origin: Point {
                x: raw.origin[0],
                y: raw.origin[1],
            },
            total_y: raw.total_y,
            img: raw.img,
            style,
            font_importance,
        }
    }

    /// Decorate a whole decoder stream, numbering records in stream order.
    pub fn decorate_all(raw: Vec<RawSpan>) -> Vec<Self> {
        raw.into_iter()
            .enumerate()
            .map(|(index, span)| Self::from_raw(index, span))
            .collect()
    }

    /// Replace the text, keeping `text_base` in step.
    pub fn set_text(&mut self, text: String) {
        self.text_base = text::text_base(&text);
        self.text = text;
    }

    /// `(page, block)` identity.
    pub fn block_key(&self) -> (u32, u32) {
        (self.page_number, self.block_number)
    }

    /// `(page, block, line)` identity.
    pub fn line_key(&self) -> (u32, u32, u32) {
        (self.page_number, self.block_number, self.line_number)
    }
}

/// A font is bold when its name mentions a bold or black weight.
pub(crate) fn is_bold_font(font: &str) -> bool {
    let font = font.to_lowercase();
    font.contains("bold") || font.contains("black")
}

fn style_signature(font: &str, double_size_int: i64, color: &str, highlight: Option<&str>) -> String {
    let font = font.to_lowercase();
    // "Arial-BoldMT" -> "boldmt": the face suffix after the family name
    let face = font.split_once('-').map_or(font.as_str(), |(_, face)| face);
    let face = if face == "boldmt" { "bold" } else { face };
    format!(
        "{}, {}, {}, {}",
        face,
        double_size_int,
        color,
        highlight.unwrap_or("None")
    )
}
