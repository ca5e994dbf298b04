//! Paragraph-level output types.

use serde::{Deserialize, Serialize};

use super::Span;

/// A paragraph or bullet entry assembled from consecutive lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Final item text, bullet-prefixed when rendered as a bullet
    pub text: String,

    /// Whether the item started with a bullet or enumeration marker
    pub bulleted: bool,
}

impl Item {
    /// Create a new item.
    pub fn new(text: impl Into<String>, bulleted: bool) -> Self {
        Self {
            text: text.into(),
            bulleted,
        }
    }
}

/// The cleaned lines of a document together with the views derived from them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Structure {
    /// Cleaned, reading-ordered line records
    pub lines: Vec<Span>,

    /// Lines that look like titles
    pub titles: Vec<Span>,

    /// Titles more emphasised than body text
    pub headings: Vec<Span>,

    /// Paragraph and bullet items
    pub items: Vec<String>,
}

impl Structure {
    /// Check if no content survived cleaning.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Plain text of all items, one paragraph per item.
    pub fn plain_text(&self) -> String {
        self.items.join("\n\n")
    }

    /// Heading texts in reading order.
    pub fn heading_texts(&self) -> Vec<&str> {
        self.headings.iter().map(|h| h.text.trim()).collect()
    }
}
