//! Plain text rendering of a document's items.

use crate::model::Structure;

/// Render items as plain text, one paragraph per item.
pub fn to_text(structure: &Structure) -> String {
    structure.plain_text().trim().to_string()
}

/// Render headings as a plain outline, one per line.
pub fn to_outline(structure: &Structure) -> String {
    structure.heading_texts().join("\n")
}
