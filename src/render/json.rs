//! JSON rendering of a document's structure.

use crate::error::{Error, Result};
use crate::model::Structure;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a structure to JSON.
pub fn to_json(structure: &Structure, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(structure),
        JsonFormat::Compact => serde_json::to_string(structure),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
