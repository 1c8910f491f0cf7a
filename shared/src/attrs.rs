//! Encoded list attributes
//!
//! Variable-length item attributes (gallery references, ingredients,
//! allergens, features) are stored as one JSON array per text column.
//! JSON string escaping means any UTF-8 element survives the round trip,
//! including commas, quotes and newlines.

use thiserror::Error;

/// A submitted list value that is not a JSON array of strings
#[derive(Debug, Error)]
#[error("{field} must be a JSON array of strings: {source}")]
pub struct AttrError {
    pub field: &'static str,
    #[source]
    pub source: serde_json::Error,
}

/// Encode an ordered list into its column representation.
pub fn encode(items: &[String]) -> String {
    // Serializing a slice of strings cannot fail
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

/// Decode a stored column value.
///
/// Absent, empty and whitespace-only values decode to an empty list. A
/// corrupt value also decodes to an empty list so that a bad row never
/// breaks a listing page.
pub fn decode(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(error = %e, "Discarding malformed encoded attribute");
            Vec::new()
        }
    }
}

/// Parse a list submitted through an admin form.
///
/// Absent or blank input means "no entries"; anything else must be a JSON
/// array of strings.
pub fn parse_submitted(field: &'static str, raw: Option<&str>) -> Result<Vec<String>, AttrError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(Vec::new()),
        Some(raw) => serde_json::from_str(raw).map_err(|source| AttrError { field, source }),
    }
}
