//! Policy documents and template bodies
//!
//! JSON input is canonicalised (keys sorted, no insignificant whitespace).
//! YAML input is only validated and handed back as written: re-serialised YAML
//! does not diff stably.

use crate::error::{MapperError, Result};
use serde_json::{Map, Value};

const SNIPPET_LEN: usize = 64;

/// Canonicalise a JSON document
pub fn normalize_json_document(input: &str) -> Result<String> {
    if input.is_empty() {
        return Ok(String::new());
    }
    let value: Value = serde_json::from_str(input).map_err(|e| malformed(input, e))?;
    serde_json::to_string(&canonicalize(value)).map_err(|e| malformed(input, e))
}

/// Validate a YAML document, returning it unchanged
pub fn check_yaml_document(input: &str) -> Result<String> {
    if input.is_empty() {
        return Ok(String::new());
    }
    serde_yaml::from_str::<serde_yaml::Value>(input).map_err(|e| malformed(input, e))?;
    Ok(input.to_string())
}

/// Normalise a document that may be either JSON or YAML
///
/// JSON is tried first. When it does not parse, the input must be valid YAML
/// and is returned verbatim.
pub fn normalize_structured_document(input: &str) -> Result<String> {
    if input.is_empty() {
        return Ok(String::new());
    }

    match normalize_json_document(input) {
        Ok(canonical) => Ok(canonical),
        Err(json_err) => {
            tracing::debug!("Document is not JSON, checking YAML: {}", json_err);
            check_yaml_document(input)
        }
    }
}

/// Recursively sort object keys
fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::new();
            for (key, value) in entries {
                sorted.insert(key, canonicalize(value));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

fn malformed(input: &str, reason: impl std::fmt::Display) -> MapperError {
    MapperError::MalformedDocument {
        snippet: snippet(input),
        reason: reason.to_string(),
    }
}

fn snippet(input: &str) -> String {
    match input.char_indices().nth(SNIPPET_LEN) {
        Some((cut, _)) => format!("{}...", &input[..cut]),
        None => input.to_string(),
    }
}
