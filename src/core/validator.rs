//! Input validation
//!
//! Two independent phases run around JSON parsing:
//! - [`validate_raw`] rejects empty input before the parser sees it.
//! - [`validate_parsed`] checks the shape of the parsed value.
//!
//! Missing top-level keys are reported together, while missing fields inside
//! `nodes` and `edges` stop at the first element found lacking one. Existing
//! callers match on these exact messages, so the asymmetry stays.

use crate::core::error::{Error, Result, SchemaError};
use serde_json::{Map, Value};

/// Required top-level keys, in reporting order.
const TOP_LEVEL_KEYS: [&str; 2] = ["nodes", "edges"];
/// Required fields of every node, checked in order.
const NODE_FIELDS: [&str; 2] = ["id", "label"];
/// Required fields of every edge, checked in order.
const EDGE_FIELDS: [&str; 2] = ["from", "to"];

/// Reject raw input that is the empty string.
///
/// Whitespace-only input is not empty; it fails later as a parse error.
///
/// # Errors
/// Returns [`Error::EmptyInput`] when `text` is empty.
pub fn validate_raw(text: &str) -> Result<()> {
    if text.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(())
}

/// Check that a parsed value has the structure of a flow document.
///
/// A key holding `null` counts as present. A non-object top-level value lacks
/// both keys; a non-object array element lacks every field.
///
/// # Errors
/// Returns [`Error::Schema`] describing the first problem found.
pub fn validate_parsed(value: &Value) -> Result<()> {
    let empty = Map::new();
    let root = value.as_object().unwrap_or(&empty);

    let missing: Vec<String> = TOP_LEVEL_KEYS
        .iter()
        .filter(|key| !root.contains_key(**key))
        .map(ToString::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(SchemaError::MissingKeys(missing).into());
    }

    check_elements(root, "nodes", &NODE_FIELDS)?;
    check_elements(root, "edges", &EDGE_FIELDS)?;
    Ok(())
}

/// Check every element of `root[key]` for `fields`, first failure wins.
fn check_elements(root: &Map<String, Value>, key: &str, fields: &[&str]) -> Result<()> {
    let elements = root
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| SchemaError::NotAnArray(key.to_string()))?;

    let empty = Map::new();
    for element in elements {
        let object = element.as_object().unwrap_or(&empty);
        if let Some(field) = fields.iter().find(|field| !object.contains_key(**field)) {
            return Err(SchemaError::MissingKeys(vec![format!("{key}.{field}")]).into());
        }
    }
    Ok(())
}
