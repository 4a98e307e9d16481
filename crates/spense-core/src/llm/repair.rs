//! Recovery of a JSON payload from raw model output.
//!
//! Models routinely wrap their JSON in a markdown code fence or pad it
//! with stray whitespace. The contract here is deliberately narrow: take
//! the fenced interior when a fence is present, otherwise parse the
//! trimmed text as-is. Nothing else is repaired.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::error::ModelError;

lazy_static! {
    static ref JSON_FENCE: Regex = Regex::new(r"(?s)```(?:json)?\s*(.*?)```").unwrap();
}

/// Extract a parseable JSON value from `raw`.
///
/// Fails with [`ModelError::MalformedOutput`], preserving the original
/// text, when neither the fenced interior nor the whole text parses.
pub fn repair(raw: &str) -> Result<Value, ModelError> {
    let candidate = JSON_FENCE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(raw);

    serde_json::from_str(candidate.trim()).map_err(|source| ModelError::MalformedOutput {
        raw: raw.to_string(),
        source,
    })
}
