//! Decoding of structured model replies

use serde::de::DeserializeOwned;

use super::error::StageError;

/// Decode a model reply into the stage's expected shape.
///
/// Replies are requested as JSON, but models occasionally wrap them in a
/// markdown code fence anyway; tolerate that before failing the schema.
pub(crate) fn decode_reply<T: DeserializeOwned>(raw: &str) -> Result<T, StageError> {
    let body = strip_code_fence(raw);
    serde_json::from_str(body).map_err(|e| StageError::SchemaViolation(e.to_string()))
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}
