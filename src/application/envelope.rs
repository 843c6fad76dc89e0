//! Caller-facing result envelope

use serde::Serialize;

/// The uniform result shape returned to the presentation layer: exactly one
/// of a populated result or a human-readable error message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// A successful result
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    /// A failed result with a human-readable message
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.data.is_some()
    }

    /// Convert into a standard `Result`
    pub fn into_result(self) -> Result<T, String> {
        match (self.data, self.error) {
            (Some(data), _) => Ok(data),
            (None, Some(error)) => Err(error),
            (None, None) => Err("Unknown error".to_string()),
        }
    }
}
