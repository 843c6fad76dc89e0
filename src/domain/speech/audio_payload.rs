//! Audio payload value object

use thiserror::Error;

/// Error when an encoded audio payload cannot be understood
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AudioPayloadError {
    #[error("Audio payload is missing a MIME type prefix")]
    MissingMimeType,

    #[error("Audio payload must declare base64 encoding (expected 'data:<mime>;base64,<body>')")]
    MissingBase64Marker,

    #[error("Audio payload body is not valid base64: {0}")]
    InvalidBase64(String),
}

/// Value object representing a self-describing audio clip ready for
/// transcription: raw bytes plus the MIME type the recorder declared.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioPayload {
    data: Vec<u8>,
    mime_type: String,
}

impl AudioPayload {
    /// Create a payload from raw bytes and a MIME type
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
        }
    }

    /// Parse a `data:<mime>;base64,<body>` URI, the shape browser recorders
    /// produce. The MIME type and the base64 marker are both mandatory.
    pub fn from_data_uri(uri: &str) -> Result<Self, AudioPayloadError> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or(AudioPayloadError::MissingMimeType)?;

        let (mime_type, body) = rest
            .split_once(";base64,")
            .ok_or(AudioPayloadError::MissingBase64Marker)?;

        if mime_type.is_empty() {
            return Err(AudioPayloadError::MissingMimeType);
        }

        use base64::Engine;
        let data = base64::engine::general_purpose::STANDARD
            .decode(body)
            .map_err(|e| AudioPayloadError::InvalidBase64(e.to_string()))?;

        Ok(Self {
            data,
            mime_type: mime_type.to_string(),
        })
    }

    /// Get the raw audio data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the declared MIME type
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Get the size in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.size_bytes();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }

    /// Encode the audio data as base64
    pub fn to_base64(&self) -> String {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }
}

/// Map an audio file extension to its MIME type
pub fn mime_for_extension(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "ogg" => Some("audio/ogg"),
        "mp3" => Some("audio/mp3"),
        "wav" => Some("audio/wav"),
        "webm" => Some("audio/webm"),
        "m4a" | "mp4" => Some("audio/mp4"),
        "flac" => Some("audio/flac"),
        _ => None,
    }
}
