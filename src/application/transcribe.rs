//! Speech transcription stage

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::speech::AudioPayload;

use super::error::StageError;
use super::ports::GenerativeModel;
use super::reply::decode_reply;

const TRANSCRIBE_INSTRUCTION: &str = r#"Transcribe the attached audio to text.

Respond with a JSON object of the form {"transcription": string} containing the transcribed text. Output only the JSON object."#;

/// Expected shape of the model's transcription reply
#[derive(Debug, Deserialize)]
struct TranscriptionReply {
    transcription: String,
}

/// Converts one recorded voice clip into text with a single generative
/// call. No chunking, streaming, or partial results.
pub struct TranscriptionStage {
    model: Arc<dyn GenerativeModel>,
}

impl TranscriptionStage {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Transcribe a `data:<mime>;base64,<body>` URI.
    ///
    /// Malformed payloads fail before any model call is made.
    pub async fn transcribe(&self, audio_data_uri: &str) -> Result<String, StageError> {
        let payload = AudioPayload::from_data_uri(audio_data_uri)
            .map_err(|e| StageError::UnsupportedFormat(e.to_string()))?;
        self.transcribe_payload(&payload).await
    }

    /// Transcribe an already-decoded audio payload.
    pub async fn transcribe_payload(&self, payload: &AudioPayload) -> Result<String, StageError> {
        log::debug!(
            "transcribing {} of {}",
            payload.human_readable_size(),
            payload.mime_type()
        );

        let raw = self
            .model
            .generate_with_audio(TRANSCRIBE_INSTRUCTION, payload)
            .await?;
        let reply: TranscriptionReply = decode_reply(&raw)?;

        let text = reply.transcription.trim();
        if text.is_empty() {
            return Err(StageError::EmptyResult(
                "the model returned an empty transcription".to_string(),
            ));
        }
        Ok(text.to_string())
    }
}
