//! Speech input value objects

mod audio_payload;

pub use audio_payload::{mime_for_extension, AudioPayload, AudioPayloadError};
