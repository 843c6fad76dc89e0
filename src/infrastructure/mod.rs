//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like the Gemini and SerpAPI services.

pub mod config;
pub mod model;
pub mod search;

// Re-export adapters
pub use config::XdgConfigStore;
pub use model::GeminiModel;
pub use search::SerpApiSearch;
