//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// SmartBasket - AI meal planning and budget-aware shopping lists
#[derive(Parser, Debug)]
#[command(name = "smart-basket")]
#[command(version)]
#[command(about = "AI meal planning and budget-aware shopping lists using Google Gemini")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Suggest recipes for a free-form meal request
    Suggest {
        /// The meal request, e.g. "quick vegetarian dinner"
        request: String,

        /// Number of people the meal should serve
        #[arg(short = 'p', long, value_name = "N")]
        people: Option<u32>,

        /// Budget for the meal in dollars
        #[arg(short = 'b', long, value_name = "AMOUNT")]
        budget: Option<f64>,
    },
    /// Build a priced, budget-checked shopping list from ingredients
    Cart {
        /// Ingredients to resolve to store products
        #[arg(required = true)]
        ingredients: Vec<String>,

        /// Budget for the shopping list in dollars
        #[arg(short = 'b', long, value_name = "AMOUNT")]
        budget: Option<f64>,
    },
    /// Transcribe a recorded meal request from an audio file
    Transcribe {
        /// Path to the audio file (ogg, mp3, wav, webm, m4a, flac)
        file: PathBuf,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "gemini_api_key",
    "serpapi_api_key",
    "model",
    "party_size",
    "budget",
    "cache_entries",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
