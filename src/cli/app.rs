//! Main app runners for the pipeline commands

use std::env;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use crate::application::ports::{ConfigStore, GenerativeModel, ProductSearch};
use crate::application::{Assistant, RecipeCache};
use crate::domain::config::AppConfig;
use crate::domain::speech::{mime_for_extension, AudioPayload};
use crate::infrastructure::{GeminiModel, SerpApiSearch, XdgConfigStore};

use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Run the suggest command
pub async fn run_suggest(request: String, people: Option<u32>, budget: Option<f64>) -> ExitCode {
    let mut presenter = Presenter::new();
    let config = load_merged_config().await;

    let assistant = match build_assistant(&config) {
        Ok(assistant) => assistant,
        Err(message) => {
            presenter.error(&message);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let people = people.unwrap_or_else(|| config.party_size_or_default());
    let budget = budget.unwrap_or_else(|| config.budget_or_default());

    presenter.start_spinner("Suggesting recipes...");
    let envelope = assistant.suggest_recipes(&request, people, budget).await;

    match envelope.into_result() {
        Ok(recipes) => {
            presenter.spinner_success(&format!(
                "{} recipe{} for {} people, budget ${:.2}",
                recipes.len(),
                if recipes.len() == 1 { "" } else { "s" },
                people,
                budget
            ));
            for (index, recipe) in recipes.iter().enumerate() {
                presenter.recipe(index, recipe);
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(message) => {
            presenter.spinner_fail(&message);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Run the cart command
pub async fn run_cart(ingredients: Vec<String>, budget: Option<f64>) -> ExitCode {
    let mut presenter = Presenter::new();
    let config = load_merged_config().await;

    let assistant = match build_assistant(&config) {
        Ok(assistant) => assistant,
        Err(message) => {
            presenter.error(&message);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let budget = budget.unwrap_or_else(|| config.budget_or_default());

    presenter.start_spinner("Building shopping list...");
    let envelope = assistant.build_shopping_list(&ingredients, budget).await;

    match envelope.into_result() {
        Ok(list) => {
            presenter.spinner_success(&format!(
                "{} items priced",
                list.estimated_shopping_list.len()
            ));
            presenter.shopping_list(&list, budget);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(message) => {
            presenter.spinner_fail(&message);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Run the transcribe command
pub async fn run_transcribe(file: std::path::PathBuf) -> ExitCode {
    let mut presenter = Presenter::new();
    let config = load_merged_config().await;

    let assistant = match build_assistant(&config) {
        Ok(assistant) => assistant,
        Err(message) => {
            presenter.error(&message);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let payload = match read_audio_file(&file).await {
        Ok(payload) => payload,
        Err(message) => {
            presenter.error(&message);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    presenter.start_spinner("Transcribing...");
    let envelope = assistant.transcribe_payload(&payload).await;

    match envelope.into_result() {
        Ok(text) => {
            presenter.spinner_success("Transcription complete");
            presenter.output(&text);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(message) => {
            presenter.spinner_fail(&message);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Load and merge configuration: defaults < file < environment
pub async fn load_merged_config() -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    let env_config = AppConfig {
        gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|s| !s.is_empty()),
        serpapi_api_key: env::var("SERPAPI_API_KEY").ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    AppConfig::defaults().merge(file_config).merge(env_config)
}

/// Wire the assistant from configuration
fn build_assistant(config: &AppConfig) -> Result<Assistant, String> {
    let gemini_key = config.gemini_api_key.clone().ok_or_else(|| {
        "Missing Gemini API key. Set GEMINI_API_KEY or run 'smart-basket config set gemini_api_key <key>'".to_string()
    })?;

    let model: Arc<dyn GenerativeModel> = Arc::new(match &config.model {
        Some(name) => GeminiModel::with_model(gemini_key, name),
        None => GeminiModel::new(gemini_key),
    });
    let search: Arc<dyn ProductSearch> =
        Arc::new(SerpApiSearch::new(config.serpapi_api_key.clone()));

    Ok(Assistant::new(
        model,
        search,
        RecipeCache::new(config.cache_bound()),
    ))
}

/// Read an audio file into a payload, inferring the MIME type from the
/// file extension
async fn read_audio_file(file: &Path) -> Result<AudioPayload, String> {
    let extension = file
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();

    let mime_type = mime_for_extension(extension).ok_or_else(|| {
        format!(
            "Unsupported audio file extension {:?}. Supported: ogg, mp3, wav, webm, m4a, flac",
            extension
        )
    })?;

    let data = tokio::fs::read(file)
        .await
        .map_err(|e| format!("Failed to read {}: {}", file.display(), e))?;

    Ok(AudioPayload::new(data, mime_type))
}
