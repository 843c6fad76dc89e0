//! The shopping assistant - pipeline orchestration

use std::sync::Arc;

use crate::domain::planning::{Recipe, RecipeRequest};
use crate::domain::shopping::PricedShoppingList;
use crate::domain::speech::AudioPayload;

use super::cache::RecipeCache;
use super::envelope::Envelope;
use super::error::StageError;
use super::ports::{GenerativeModel, ProductSearch};
use super::reconcile::PriceReconciliationStage;
use super::resolve::ProductResolutionStage;
use super::suggest::RecipeSuggestionStage;
use super::transcribe::TranscriptionStage;

const SUGGEST_FAILED: &str = "Failed to suggest recipes.";
const SHOPPING_LIST_FAILED: &str = "Failed to create shopping list.";
const TRANSCRIBE_FAILED: &str = "Failed to transcribe audio.";

/// Orchestrates the pipeline stages behind the three caller-facing
/// operations and owns the recipe cache.
///
/// This is the single point where typed stage failures become user-facing
/// messages: every operation returns an [`Envelope`] with exactly one of a
/// populated result or a human-readable error.
pub struct Assistant {
    suggestion: RecipeSuggestionStage,
    resolution: ProductResolutionStage,
    reconciliation: PriceReconciliationStage,
    transcription: TranscriptionStage,
    cache: RecipeCache,
}

impl std::fmt::Debug for Assistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assistant").finish_non_exhaustive()
    }
}

impl Assistant {
    pub fn new(
        model: Arc<dyn GenerativeModel>,
        search: Arc<dyn ProductSearch>,
        cache: RecipeCache,
    ) -> Self {
        Self {
            suggestion: RecipeSuggestionStage::new(Arc::clone(&model)),
            resolution: ProductResolutionStage::new(Arc::clone(&model), search),
            reconciliation: PriceReconciliationStage::new(Arc::clone(&model)),
            transcription: TranscriptionStage::new(model),
            cache,
        }
    }

    /// Suggest recipes for a free-form meal request.
    ///
    /// Identical requests are served from the cache for the lifetime of the
    /// process; concurrent identical requests await one computation.
    pub async fn suggest_recipes(
        &self,
        free_text: &str,
        party_size: u32,
        budget: f64,
    ) -> Envelope<Vec<Recipe>> {
        let request = match RecipeRequest::new(free_text, party_size, budget) {
            Ok(request) => request,
            Err(err) => {
                return respond(
                    Err(StageError::InvalidRequest(err.to_string())),
                    SUGGEST_FAILED,
                )
            }
        };

        let outcome = self
            .cache
            .get_or_compute(request.cache_key(), || self.suggestion.suggest(&request))
            .await
            .map(|recipes| (*recipes).clone());

        respond(outcome, SUGGEST_FAILED)
    }

    /// Build a priced, budget-checked shopping list for a chosen recipe's
    /// ingredients.
    ///
    /// There is no partial success: either a complete list or an error, even
    /// though resolution tolerates per-ingredient search failures internally.
    pub async fn build_shopping_list(
        &self,
        ingredients: &[String],
        budget: f64,
    ) -> Envelope<PricedShoppingList> {
        if ingredients.is_empty() {
            return respond(
                Err(StageError::InvalidRequest(
                    "At least one ingredient is required".to_string(),
                )),
                SHOPPING_LIST_FAILED,
            );
        }

        let outcome = self.try_build_shopping_list(ingredients, budget).await;
        respond(outcome, SHOPPING_LIST_FAILED)
    }

    async fn try_build_shopping_list(
        &self,
        ingredients: &[String],
        budget: f64,
    ) -> Result<PricedShoppingList, StageError> {
        let items = self.resolution.resolve(ingredients).await?;
        self.reconciliation.reconcile(&items, budget).await
    }

    /// Transcribe a recorded voice clip given as a data URI.
    pub async fn transcribe(&self, audio_data_uri: &str) -> Envelope<String> {
        respond(
            self.transcription.transcribe(audio_data_uri).await,
            TRANSCRIBE_FAILED,
        )
    }

    /// Transcribe an already-decoded audio payload.
    pub async fn transcribe_payload(&self, payload: &AudioPayload) -> Envelope<String> {
        respond(
            self.transcription.transcribe_payload(payload).await,
            TRANSCRIBE_FAILED,
        )
    }
}

// Translate a stage outcome into the caller-facing envelope. Failures the
// caller can correct keep their message; internal failure kinds collapse to
// the workflow's fixed message with the cause logged.
fn respond<T>(outcome: Result<T, StageError>, fallback: &str) -> Envelope<T> {
    match outcome {
        Ok(data) => Envelope::ok(data),
        Err(err) => {
            log::error!("{err}");
            if err.is_caller_correctable() {
                Envelope::err(err.to_string())
            } else {
                Envelope::err(fallback)
            }
        }
    }
}
