//! Recipe suggestion stage

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::planning::{Recipe, RecipeRequest};

use super::error::StageError;
use super::ports::GenerativeModel;
use super::reply::decode_reply;

/// Expected shape of the model's suggestion reply
#[derive(Debug, Deserialize)]
struct SuggestionReply {
    recipes: Vec<Recipe>,
}

/// Turns one validated [`RecipeRequest`] into a ranked list of candidate
/// recipes with a single generative call.
pub struct RecipeSuggestionStage {
    model: Arc<dyn GenerativeModel>,
}

impl RecipeSuggestionStage {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Suggest recipes for the request.
    ///
    /// The model decides recipe order and count; the stage never re-ranks or
    /// truncates. A well-formed reply with zero recipes fails as
    /// [`StageError::EmptyResult`] so callers can tell "model refused" apart
    /// from "model malformed".
    pub async fn suggest(&self, request: &RecipeRequest) -> Result<Vec<Recipe>, StageError> {
        let prompt = build_prompt(request);
        log::debug!(
            "requesting recipes for {} people with budget ${:.2}",
            request.party_size(),
            request.budget()
        );

        let raw = self.model.generate_text(&prompt).await?;
        let reply: SuggestionReply = decode_reply(&raw)?;

        if reply.recipes.is_empty() {
            return Err(StageError::EmptyResult(
                "the model suggested no recipes".to_string(),
            ));
        }
        validate_recipes(&reply.recipes)?;

        Ok(reply.recipes)
    }
}

fn build_prompt(request: &RecipeRequest) -> String {
    format!(
        r#"You are a recipe suggestion expert. Given the user input, number of people to serve, and budget, suggest recipes that would be suitable.

User Input: {input}
Number of People: {people}
Budget: ${budget:.2}

Consider the budget and number of people when suggesting recipes. If a specific cuisine is mentioned, prioritize recipes from that cuisine. If not, suggest a variety of options.

Respond with a JSON object of the form
{{"recipes": [{{"name": string, "ingredients": [string], "instructions": string, "estimatedCost": number, "suitability": string}}]}}
where suitability briefly explains how well the recipe fits the request, the number of people, and the budget. Output only the JSON object."#,
        input = request.free_text(),
        people = request.party_size(),
        budget = request.budget(),
    )
}

fn validate_recipes(recipes: &[Recipe]) -> Result<(), StageError> {
    for recipe in recipes {
        if recipe.name.trim().is_empty() {
            return Err(StageError::SchemaViolation(
                "recipe with a blank name".to_string(),
            ));
        }
        if !recipe.estimated_cost.is_finite() || recipe.estimated_cost < 0.0 {
            return Err(StageError::SchemaViolation(format!(
                "recipe {:?} has an invalid estimated cost",
                recipe.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::ModelError;
    use crate::domain::speech::AudioPayload;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedModel {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    impl FixedModel {
        fn new(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl GenerativeModel for FixedModel {
        async fn generate_text(&self, prompt: &str) -> Result<String, ModelError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }

        async fn generate_with_audio(
            &self,
            prompt: &str,
            _audio: &AudioPayload,
        ) -> Result<String, ModelError> {
            self.generate_text(prompt).await
        }
    }

    fn request() -> RecipeRequest {
        RecipeRequest::new("quick vegetarian dinner", 2, 20.0).unwrap()
    }

    const GOOD_REPLY: &str = r#"{"recipes": [{
        "name": "Pasta Pomodoro",
        "ingredients": ["pasta", "tomato sauce", "parmesan"],
        "instructions": "Boil pasta, heat sauce, combine.",
        "estimatedCost": 8.5,
        "suitability": "Quick, vegetarian, well under budget."
    }]}"#;

    #[tokio::test]
    async fn returns_recipes_from_reply() {
        let model = FixedModel::new(GOOD_REPLY);
        let stage = RecipeSuggestionStage::new(model.clone());

        let recipes = stage.suggest(&request()).await.unwrap();

        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].name, "Pasta Pomodoro");
        assert_eq!(recipes[0].ingredients.len(), 3);
    }

    #[tokio::test]
    async fn prompt_interpolates_request_fields() {
        let model = FixedModel::new(GOOD_REPLY);
        let stage = RecipeSuggestionStage::new(model.clone());

        stage.suggest(&request()).await.unwrap();

        let prompts = model.prompts.lock().unwrap();
        assert!(prompts[0].contains("quick vegetarian dinner"));
        assert!(prompts[0].contains("Number of People: 2"));
        assert!(prompts[0].contains("Budget: $20.00"));
    }

    #[tokio::test]
    async fn zero_recipes_is_empty_result() {
        let model = FixedModel::new(r#"{"recipes": []}"#);
        let stage = RecipeSuggestionStage::new(model);

        let err = stage.suggest(&request()).await.unwrap_err();
        assert!(matches!(err, StageError::EmptyResult(_)));
    }

    #[tokio::test]
    async fn malformed_reply_is_schema_violation() {
        let model = FixedModel::new("I would love to help with recipes!");
        let stage = RecipeSuggestionStage::new(model);

        let err = stage.suggest(&request()).await.unwrap_err();
        assert!(matches!(err, StageError::SchemaViolation(_)));
    }

    #[tokio::test]
    async fn negative_cost_is_schema_violation() {
        let model = FixedModel::new(
            r#"{"recipes": [{"name": "X", "ingredients": [], "instructions": "", "estimatedCost": -1.0, "suitability": "bad"}]}"#,
        );
        let stage = RecipeSuggestionStage::new(model);

        let err = stage.suggest(&request()).await.unwrap_err();
        assert!(matches!(err, StageError::SchemaViolation(_)));
    }

    #[tokio::test]
    async fn fenced_reply_still_parses() {
        let model = FixedModel::new(&format!("```json\n{GOOD_REPLY}\n```"));
        let stage = RecipeSuggestionStage::new(model);

        let recipes = stage.suggest(&request()).await.unwrap();
        assert_eq!(recipes.len(), 1);
    }

    #[tokio::test]
    async fn model_failure_propagates_as_upstream() {
        struct DownModel;

        #[async_trait]
        impl GenerativeModel for DownModel {
            async fn generate_text(&self, _prompt: &str) -> Result<String, ModelError> {
                Err(ModelError::RequestFailed("connection refused".to_string()))
            }

            async fn generate_with_audio(
                &self,
                _prompt: &str,
                _audio: &AudioPayload,
            ) -> Result<String, ModelError> {
                Err(ModelError::RequestFailed("connection refused".to_string()))
            }
        }

        let stage = RecipeSuggestionStage::new(Arc::new(DownModel));
        let err = stage.suggest(&request()).await.unwrap_err();
        assert!(matches!(err, StageError::Upstream(_)));
    }
}
