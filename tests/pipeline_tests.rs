//! End-to-end pipeline tests against scripted service doubles

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use smart_basket::application::ports::{
    GenerativeModel, ModelError, ProductSearch, SearchError,
};
use smart_basket::application::{Assistant, RecipeCache};
use smart_basket::domain::shopping::{PriceSource, RawProduct};
use smart_basket::domain::speech::AudioPayload;

/// Model double that replays scripted replies in order
struct ScriptedModel {
    replies: Mutex<VecDeque<String>>,
    calls: AtomicUsize,
}

impl ScriptedModel {
    fn new(replies: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate_text(&self, _prompt: &str) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ModelError::RequestFailed("no scripted reply left".to_string()))
    }

    async fn generate_with_audio(
        &self,
        prompt: &str,
        _audio: &AudioPayload,
    ) -> Result<String, ModelError> {
        self.generate_text(prompt).await
    }
}

/// Search double that returns one product per known query and fails the rest
struct ScriptedSearch {
    entries: Vec<(String, Vec<RawProduct>)>,
    calls: AtomicUsize,
}

impl ScriptedSearch {
    fn new(entries: &[(&str, &[(&str, f64)])]) -> Arc<Self> {
        let entries = entries
            .iter()
            .map(|(query, found)| {
                let products = found
                    .iter()
                    .map(|(name, price)| RawProduct {
                        name: name.to_string(),
                        price: *price,
                        image_url: format!("https://example.com/{name}.jpg"),
                        product_url: format!("https://example.com/{name}"),
                    })
                    .collect();
                (query.to_string(), products)
            })
            .collect();
        Arc::new(Self {
            entries,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductSearch for ScriptedSearch {
    async fn search(&self, query: &str) -> Result<Vec<RawProduct>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entries
            .iter()
            .find(|(known, _)| known == query)
            .map(|(_, products)| products.clone())
            .ok_or_else(|| SearchError::RequestFailed("service unavailable".to_string()))
    }
}

/// Search double without a credential
struct KeylessSearch {
    calls: AtomicUsize,
}

impl KeylessSearch {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl ProductSearch for KeylessSearch {
    async fn search(&self, _query: &str) -> Result<Vec<RawProduct>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(SearchError::MissingApiKey)
    }
}

fn ingredients(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

const RECIPES_REPLY: &str = r#"{"recipes": [{
    "name": "Pasta Pomodoro",
    "ingredients": ["pasta", "tomato sauce", "parmesan"],
    "instructions": "Boil pasta, heat sauce, combine, top with parmesan.",
    "estimatedCost": 8.5,
    "suitability": "Quick, vegetarian, and well under the $20 budget for two."
}]}"#;

const MATCH_REPLY: &str = r#"{"items": [
    {"productName": "Barilla Penne", "price": 1.48},
    {"productName": "Classico Marinara", "price": 2.50},
    {"productName": "parmesan"}
]}"#;

const ESTIMATE_REPLY: &str = r#"{
    "estimatedShoppingList": [
        {"productName": "Barilla Penne", "price": 1.48},
        {"productName": "Classico Marinara", "price": 2.50},
        {"productName": "parmesan", "price": 3.52}
    ],
    "totalEstimatedCost": 7.5,
    "budgetAdherence": "The list comes to $7.50, comfortably within the $20.00 budget."
}"#;

#[tokio::test]
async fn identical_requests_are_served_from_cache() {
    let model = ScriptedModel::new(&[RECIPES_REPLY]);
    let assistant = Assistant::new(model.clone(), KeylessSearch::new(), RecipeCache::unbounded());

    let first = assistant
        .suggest_recipes("quick vegetarian dinner", 2, 20.0)
        .await
        .into_result()
        .unwrap();
    let second = assistant
        .suggest_recipes("quick vegetarian dinner", 2, 20.0)
        .await
        .into_result()
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(model.calls(), 1, "second call must not reach the model");
}

#[tokio::test]
async fn different_requests_are_computed_separately() {
    let model = ScriptedModel::new(&[RECIPES_REPLY, RECIPES_REPLY]);
    let assistant = Assistant::new(model.clone(), KeylessSearch::new(), RecipeCache::unbounded());

    assistant
        .suggest_recipes("quick vegetarian dinner", 2, 20.0)
        .await
        .into_result()
        .unwrap();
    assistant
        .suggest_recipes("quick vegetarian dinner", 4, 20.0)
        .await
        .into_result()
        .unwrap();

    assert_eq!(model.calls(), 2);
}

#[tokio::test]
async fn shopping_list_total_is_the_item_sum() {
    let model = ScriptedModel::new(&[MATCH_REPLY, ESTIMATE_REPLY]);
    let search = ScriptedSearch::new(&[
        ("pasta", &[("Barilla Penne", 1.48)] as &[_]),
        ("tomato sauce", &[("Classico Marinara", 2.50)]),
        ("parmesan", &[]),
    ]);
    let assistant = Assistant::new(model, search, RecipeCache::unbounded());

    let list = assistant
        .build_shopping_list(&ingredients(&["pasta", "tomato sauce", "parmesan"]), 20.0)
        .await
        .into_result()
        .unwrap();

    assert_eq!(list.estimated_shopping_list.len(), 3);
    assert!((list.total_estimated_cost - list.items_total()).abs() <= 0.01);
    assert_eq!(list.total_estimated_cost, 7.5);
    assert!(!list.budget_adherence.trim().is_empty());
}

#[tokio::test]
async fn storefront_prices_pass_through_and_gaps_are_estimated() {
    let model = ScriptedModel::new(&[MATCH_REPLY, ESTIMATE_REPLY]);
    let search = ScriptedSearch::new(&[
        ("pasta", &[("Barilla Penne", 1.48)] as &[_]),
        ("tomato sauce", &[("Classico Marinara", 2.50)]),
        ("parmesan", &[]),
    ]);
    let assistant = Assistant::new(model, search, RecipeCache::unbounded());

    let list = assistant
        .build_shopping_list(&ingredients(&["pasta", "tomato sauce", "parmesan"]), 20.0)
        .await
        .into_result()
        .unwrap();

    let items = &list.estimated_shopping_list;
    assert_eq!(items[0].price, 1.48);
    assert_eq!(items[0].price_source, PriceSource::Storefront);
    assert_eq!(items[1].price, 2.50);
    assert_eq!(items[1].price_source, PriceSource::Storefront);
    assert_eq!(items[2].price_source, PriceSource::ReferenceEstimate);
}

#[tokio::test]
async fn output_length_and_order_survive_a_failed_search() {
    let model = ScriptedModel::new(&[MATCH_REPLY, ESTIMATE_REPLY]);
    // "tomato sauce" is unknown to the search double, so its query fails
    let search = ScriptedSearch::new(&[
        ("pasta", &[("Barilla Penne", 1.48)] as &[_]),
        ("parmesan", &[]),
    ]);
    let assistant = Assistant::new(model, search.clone(), RecipeCache::unbounded());

    let list = assistant
        .build_shopping_list(&ingredients(&["pasta", "tomato sauce", "parmesan"]), 20.0)
        .await
        .into_result()
        .unwrap();

    assert_eq!(list.estimated_shopping_list.len(), 3);
    assert_eq!(list.estimated_shopping_list[0].product_name, "Barilla Penne");
    assert_eq!(
        list.estimated_shopping_list[1].product_name,
        "Classico Marinara"
    );
    assert_eq!(list.estimated_shopping_list[2].product_name, "parmesan");
    assert_eq!(search.calls(), 3, "every ingredient is still searched");
}

#[tokio::test]
async fn missing_search_credential_fails_without_model_calls() {
    let model = ScriptedModel::new(&[MATCH_REPLY, ESTIMATE_REPLY]);
    let search = KeylessSearch::new();
    let assistant = Assistant::new(model.clone(), search, RecipeCache::unbounded());

    let envelope = assistant
        .build_shopping_list(&ingredients(&["pasta"]), 20.0)
        .await;

    let message = envelope.error.expect("expected an error");
    assert!(message.contains("SERPAPI_API_KEY"));
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn end_to_end_suggestion_to_shopping_list() {
    let model = ScriptedModel::new(&[RECIPES_REPLY, MATCH_REPLY, ESTIMATE_REPLY]);
    let search = ScriptedSearch::new(&[
        ("pasta", &[("Barilla Penne", 1.48)] as &[_]),
        ("tomato sauce", &[("Classico Marinara", 2.50)]),
        ("parmesan", &[]),
    ]);
    let assistant = Assistant::new(model, search, RecipeCache::unbounded());

    let recipes = assistant
        .suggest_recipes("quick vegetarian dinner", 2, 20.0)
        .await
        .into_result()
        .unwrap();
    assert!(!recipes.is_empty());
    assert!(recipes[0].estimated_cost <= 20.0);

    let chosen = &recipes[0];
    let list = assistant
        .build_shopping_list(&chosen.ingredients, 20.0)
        .await
        .into_result()
        .unwrap();

    assert_eq!(list.estimated_shopping_list.len(), chosen.ingredients.len());
    let expected_total: f64 = list
        .estimated_shopping_list
        .iter()
        .map(|item| item.price)
        .sum();
    assert!((list.total_estimated_cost - expected_total).abs() <= 0.01);
    assert!(!list.budget_adherence.trim().is_empty());
    // under budget, so no adjustment should be needed
    assert!(list.total_estimated_cost <= 20.0);
}

#[tokio::test]
async fn malformed_audio_payload_never_reaches_the_model() {
    let model = ScriptedModel::new(&[]);
    let assistant = Assistant::new(model.clone(), KeylessSearch::new(), RecipeCache::unbounded());

    let envelope = assistant.transcribe("UklGRiQAAABXQVZF").await;

    assert!(envelope.error.is_some());
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn transcription_feeds_back_request_text() {
    let model = ScriptedModel::new(&[r#"{"transcription": "quick vegetarian dinner"}"#]);
    let assistant = Assistant::new(model, KeylessSearch::new(), RecipeCache::unbounded());

    let text = assistant
        .transcribe("data:audio/webm;base64,YWFh")
        .await
        .into_result()
        .unwrap();

    assert_eq!(text, "quick vegetarian dinner");
}

#[tokio::test]
async fn failed_suggestion_is_retried_on_the_next_request() {
    // first reply is garbage, second is good; the failure must not be cached
    let model = ScriptedModel::new(&["not json", RECIPES_REPLY]);
    let assistant = Assistant::new(model.clone(), KeylessSearch::new(), RecipeCache::unbounded());

    let first = assistant
        .suggest_recipes("quick vegetarian dinner", 2, 20.0)
        .await;
    assert_eq!(first.error.as_deref(), Some("Failed to suggest recipes."));

    let second = assistant
        .suggest_recipes("quick vegetarian dinner", 2, 20.0)
        .await;
    assert!(second.is_ok());
    assert_eq!(model.calls(), 2);
}
