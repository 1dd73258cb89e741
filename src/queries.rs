//! Query Keys and Mutations
//!
//! Cache keys for every remote read and the writes that invalidate them.

use std::future::Future;

use query_cache::{Mutation, QueryCache, QueryKey};

use crate::api::{ApiClient, AssistantPrompt, NewShoppingItem};
use crate::error::ApiError;
use crate::models::{NutritionSnapshot, Recipe, ShoppingItem, StockItem};

pub type Cache = QueryCache<ApiError>;

pub const STOCK: QueryKey<Vec<StockItem>> = QueryKey::new("stock");
pub const RECIPES: QueryKey<Vec<Recipe>> = QueryKey::new("recipes");
pub const NUTRITION: QueryKey<NutritionSnapshot> = QueryKey::new("nutrition");
pub const SHOPPING_LIST: QueryKey<Vec<ShoppingItem>> = QueryKey::new("shopping-list");

// ========================
// Fetchers
// ========================

pub fn load_stock(client: &ApiClient) -> impl Future<Output = Result<Vec<StockItem>, ApiError>> {
    let client = client.clone();
    async move { client.list_stock().await }
}

pub fn load_recipes(client: &ApiClient) -> impl Future<Output = Result<Vec<Recipe>, ApiError>> {
    let client = client.clone();
    async move { client.suggest_recipes().await }
}

pub fn load_nutrition(client: &ApiClient) -> impl Future<Output = Result<NutritionSnapshot, ApiError>> {
    let client = client.clone();
    async move { client.nutrition_analysis().await }
}

pub fn load_shopping_list(client: &ApiClient) -> impl Future<Output = Result<Vec<ShoppingItem>, ApiError>> {
    let client = client.clone();
    async move { client.shopping_list().await }
}

// ========================
// Mutations
// ========================

/// `(stock id, signed change)`; stock levels feed the nutrition analysis
pub fn adjust_stock(client: &ApiClient, cache: &Cache) -> Mutation<(String, i32), (), ApiError> {
    let client = client.clone();
    Mutation::new("adjust-stock", cache, move |(id, change): (String, i32)| {
        let client = client.clone();
        async move { client.adjust_stock(&id, change).await }
    })
    .invalidates(&STOCK)
    .invalidates(&NUTRITION)
}

pub fn add_shopping_item(client: &ApiClient, cache: &Cache) -> Mutation<NewShoppingItem, (), ApiError> {
    let client = client.clone();
    Mutation::new("add-shopping-item", cache, move |item: NewShoppingItem| {
        let client = client.clone();
        async move { client.add_shopping_item(&item).await }
    })
    .invalidates(&SHOPPING_LIST)
}

/// `(item id, new completed flag)`
pub fn toggle_shopping_item(client: &ApiClient, cache: &Cache) -> Mutation<(String, bool), (), ApiError> {
    let client = client.clone();
    Mutation::new("toggle-shopping-item", cache, move |(id, completed): (String, bool)| {
        let client = client.clone();
        async move { client.set_shopping_completed(&id, completed).await }
    })
    .invalidates(&SHOPPING_LIST)
}

pub fn delete_shopping_item(client: &ApiClient, cache: &Cache) -> Mutation<String, (), ApiError> {
    let client = client.clone();
    Mutation::new("delete-shopping-item", cache, move |id: String| {
        let client = client.clone();
        async move { client.delete_shopping_item(&id).await }
    })
    .invalidates(&SHOPPING_LIST)
}

/// `(recipe id, servings)`; the response is the new recipe, nothing is invalidated
pub fn adjust_servings(client: &ApiClient, cache: &Cache) -> Mutation<(String, u32), Recipe, ApiError> {
    let client = client.clone();
    Mutation::new("adjust-servings", cache, move |(id, servings): (String, u32)| {
        let client = client.clone();
        async move { client.adjust_servings(&id, servings).await }
    })
}

pub fn ask_assistant(client: &ApiClient, cache: &Cache) -> Mutation<AssistantPrompt, String, ApiError> {
    let client = client.clone();
    Mutation::new("ask-assistant", cache, move |prompt: AssistantPrompt| {
        let client = client.clone();
        async move { client.ask_assistant(&prompt).await }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use reqwest::Method;
    use serde_json::json;

    #[test]
    fn test_invalidation_edges() {
        let client = MockTransport::new().client();
        let cache = Cache::new();

        assert_eq!(adjust_stock(&client, &cache).invalidated_keys(), &["stock", "nutrition"]);
        assert_eq!(add_shopping_item(&client, &cache).invalidated_keys(), &["shopping-list"]);
        assert_eq!(toggle_shopping_item(&client, &cache).invalidated_keys(), &["shopping-list"]);
        assert_eq!(delete_shopping_item(&client, &cache).invalidated_keys(), &["shopping-list"]);
        assert!(adjust_servings(&client, &cache).invalidated_keys().is_empty());
        assert!(ask_assistant(&client, &cache).invalidated_keys().is_empty());
    }

    #[tokio::test]
    async fn test_stock_adjust_forces_stock_and_nutrition_refetch() {
        let mock = MockTransport::new();
        let client = mock.client();
        let cache = Cache::new();
        mock.respond(Method::GET, "/api/stock", 200, json!([]));
        mock.respond(Method::GET, "/api/nutrition/analysis", 200, json!({}));
        mock.respond_raw(Method::PATCH, "/api/stock/s1", 200, "OK");

        cache.fetch(&STOCK, || load_stock(&client)).await.unwrap();
        cache.fetch(&NUTRITION, || load_nutrition(&client)).await.unwrap();
        adjust_stock(&client, &cache)
            .dispatch(("s1".into(), 1))
            .await
            .unwrap();
        cache.fetch(&STOCK, || load_stock(&client)).await.unwrap();
        cache.fetch(&NUTRITION, || load_nutrition(&client)).await.unwrap();

        assert_eq!(mock.count(Method::GET, "/api/stock"), 2);
        assert_eq!(mock.count(Method::GET, "/api/nutrition/analysis"), 2);
    }

    #[tokio::test]
    async fn test_failed_stock_fetch_has_no_stale_list() {
        let mock = MockTransport::new();
        let client = mock.client();
        let cache = Cache::new();
        mock.respond(Method::GET, "/api/stock", 500, json!({"detail": "boom"}));

        let result = cache.fetch(&STOCK, || load_stock(&client)).await;

        assert!(result.is_err());
        assert!(cache.peek(&STOCK).data().is_none());
        assert!(cache.peek(&STOCK).error().is_some());
    }
}
