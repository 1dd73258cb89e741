use serde::Serialize;

use super::{segment, ApiClient};
use crate::error::ApiError;
use crate::models::Recipe;

#[derive(Serialize)]
struct ServingsArgs {
    servings: u32,
}

impl ApiClient {
    pub async fn suggest_recipes(&self) -> Result<Vec<Recipe>, ApiError> {
        self.list("/api/recipes/suggest").await
    }

    /// Ask the server to rescale a recipe; the response replaces the recipe
    pub async fn adjust_servings(&self, id: &str, servings: u32) -> Result<Recipe, ApiError> {
        if servings == 0 {
            return Err(ApiError::Invalid("Servings must be at least 1".into()));
        }
        let path = format!("/api/recipes/{}/adjust", segment(id));
        self.post(&path, &ServingsArgs { servings }).await
    }
}
