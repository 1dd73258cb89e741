use reqwest::Method;
use serde::Serialize;

use super::{segment, ApiClient};
use crate::error::ApiError;
use crate::models::ShoppingItem;

/// Body of a create request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewShoppingItem {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: String,
}

#[derive(Serialize)]
struct CompletedArgs {
    completed: bool,
}

impl ApiClient {
    pub async fn shopping_list(&self) -> Result<Vec<ShoppingItem>, ApiError> {
        self.list("/api/shopping-list").await
    }

    pub async fn add_shopping_item(&self, item: &NewShoppingItem) -> Result<(), ApiError> {
        self.write(Method::POST, "/api/shopping-list", Some(item)).await
    }

    pub async fn set_shopping_completed(&self, id: &str, completed: bool) -> Result<(), ApiError> {
        let path = format!("/api/shopping-list/{}", segment(id));
        self.write(Method::PATCH, &path, Some(&CompletedArgs { completed })).await
    }

    pub async fn delete_shopping_item(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/api/shopping-list/{}", segment(id));
        self.write::<()>(Method::DELETE, &path, None).await
    }
}
