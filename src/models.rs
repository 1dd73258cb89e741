//! Frontend Models
//!
//! Data structures matching the pantry API payloads.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Pantry stock entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub unit: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
}

/// Shopping list entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionInfo {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Suggested recipe, recomputed by the server when servings change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: Vec<String>,
    pub cooking_time: u32,
    pub servings: u32,
    #[serde(default)]
    pub nutrition_info: NutritionInfo,
}

/// Nutrition analysis of the current stock, keyed by nutrient name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NutritionSnapshot {
    pub nutrient_intake: BTreeMap<String, f64>,
    pub nutrient_percentages: BTreeMap<String, f64>,
    pub potential_deficiencies: BTreeMap<String, bool>,
    pub recommendations: Vec<String>,
}

/// Signed-in user as reported by `/auth/me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(alias = "id")]
    pub uid: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "display_name")]
    pub display_name: Option<String>,
}

impl UserProfile {
    /// Name used in the greeting
    pub fn greeting_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .or_else(|| self.email.as_deref().filter(|email| !email.is_empty()))
            .unwrap_or("User")
    }
}
