//! Shopping list form
//!
//! Input state of the "add item" form and the requests built from it.

use thiserror::Error;

use crate::api::NewShoppingItem;
use crate::error::ApiError;
use crate::models::ShoppingItem;

pub const DEFAULT_CATEGORY: &str = "uncategorized";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill in the {0}")]
    Missing(&'static str),

    #[error("Quantity must be a positive number")]
    InvalidQuantity,
}

/// Raw text of the three form fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShoppingForm {
    pub name: String,
    pub quantity: String,
    pub unit: String,
}

impl ShoppingForm {
    pub fn validate(&self) -> Result<NewShoppingItem, FormError> {
        let name = self.name.trim();
        let quantity = self.quantity.trim();
        let unit = self.unit.trim();

        if name.is_empty() {
            return Err(FormError::Missing("item name"));
        }
        if quantity.is_empty() {
            return Err(FormError::Missing("quantity"));
        }
        if unit.is_empty() {
            return Err(FormError::Missing("unit"));
        }

        let quantity = quantity
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|qty| qty.is_finite() && *qty > 0.0)
            .ok_or(FormError::InvalidQuantity)?;

        Ok(NewShoppingItem {
            name: name.to_string(),
            quantity,
            unit: unit.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fields are cleared only once the server accepted the item
    pub fn after_create(&mut self, result: &Result<(), ApiError>) {
        if result.is_ok() {
            self.reset();
        }
    }
}

/// Arguments for the toggle mutation: the opposite of the current flag
pub fn toggle_request(item: &ShoppingItem) -> (String, bool) {
    (item.id.clone(), !item.completed)
}
