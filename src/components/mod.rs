//! UI Components
//!
//! Leptos components for the dashboard shell and its panels.

mod assistant_panel;
mod delete_confirm_button;
mod nutrition_panel;
mod primitives;
mod recipe_panel;
mod shopping_list_panel;
mod sign_in_form;
mod stock_panel;
mod title_bar;

pub use assistant_panel::AssistantPanel;
pub use delete_confirm_button::DeleteConfirmButton;
pub use nutrition_panel::NutritionPanel;
pub use primitives::LoadingSpinner;
pub use recipe_panel::RecipePanel;
pub use shopping_list_panel::ShoppingListPanel;
pub use sign_in_form::SignInForm;
pub use stock_panel::StockPanel;
pub use title_bar::{StatusFooter, TitleBar};
