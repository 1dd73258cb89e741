use crate::error::ApiError;
use crate::models::{Ingredient, Recipe};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServingsStep {
    Increase,
    Decrease,
}

/// Servings to request for `step`; decreasing stops at one
pub fn next_servings(current: u32, step: ServingsStep) -> Option<u32> {
    match step {
        ServingsStep::Increase => current.checked_add(1),
        ServingsStep::Decrease if current > 1 => Some(current - 1),
        ServingsStep::Decrease => None,
    }
}

/// Arguments for the adjust mutation
pub fn adjust_request(recipe: &Recipe, step: ServingsStep) -> Option<(String, u32)> {
    next_servings(recipe.servings, step).map(|servings| (recipe.id.clone(), servings))
}

/// Quantity without a trailing `.0`
/// The server's recomputed recipe replaces the selection; a failure keeps it
pub fn apply_adjusted(selected: &mut Option<Recipe>, result: Result<Recipe, ApiError>) {
    if let Ok(recipe) = result {
        *selected = Some(recipe);
    }
}

pub fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format!("{}", quantity as i64)
    } else {
        let text = format!("{:.2}", quantity);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// "qty unit name"
pub fn ingredient_line(ingredient: &Ingredient) -> String {
    format!(
        "{} {} {}",
        format_quantity(ingredient.quantity),
        ingredient.unit,
        ingredient.name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::queries::{self, Cache};
    use crate::models::NutritionInfo;
    use reqwest::Method;
    use serde_json::json;

    fn recipe(servings: u32) -> Recipe {
        Recipe {
            id: "r1".into(),
            name: "Pancakes".into(),
            ingredients: vec![Ingredient {
                name: "flour".into(),
                quantity: 1.5,
                unit: "cup".into(),
            }],
            instructions: vec!["Mix".into(), "Fry".into()],
            cooking_time: 20,
            servings,
            nutrition_info: NutritionInfo::default(),
        }
    }

    #[test]
    fn test_decrease_stops_at_one() {
        assert_eq!(next_servings(2, ServingsStep::Decrease), Some(1));
        assert_eq!(next_servings(1, ServingsStep::Decrease), None);
        assert_eq!(next_servings(1, ServingsStep::Increase), Some(2));
    }

    #[test]
    fn test_ingredient_line() {
        assert_eq!(ingredient_line(&recipe(2).ingredients[0]), "1.5 cup flour");
        assert_eq!(format_quantity(2.0), "2");
        assert_eq!(format_quantity(0.25), "0.25");
    }

    #[tokio::test]
    async fn test_adjust_replaces_selection_with_server_recipe() {
        let mock = MockTransport::new();
        let client = mock.client();
        let cache = Cache::new();
        let server_recipe = json!({
            "id": "r1", "name": "Pancakes (family size)", "cookingTime": 25, "servings": 3,
            "ingredients": [{"name": "flour", "quantity": 2.25, "unit": "cup"}],
            "instructions": ["Mix", "Fry", "Serve"],
            "nutritionInfo": {"calories": 900, "protein": 24, "carbs": 150, "fat": 21}
        });
        mock.respond(Method::POST, "/api/recipes/r1/adjust", 200, server_recipe.clone());

        let mut selected = Some(recipe(2));
        let request = adjust_request(selected.as_ref().unwrap(), ServingsStep::Increase).unwrap();
        assert_eq!(request, ("r1".to_string(), 3));

        let result = queries::adjust_servings(&client, &cache).dispatch(request).await;
        apply_adjusted(&mut selected, result);

        let expected: Recipe = serde_json::from_value(server_recipe).unwrap();
        assert_eq!(selected, Some(expected));
        assert_eq!(mock.requests()[0].body, Some(json!({"servings": 3})));
    }

    #[tokio::test]
    async fn test_failed_adjust_keeps_selection() {
        let mock = MockTransport::new();
        let client = mock.client();
        let cache = Cache::new();
        mock.respond(Method::POST, "/api/recipes/r1/adjust", 404, json!({"detail": "Recipe not found"}));

        let mut selected = Some(recipe(2));
        let result = queries::adjust_servings(&client, &cache)
            .dispatch(("r1".into(), 3))
            .await;
        apply_adjusted(&mut selected, result);

        assert_eq!(selected, Some(recipe(2)));
    }
}
