//! Assistant prompts
//!
//! Free-text suggestions generated by the backend from the current stock.

use serde::Deserialize;

use super::ApiClient;
use crate::error::ApiError;

macro_rules! prompt_kind {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal, $label:literal;)+ }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Value sent to the backend
            pub fn wire(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }
    };
}

prompt_kind!(BreakfastKind {
    Quick => "quick", "Quick breakfast";
    Eggy => "eggy", "With eggs";
    Breadless => "breadless", "Without bread";
    Sweet => "sweet", "Sweet breakfast";
    Light => "light", "Light breakfast";
    Cold => "cold", "Cold breakfast";
});

prompt_kind!(DinnerKind {
    Quick => "quick", "Quick dinner";
    Medium => "medium", "Medium effort";
    Long => "long", "Special recipe";
    Meatless => "meatless", "Meatless";
    Soupy => "soupy", "Soup based";
    OnePan => "onepan", "One pan";
});

prompt_kind!(SnackKind {
    Sweet => "sweet", "Sweet snack";
    Salty => "salty", "Salty snack";
    NoCooking => "no_cooking", "No oven or stove";
    MovieNight => "movie_night", "Movie night";
    DietFriendly => "diet_friendly", "Diet friendly";
    Quick => "quick", "Ready in 5 minutes";
});

prompt_kind!(AnalysisKind {
    Balance => "balance", "Nutrient balance of my stock";
    CarbProtein => "carb_protein", "Carb/protein ratio";
    VeggieRecipe => "veggie_recipe", "Vegetable focused recipe";
    LowCalorie => "low_calorie", "Low calorie recipe";
    ImmuneBoost => "immune_boost", "Immune boosting";
    PostWorkout => "post_workout", "Post workout meal";
    CalorieSpecific => "calorie_specific", "Fits my daily calories";
    VitaminRich => "vitamin_rich", "Vitamin rich";
});

prompt_kind!(ShoppingAdviceKind {
    BasicNeeds => "basic_needs", "Missing from my stock";
    ThreeDayPlan => "three_day_plan", "Three day plan";
    BreakfastEssentials => "breakfast_essentials", "Breakfast essentials";
    EssentialItems => "essential_items", "Basic needs list";
    ProteinFocused => "protein_focused", "Protein focused";
    CleanEating => "clean_eating", "Weekly clean eating";
});

/// One request to the assistant
#[derive(Debug, Clone, PartialEq)]
pub enum AssistantPrompt {
    Breakfast(BreakfastKind),
    Dinner(DinnerKind),
    Snack(SnackKind),
    Analysis(AnalysisKind),
    Shopping(ShoppingAdviceKind),
    /// Free-text question about the current stock
    Custom(String),
}

impl AssistantPrompt {
    /// Endpoint path, body field and body value
    fn route(&self) -> (&'static str, &'static str, &str) {
        match self {
            AssistantPrompt::Breakfast(kind) => ("/api/recipes/breakfast-suggest", "recipe_type", kind.wire()),
            AssistantPrompt::Dinner(kind) => ("/api/recipes/dinner-suggest", "suggestion_type", kind.wire()),
            AssistantPrompt::Snack(kind) => ("/api/snacks/suggest", "snack_type", kind.wire()),
            AssistantPrompt::Analysis(kind) => ("/api/snacks/analyze", "analysis_type", kind.wire()),
            AssistantPrompt::Shopping(kind) => ("/api/snacks/shopping", "list_type", kind.wire()),
            AssistantPrompt::Custom(question) => ("/api/snacks/custom", "question", question.as_str()),
        }
    }
}

#[derive(Deserialize)]
struct Reply {
    #[serde(alias = "analysis", alias = "answer", alias = "recipe")]
    suggestion: String,
}

impl ApiClient {
    pub async fn ask_assistant(&self, prompt: &AssistantPrompt) -> Result<String, ApiError> {
        if let AssistantPrompt::Custom(question) = prompt {
            if question.trim().is_empty() {
                return Err(ApiError::Invalid("Please enter a question".into()));
            }
        }

        let (path, field, value) = prompt.route();
        let mut body = serde_json::Map::new();
        body.insert(field.to_string(), serde_json::Value::String(value.trim().to_string()));

        let reply: Reply = self.post(path, &body).await?;
        Ok(reply.suggestion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use reqwest::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_dinner_uses_suggestion_type() {
        let mock = MockTransport::new();
        let client = mock.client();
        mock.respond(
            Method::POST,
            "/api/recipes/dinner-suggest",
            200,
            json!({"suggestion": "Lentil soup"}),
        );

        let text = client
            .ask_assistant(&AssistantPrompt::Dinner(DinnerKind::OnePan))
            .await
            .unwrap();

        assert_eq!(text, "Lentil soup");
        assert_eq!(mock.requests()[0].body, Some(json!({"suggestion_type": "onepan"})));
    }

    #[tokio::test]
    async fn test_analysis_and_custom_reply_fields() {
        let mock = MockTransport::new();
        let client = mock.client();
        mock.respond(Method::POST, "/api/snacks/analyze", 200, json!({"analysis": "Balanced"}));
        mock.respond(Method::POST, "/api/snacks/custom", 200, json!({"answer": "Yes"}));

        let analysis = client
            .ask_assistant(&AssistantPrompt::Analysis(AnalysisKind::Balance))
            .await
            .unwrap();
        let answer = client
            .ask_assistant(&AssistantPrompt::Custom(" Can I bake bread? ".into()))
            .await
            .unwrap();

        assert_eq!(analysis, "Balanced");
        assert_eq!(answer, "Yes");
        assert_eq!(mock.requests()[1].body, Some(json!({"question": "Can I bake bread?"})));
    }

    #[tokio::test]
    async fn test_blank_question_is_rejected() {
        let mock = MockTransport::new();
        let client = mock.client();

        let err = client
            .ask_assistant(&AssistantPrompt::Custom("   ".into()))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Invalid(_)));
        assert!(mock.requests().is_empty());
    }

    #[test]
    fn test_kind_tables() {
        assert_eq!(BreakfastKind::ALL.len(), 6);
        assert_eq!(AnalysisKind::ALL.len(), 8);
        assert_eq!(SnackKind::NoCooking.wire(), "no_cooking");
    }
}
