use crate::error::ApiError;

/// Numbers assistant requests so only the answer to the newest one is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    /// Start a request, superseding every earlier one
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_latest(&self, request: u64) -> bool {
        request == self.latest
    }
}

/// What the result area shows
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AssistantView {
    #[default]
    Idle,
    Waiting,
    Answer(String),
    Failed(String),
}

impl AssistantView {
    /// View for a finished request, or `None` when a newer one superseded it
    pub fn settle(
        sequence: &RequestSequence,
        request: u64,
        result: Result<String, ApiError>,
    ) -> Option<Self> {
        if !sequence.is_latest(request) {
            return None;
        }
        Some(match result {
            Ok(answer) => AssistantView::Answer(answer),
            Err(err) => AssistantView::Failed(err.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::{AssistantPrompt, SnackKind};
    use crate::queries::{self, Cache};
    use futures::channel::oneshot;
    use reqwest::Method;
    use serde_json::json;

    #[test]
    fn test_newer_request_supersedes_older() {
        let mut sequence = RequestSequence::default();
        let first = sequence.begin();
        let second = sequence.begin();

        assert!(!sequence.is_latest(first));
        assert!(sequence.is_latest(second));
    }

    #[tokio::test]
    async fn test_late_answer_is_discarded() {
        let mut sequence = RequestSequence::default();
        let (slow_tx, slow_rx) = oneshot::channel::<String>();

        let slow = sequence.begin();
        let fast = sequence.begin();
        let mut view = AssistantView::Waiting;

        if let Some(next) = AssistantView::settle(&sequence, fast, Ok("Yogurt with honey".into())) {
            view = next;
        }
        slow_tx.send("Chips".into()).unwrap();
        let late = AssistantView::settle(&sequence, slow, Ok(slow_rx.await.unwrap()));

        assert_eq!(late, None);
        assert_eq!(view, AssistantView::Answer("Yogurt with honey".into()));
    }

    #[test]
    fn test_latest_failure_is_shown() {
        let mut sequence = RequestSequence::default();
        let request = sequence.begin();

        let failure = Err(ApiError::Invalid("Please enter a question".into()));
        let view = AssistantView::settle(&sequence, request, failure);

        assert_eq!(view, Some(AssistantView::Failed("Please enter a question".into())));
    }

    #[tokio::test]
    async fn test_snack_prompt_round_trip() {
        let mock = MockTransport::new();
        let client = mock.client();
        let cache = Cache::new();
        mock.respond(Method::POST, "/api/snacks/suggest", 200, json!({"suggestion": "Apple slices"}));

        let answer = queries::ask_assistant(&client, &cache)
            .dispatch(AssistantPrompt::Snack(SnackKind::DietFriendly))
            .await
            .unwrap();

        assert_eq!(answer, "Apple slices");
        assert_eq!(mock.requests()[0].body, Some(json!({"snack_type": "diet_friendly"})));
    }
}
