use reqwest::Method;
use serde::Serialize;

use super::{segment, ApiClient};
use crate::error::ApiError;
use crate::models::StockItem;

#[derive(Serialize)]
struct ChangeArgs {
    change: i32,
}

impl ApiClient {
    pub async fn list_stock(&self) -> Result<Vec<StockItem>, ApiError> {
        self.list("/api/stock").await
    }

    /// Adjust a stock quantity by `change` units
    pub async fn adjust_stock(&self, id: &str, change: i32) -> Result<(), ApiError> {
        let path = format!("/api/stock/{}", segment(id));
        self.write(Method::PATCH, &path, Some(&ChangeArgs { change })).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_adjust_sends_signed_change() {
        let mock = MockTransport::new();
        let client = mock.client();
        mock.respond(Method::PATCH, "/api/stock/s%201", 200, json!({"ok": true}));

        client.adjust_stock("s 1", -1).await.unwrap();

        let request = &mock.requests()[0];
        assert_eq!(request.method, Method::PATCH);
        assert_eq!(request.body, Some(json!({"change": -1})));
    }

    #[tokio::test]
    async fn test_plain_text_ack_is_success() {
        let mock = MockTransport::new();
        let client = mock.client();
        mock.respond_raw(Method::PATCH, "/api/stock/s1", 200, "OK");
        mock.respond_raw(Method::PATCH, "/api/stock/s2", 204, "");

        assert_eq!(client.adjust_stock("s1", 1).await, Ok(()));
        assert_eq!(client.adjust_stock("s2", -1).await, Ok(()));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let mock = MockTransport::new();
        let client = mock.client();
        mock.fail(Method::PATCH, "/api/stock/s1", ApiError::Transport("connection refused".into()));

        let err = client.adjust_stock("s1", 1).await.unwrap_err();
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[tokio::test]
    async fn test_server_error_on_list() {
        let mock = MockTransport::new();
        let client = mock.client();
        mock.respond(Method::GET, "/api/stock", 500, json!({"detail": "database down"}));

        let err = client.list_stock().await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Server {
                status: 500,
                detail: "database down".into()
            }
        );
    }
}
