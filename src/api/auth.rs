use serde::{Deserialize, Serialize};

use super::ApiClient;
use crate::error::ApiError;
use crate::models::UserProfile;

#[derive(Serialize)]
struct LoginArgs<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginReply {
    #[serde(alias = "id_token")]
    id_token: String,
}

impl ApiClient {
    /// Exchange credentials for a bearer token
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let reply: LoginReply = self.post("/auth/login", &LoginArgs { email, password }).await?;
        Ok(reply.id_token)
    }

    /// Profile of the token holder
    pub async fn current_user(&self) -> Result<UserProfile, ApiError> {
        self.get("/auth/me").await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::mock::MockTransport;
    use reqwest::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_login_returns_id_token() {
        let mock = MockTransport::new();
        let client = mock.client();
        mock.respond(Method::POST, "/auth/login", 200, json!({"idToken": "abc"}));

        let token = client.login("ada@example.com", "secret").await.unwrap();

        assert_eq!(token, "abc");
        assert_eq!(
            mock.requests()[0].body,
            Some(json!({"email": "ada@example.com", "password": "secret"}))
        );
    }

    #[tokio::test]
    async fn test_current_user_accepts_backend_field_names() {
        let mock = MockTransport::new();
        let client = mock.client();
        mock.respond(
            Method::GET,
            "/auth/me",
            200,
            json!({"id": "u1", "email": "ada@example.com", "display_name": "Ada"}),
        );

        let user = client.current_user().await.unwrap();

        assert_eq!(user.uid, "u1");
        assert_eq!(user.greeting_name(), "Ada");
    }
}
