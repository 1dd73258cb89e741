//! Pantry API Client
//!
//! Typed bindings to the backend endpoints, organized by domain.

mod assistant;
mod auth;
mod nutrition;
mod recipes;
mod shopping;
mod stock;
mod transport;

#[cfg(test)]
pub mod mock;

use std::cell::RefCell;
use std::rc::Rc;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::DashboardConfig;
use crate::error::ApiError;

pub use assistant::{AnalysisKind, AssistantPrompt, BreakfastKind, DinnerKind, ShoppingAdviceKind, SnackKind};
pub use shopping::NewShoppingItem;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

/// Client for the pantry backend
///
/// Clones share the transport and the bearer token.
#[derive(Clone)]
pub struct ApiClient {
    transport: Rc<dyn Transport>,
    base_url: String,
    token: Rc<RefCell<Option<String>>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, transport: Rc<dyn Transport>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            transport,
            base_url,
            token: Rc::new(RefCell::new(None)),
        }
    }

    /// Create an API client from dashboard configuration
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.api_url(), Rc::new(HttpTransport::new()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.token.borrow_mut() = token;
    }

    pub fn has_token(&self) -> bool {
        self.token.borrow().is_some()
    }

    /// Send a request; anything but 2xx becomes an error
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest {
            method: method.clone(),
            url: format!("{}{}", self.base_url, path),
            token: self.token.borrow().clone(),
            body,
        };
        debug!(%method, path, "request");

        let response = self.transport.send(request).await.map_err(|err| {
            warn!(%method, path, error = %err, "request failed");
            err
        })?;
        if !response.is_success() {
            let err = ApiError::from_response(response.status, &response.body);
            warn!(%method, path, status = response.status, error = %err, "request rejected");
            return Err(err);
        }
        Ok(response)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let response = self.send(method, path, body).await?;
        decode(&response.body)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(Method::GET, path, None).await
    }

    /// GET a list; an empty or `null` body is an empty list
    pub(crate) async fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let items: Option<Vec<T>> = self.get(path).await?;
        Ok(items.unwrap_or_default())
    }

    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(Method::POST, path, Some(to_body(body)?)).await
    }

    /// Write whose response is only an acknowledgment; the body is never read
    pub(crate) async fn write<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError> {
        let body = body.map(to_body).transpose()?;
        self.send(method, path, body).await?;
        Ok(())
    }
}

fn to_body<B: Serialize>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|err| ApiError::Invalid(err.to_string()))
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_slice(b"null")?);
    }
    Ok(serde_json::from_slice(body)?)
}

/// Percent-encode an id for use as a path segment
pub(crate) fn segment(id: &str) -> String {
    utf8_percent_encode(id, NON_ALPHANUMERIC).to_string()
}
