//! Client Errors
//!
//! Failure taxonomy of the HTTP client. Every panel renders these inline.

use serde::Deserialize;
use thiserror::Error;

/// Error returned by every remote call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Request never produced a response
    #[error("Network error: {0}")]
    Transport(String),

    /// Non-2xx response
    #[error("{detail} (HTTP {status})")]
    Server { status: u16, detail: String },

    /// 2xx body that does not match the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Rejected before any network call
    #[error("{0}")]
    Invalid(String),
}

#[derive(Deserialize)]
struct DetailBody {
    detail: serde_json::Value,
}

impl ApiError {
    /// Build a `Server` error from a failed response, preferring the
    /// `{"detail": ...}` message the backend sends.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let detail = match serde_json::from_slice::<DetailBody>(body) {
            Ok(DetailBody {
                detail: serde_json::Value::String(text),
            }) => text,
            Ok(DetailBody { detail }) if !detail.is_null() => detail.to_string(),
            _ => {
                let text = String::from_utf8_lossy(body).trim().to_string();
                if text.is_empty() {
                    "Request failed".to_string()
                } else {
                    text
                }
            }
        };
        ApiError::Server { status, detail }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Server { status: 401, .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_string_is_used() {
        let err = ApiError::from_response(404, br#"{"detail":"Recipe not found"}"#);
        assert_eq!(
            err,
            ApiError::Server {
                status: 404,
                detail: "Recipe not found".into()
            }
        );
        assert_eq!(err.to_string(), "Recipe not found (HTTP 404)");
    }

    #[test]
    fn test_structured_detail_is_kept_as_json() {
        let err = ApiError::from_response(422, br#"{"detail":[{"loc":["body","change"]}]}"#);
        let ApiError::Server { detail, .. } = err else {
            panic!("expected server error");
        };
        assert!(detail.contains("change"));
    }

    #[test]
    fn test_plain_and_empty_bodies() {
        assert_eq!(
            ApiError::from_response(500, b"Internal Server Error"),
            ApiError::Server {
                status: 500,
                detail: "Internal Server Error".into()
            }
        );
        assert_eq!(
            ApiError::from_response(502, b""),
            ApiError::Server {
                status: 502,
                detail: "Request failed".into()
            }
        );
    }

    #[test]
    fn test_unauthorized() {
        assert!(ApiError::from_response(401, b"").is_unauthorized());
        assert!(!ApiError::Transport("offline".into()).is_unauthorized());
    }
}
