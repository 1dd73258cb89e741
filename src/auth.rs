//! Auth Gate
//!
//! Session state for the dashboard shell. The bearer token lives in browser
//! local storage; the profile is re-read from `/auth/me` on every start.

use thiserror::Error;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::UserProfile;
use crate::queries::Cache;

pub const TOKEN_KEY: &str = "pantry.token";

#[derive(Debug, Clone, Default, PartialEq)]
pub enum AuthState {
    /// Stored token is being checked
    #[default]
    Authenticating,
    SignedOut {
        error: Option<String>,
    },
    SignedIn(UserProfile),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    #[error("Please enter your email and password")]
    MissingCredentials,

    #[error("Invalid email or password")]
    Rejected,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Where the bearer token is kept between visits
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageTokens;

impl LocalStorageTokens {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl TokenStore for LocalStorageTokens {
    fn load(&self) -> Option<String> {
        Self::storage()?
            .get_item(TOKEN_KEY)
            .ok()
            .flatten()
            .filter(|token| !token.is_empty())
    }

    fn save(&self, token: &str) {
        let saved = Self::storage().map(|storage| storage.set_item(TOKEN_KEY, token).is_ok());
        if saved != Some(true) {
            warn!("could not persist session token");
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(TOKEN_KEY);
        }
    }
}

/// Check a stored token and resolve the initial session state
pub async fn restore(client: &ApiClient, tokens: &dyn TokenStore) -> AuthState {
    let Some(token) = tokens.load() else {
        return AuthState::SignedOut { error: None };
    };
    client.set_token(Some(token));

    match client.current_user().await {
        Ok(user) => {
            info!(uid = %user.uid, "session restored");
            AuthState::SignedIn(user)
        }
        Err(err) if err.is_unauthorized() => {
            info!("stored session expired");
            tokens.clear();
            client.set_token(None);
            AuthState::SignedOut { error: None }
        }
        Err(err) => {
            warn!(error = %err, "could not restore session");
            client.set_token(None);
            AuthState::SignedOut {
                error: Some(err.to_string()),
            }
        }
    }
}

pub async fn sign_in(
    client: &ApiClient,
    tokens: &dyn TokenStore,
    email: &str,
    password: &str,
) -> Result<UserProfile, AuthError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }

    let token = client.login(email, password).await.map_err(|err| match err {
        ApiError::Server {
            status: 400 | 401 | 403,
            ..
        } => AuthError::Rejected,
        other => AuthError::Api(other),
    })?;

    client.set_token(Some(token.clone()));
    match client.current_user().await {
        Ok(user) => {
            tokens.save(&token);
            info!(uid = %user.uid, "signed in");
            Ok(user)
        }
        Err(err) => {
            client.set_token(None);
            Err(err.into())
        }
    }
}

/// Forget the token and every cached read
pub fn sign_out(client: &ApiClient, cache: &Cache, tokens: &dyn TokenStore) {
    tokens.clear();
    client.set_token(None);
    cache.clear();
    info!("signed out");
}
