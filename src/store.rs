//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::auth::AuthState;
use crate::config::DashboardConfig;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Session as seen by the auth gate
    pub auth: AuthState,
    /// Server version shown in the footer
    pub version: Option<String>,
    pub api_url: String,
}

impl AppState {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            auth: AuthState::Authenticating,
            version: config.version.clone(),
            api_url: config.api_url.clone(),
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Replace the session state
pub fn store_set_auth(store: &AppStore, auth: AuthState) {
    *store.auth().write() = auth;
}
