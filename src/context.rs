//! Application Context
//!
//! Shared client and cache provided via Leptos Context API.

use leptos::prelude::*;

use crate::api::ApiClient;
use crate::queries::Cache;

/// App-wide services provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// HTTP client, shared bearer token included
    client: StoredValue<ApiClient, LocalStorage>,
    /// Process-wide cache of remote reads
    cache: StoredValue<Cache, LocalStorage>,
}

impl AppContext {
    pub fn new(client: ApiClient, cache: Cache) -> Self {
        Self {
            client: StoredValue::new_local(client),
            cache: StoredValue::new_local(cache),
        }
    }

    pub fn client(&self) -> ApiClient {
        self.client.get_value()
    }

    pub fn cache(&self) -> Cache {
        self.cache.get_value()
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
