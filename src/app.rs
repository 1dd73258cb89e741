//! Pantry Dashboard App
//!
//! Root component: wires config, client and cache into context and gates the
//! panels behind the session state.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use rolling_logger::RollingBuffer;
use tracing::info;

use crate::api::ApiClient;
use crate::auth::{self, AuthState, LocalStorageTokens};
use crate::components::{
    AssistantPanel, LoadingSpinner, NutritionPanel, RecipePanel, ShoppingListPanel, SignInForm, StatusFooter,
    StockPanel, TitleBar,
};
use crate::config::DashboardConfig;
use crate::context::AppContext;
use crate::queries::Cache;
use crate::store::{store_set_auth, AppState, AppStateStoreFields};

/// What the shell renders for a session state
#[derive(Debug, Clone, PartialEq)]
pub enum ShellView {
    Loading,
    SignIn { error: Option<String> },
    Dashboard { greeting: String },
}

impl ShellView {
    pub fn from_auth(auth: &AuthState) -> Self {
        match auth {
            AuthState::Authenticating => ShellView::Loading,
            AuthState::SignedOut { error } => ShellView::SignIn { error: error.clone() },
            AuthState::SignedIn(user) => ShellView::Dashboard {
                greeting: format!("Welcome back, {}!", user.greeting_name()),
            },
        }
    }
}

#[component]
pub fn App(
    /// Recent log records, shown from the footer
    #[prop(optional)]
    logs: Option<RollingBuffer>,
) -> impl IntoView {
    let config = DashboardConfig::load();
    info!(api_url = %config.api_url(), version = ?config.version, "dashboard starting");

    let ctx = AppContext::new(ApiClient::from_config(&config), Cache::new());
    let store = Store::new(AppState::new(&config));
    provide_context(ctx);
    provide_context(store);
    if let Some(logs) = logs {
        provide_context(logs);
    }

    // Resolve the stored session once
    spawn_local(async move {
        let client = ctx.client();
        let auth = auth::restore(&client, &LocalStorageTokens).await;
        store_set_auth(&store, auth);
    });

    let sign_out = Callback::new(move |_| {
        auth::sign_out(&ctx.client(), &ctx.cache(), &LocalStorageTokens);
        store_set_auth(&store, AuthState::SignedOut { error: None });
    });

    let shell = Memo::new(move |_| store.auth().with(ShellView::from_auth));

    view! {
        <div class="app-layout">
            {move || match shell.get() {
                ShellView::Loading => view! {
                    <LoadingSpinner message="Checking your session..." />
                }
                .into_any(),
                ShellView::SignIn { error } => view! {
                    <SignInForm notice=error />
                }
                .into_any(),
                ShellView::Dashboard { greeting } => view! {
                    <TitleBar greeting=greeting on_sign_out=sign_out />
                    <main class="dashboard-grid">
                        <StockPanel />
                        <RecipePanel />
                        <NutritionPanel />
                        <ShoppingListPanel />
                        <AssistantPanel />
                    </main>
                }
                .into_any(),
            }}
            <StatusFooter />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserProfile;

    fn user(display_name: Option<&str>, email: Option<&str>) -> UserProfile {
        UserProfile {
            uid: "u1".into(),
            email: email.map(String::from),
            display_name: display_name.map(String::from),
        }
    }

    #[test]
    fn test_shell_states() {
        assert_eq!(ShellView::from_auth(&AuthState::Authenticating), ShellView::Loading);
        assert_eq!(
            ShellView::from_auth(&AuthState::SignedOut {
                error: Some("Network error: offline".into())
            }),
            ShellView::SignIn {
                error: Some("Network error: offline".into())
            }
        );
    }

    #[test]
    fn test_greeting_fallbacks() {
        let greeting = |profile| match ShellView::from_auth(&AuthState::SignedIn(profile)) {
            ShellView::Dashboard { greeting } => greeting,
            other => panic!("unexpected {other:?}"),
        };

        assert_eq!(greeting(user(Some("Ada"), Some("ada@example.com"))), "Welcome back, Ada!");
        assert_eq!(greeting(user(None, Some("ada@example.com"))), "Welcome back, ada@example.com!");
        assert_eq!(greeting(user(None, None)), "Welcome back, User!");
    }
}
