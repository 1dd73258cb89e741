//! Title Bar Component
//!
//! Dashboard header with the greeting and sign out, and the status footer.

use leptos::prelude::*;
use rolling_logger::RollingBuffer;

use crate::store::{use_app_store, AppStateStoreFields};

/// Header shown above the panels
#[component]
pub fn TitleBar(#[prop(into)] greeting: String, #[prop(into)] on_sign_out: Callback<()>) -> impl IntoView {
    view! {
        <header class="dashboard-header">
            <div class="header-brand">
                <span class="header-title">"Pantry Dashboard"</span>
                <span class="header-greeting">{greeting}</span>
            </div>
            <button class="sign-out-btn" on:click=move |_| on_sign_out.run(())>
                "Sign out"
            </button>
        </header>
    }
}

/// API location, server version and the recent activity log
#[component]
pub fn StatusFooter() -> impl IntoView {
    let store = use_app_store();
    let logs = use_context::<RollingBuffer>();
    let (show_logs, set_show_logs) = signal(false);

    view! {
        <footer class="dashboard-footer">
            <span class="footer-api">{move || store.api_url().get()}</span>
            {move || store.version().get().map(|version| view! {
                <span class="footer-version">{format!("v{}", version)}</span>
            })}
            {logs.map(|logs| view! {
                <button class="footer-logs-btn" on:click=move |_| set_show_logs.update(|open| *open = !*open)>
                    "Activity"
                </button>
                <Show when=move || show_logs.get()>
                    // Snapshot taken each time the log is opened
                    <pre class="footer-logs">
                        {logs
                            .records()
                            .iter()
                            .rev()
                            .map(|record| format!("{record}\n"))
                            .collect::<String>()}
                    </pre>
                </Show>
            })}
        </footer>
    }
}
