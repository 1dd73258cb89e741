//! UI Primitives
//!
//! Loading and error states shared by every panel.

use std::rc::Rc;

use leptos::prelude::*;
use query_cache::QueryState;

use crate::resource::Query;

/// Loading spinner with optional message
#[component]
pub fn LoadingSpinner(#[prop(optional)] message: Option<&'static str>) -> impl IntoView {
    view! {
        <div class="loading-spinner" role="status" aria-live="polite">
            <span class="spinner" aria-hidden="true"></span>
            {message.map(|msg| view! { <span class="loading-message">{msg}</span> })}
        </div>
    }
}

/// Plain inline error message
#[component]
pub fn InlineError(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <p class="inline-error" role="alert">{message}</p>
    }
}

/// Pending shows a spinner, failed an inline error, settled the panel body.
pub fn query_view<T, V>(
    state: RwSignal<Query<T>, LocalStorage>,
    loading: &'static str,
    settled: impl Fn(Rc<T>) -> V + Send + Sync + 'static,
) -> impl IntoView
where
    T: 'static,
    V: IntoView + 'static,
{
    move || match state.get() {
        QueryState::Pending => view! { <LoadingSpinner message=loading /> }.into_any(),
        QueryState::Failed(err) => view! { <InlineError message=err.to_string() /> }.into_any(),
        QueryState::Settled(data) => settled(data).into_any(),
    }
}
