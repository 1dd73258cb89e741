//! Sign In Form Component
//!
//! Email and password form shown while no session is active.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::{self, AuthState, LocalStorageTokens};
use crate::context::use_app_context;
use crate::store::{store_set_auth, use_app_store};

#[component]
pub fn SignInForm(
    /// Message left by a failed session restore
    notice: Option<String>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal(notice);
    let (busy, set_busy) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let email = email.get_untracked();
        let password = password.get_untracked();
        let client = ctx.client();
        set_busy.set(true);
        set_error.set(None);

        spawn_local(async move {
            let result = auth::sign_in(&client, &LocalStorageTokens, &email, &password).await;
            set_busy.set(false);
            match result {
                Ok(user) => {
                    set_password.set(String::new());
                    store_set_auth(&store, AuthState::SignedIn(user));
                }
                Err(err) => set_error.set(Some(err.to_string())),
            }
        });
    };

    view! {
        <div class="sign-in">
            <form class="sign-in-form" on:submit=submit>
                <h1>"Pantry Dashboard"</h1>
                <label>
                    "Email"
                    <input
                        type="email"
                        autocomplete="username"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Password"
                    <input
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </label>
                {move || error.get().map(|message| view! { <p class="inline-error" role="alert">{message}</p> })}
                <button type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}
