//! Pantry Dashboard Frontend Entry Point

mod api;
mod app;
mod auth;
mod components;
mod config;
mod context;
mod error;
mod markdown;
mod models;
mod panels;
mod queries;
mod resource;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let logs = rolling_logger::init(tracing::Level::DEBUG, 200);
    mount_to_body(move || view! { <App logs=logs /> });
}
