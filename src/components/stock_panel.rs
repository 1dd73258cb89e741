//! Stock Panel Component
//!
//! Pantry items with optimistic quantity buttons.

use leptos::prelude::*;
use query_cache::QueryState;
use tracing::debug;

use super::primitives::{query_view, InlineError};
use crate::models::StockItem;
use crate::panels::stock::StockLedger;
use crate::queries::{self, STOCK};
use crate::resource::{use_mutation, use_query};

#[component]
pub fn StockPanel() -> impl IntoView {
    let stock = use_query(STOCK, queries::load_stock);
    let adjust = use_mutation(queries::adjust_stock);
    let ledger = RwSignal::new(StockLedger::default());

    // Every settled snapshot replaces the ledger base
    Effect::new(move |_| {
        if let QueryState::Settled(items) = stock.get() {
            let items = items.as_ref().clone();
            debug!(items = items.len(), "stock snapshot");
            ledger.update(|ledger| ledger.rebase(items));
        }
    });

    let change_quantity = move |id: String, delta: i32| {
        let Some((token, change)) = ledger.try_update(|ledger| ledger.apply(&id, delta)).flatten() else {
            return;
        };
        adjust.dispatch((id, change), move |result| {
            ledger.update(|ledger| match result {
                Ok(()) => ledger.confirm(token),
                Err(_) => {
                    ledger.rollback(token);
                }
            });
        });
    };

    view! {
        <section class="panel stock-panel">
            <h2>"Pantry Stock"</h2>
            {query_view(stock, "Loading stock...", move |_| view! {
                <Show
                    when=move || ledger.with(|ledger| !ledger.rows().is_empty())
                    fallback=|| view! { <p class="empty-state">"Your pantry is empty"</p> }
                >
                    <ul class="stock-list">
                        <For
                            each=move || ledger.with(StockLedger::rows)
                            key=|item: &StockItem| (item.id.clone(), item.quantity)
                            children=move |item: StockItem| {
                                let pending_id = item.id.clone();
                                let inc_id = item.id.clone();
                                let dec_id = item.id.clone();
                                view! {
                                    <li
                                        class="stock-row"
                                        class:pending=move || ledger.with(|ledger| ledger.is_pending(&pending_id))
                                    >
                                        <div class="stock-info">
                                            <span class="stock-name">{item.name.clone()}</span>
                                            <span class="stock-meta">
                                                {format!("{} {}", item.quantity, item.unit)}
                                                {(!item.category.is_empty()).then(|| format!(" · {}", item.category))}
                                            </span>
                                            {item.expiry_date.map(|date| view! {
                                                <span class="stock-expiry">{format!("Expires {}", date.format("%Y-%m-%d"))}</span>
                                            })}
                                        </div>
                                        <div class="stock-actions">
                                            <button
                                                class="qty-btn"
                                                aria-label="Decrease quantity"
                                                disabled={item.quantity == 0}
                                                on:click=move |_| change_quantity(dec_id.clone(), -1)
                                            >
                                                "−"
                                            </button>
                                            <button
                                                class="qty-btn"
                                                aria-label="Increase quantity"
                                                on:click=move |_| change_quantity(inc_id.clone(), 1)
                                            >
                                                "+"
                                            </button>
                                        </div>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </Show>
            })}
            {move || adjust.error().map(|err| view! { <InlineError message=err.to_string() /> })}
        </section>
    }
}
