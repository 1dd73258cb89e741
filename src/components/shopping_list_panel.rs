//! Shopping List Panel Component
//!
//! Add, check off and delete shopping list items. Every write refetches the list.

use leptos::prelude::*;

use super::primitives::{query_view, InlineError};
use super::DeleteConfirmButton;
use crate::models::ShoppingItem;
use crate::panels::recipes::format_quantity;
use crate::panels::shopping::{toggle_request, FormError, ShoppingForm};
use crate::queries::{self, SHOPPING_LIST};
use crate::resource::{use_mutation, use_query};

#[component]
pub fn ShoppingListPanel() -> impl IntoView {
    let items = use_query(SHOPPING_LIST, queries::load_shopping_list);
    let add = use_mutation(queries::add_shopping_item);
    let toggle = use_mutation(queries::toggle_shopping_item);
    let delete = use_mutation(queries::delete_shopping_item);

    let form = RwSignal::new(ShoppingForm::default());
    let form_error = RwSignal::new(None::<FormError>);

    let add_item = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let item = match form.with(ShoppingForm::validate) {
            Ok(item) => item,
            Err(err) => {
                form_error.set(Some(err));
                return;
            }
        };
        form_error.set(None);
        add.dispatch(item, move |result| form.update(|f| f.after_create(&result)));
    };

    view! {
        <section class="panel shopping-panel">
            <h2>"Shopping List"</h2>
            <form class="shopping-form" on:submit=add_item>
                <input
                    type="text"
                    placeholder="Item name"
                    prop:value=move || form.with(|f| f.name.clone())
                    on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                />
                <input
                    type="text"
                    inputmode="decimal"
                    placeholder="Quantity"
                    prop:value=move || form.with(|f| f.quantity.clone())
                    on:input=move |ev| form.update(|f| f.quantity = event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Unit"
                    prop:value=move || form.with(|f| f.unit.clone())
                    on:input=move |ev| form.update(|f| f.unit = event_target_value(&ev))
                />
                <button type="submit" disabled=move || add.pending()>
                    {move || if add.pending() { "Adding..." } else { "Add" }}
                </button>
            </form>
            {move || form_error.get().map(|err| view! { <InlineError message=err.to_string() /> })}
            {move || add.error().map(|err| view! { <InlineError message=err.to_string() /> })}

            {query_view(items, "Loading shopping list...", move |list| {
                let list = list.as_ref().clone();
                if list.is_empty() {
                    return view! { <p class="empty-state">"Your shopping list is empty"</p> }.into_any();
                }
                view! {
                    <ul class="shopping-list">
                        {list
                            .into_iter()
                            .map(|item| view! {
                                <ShoppingRow
                                    item=item
                                    on_toggle=Callback::new(move |item: ShoppingItem| toggle.fire(toggle_request(&item)))
                                    on_delete=Callback::new(move |id: String| delete.fire(id))
                                    busy=Signal::derive(move || toggle.pending() || delete.pending())
                                />
                            })
                            .collect_view()}
                    </ul>
                }
                .into_any()
            })}
            {move || toggle.error().or_else(|| delete.error()).map(|err| view! { <InlineError message=err.to_string() /> })}
        </section>
    }
}

#[component]
fn ShoppingRow(
    item: ShoppingItem,
    #[prop(into)] on_toggle: Callback<ShoppingItem>,
    #[prop(into)] on_delete: Callback<String>,
    /// A toggle or delete is still in flight
    #[prop(into)]
    busy: Signal<bool>,
) -> impl IntoView {
    let id = item.id.clone();
    let completed = item.completed;
    let summary = format!("{} {}", format_quantity(item.quantity), item.unit);
    let name = item.name.clone();

    view! {
        <li class="shopping-row" class:completed=completed>
            <label class="shopping-check">
                <input
                    type="checkbox"
                    prop:checked=completed
                    disabled=move || busy.get()
                    on:click=move |ev| {
                        // The box flips once the refetched list says so
                        ev.prevent_default();
                        on_toggle.run(item.clone());
                    }
                />
                <span class="shopping-name">{name}</span>
                <span class="shopping-meta">{summary}</span>
            </label>
            <DeleteConfirmButton
                button_class="delete-btn"
                disabled=busy
                on_confirm=Callback::new(move |_| on_delete.run(id.clone()))
            />
        </li>
    }
}
