//! Recipe Panel Component
//!
//! Suggested recipes with server-side servings adjustment and a detail view.

use leptos::prelude::*;

use super::primitives::{query_view, InlineError};
use crate::models::Recipe;
use crate::panels::recipes::{adjust_request, apply_adjusted, ingredient_line, ServingsStep};
use crate::queries::{self, RECIPES};
use crate::resource::{use_mutation, use_query};

#[component]
pub fn RecipePanel() -> impl IntoView {
    let recipes = use_query(RECIPES, queries::load_recipes);
    let adjust = use_mutation(queries::adjust_servings);
    let selected = RwSignal::new(None::<Recipe>);

    let adjust_servings = move |recipe: Recipe, step: ServingsStep| {
        let Some(request) = adjust_request(&recipe, step) else {
            return;
        };
        adjust.dispatch(request, move |result| selected.update(|sel| apply_adjusted(sel, result)));
    };

    view! {
        <section class="panel recipe-panel">
            <h2>"Suggested Recipes"</h2>
            {query_view(recipes, "Loading recipes...", move |list| {
                let list = list.as_ref().clone();
                if list.is_empty() {
                    return view! { <p class="empty-state">"No suggestions yet"</p> }.into_any();
                }
                view! {
                    <div class="recipe-grid">
                        {list
                            .into_iter()
                            .map(|recipe| view! {
                                <RecipeCard
                                    recipe=recipe
                                    on_select=Callback::new(move |recipe| selected.set(Some(recipe)))
                                    on_adjust=Callback::new(move |(recipe, step): (Recipe, ServingsStep)| adjust_servings(recipe, step))
                                    busy=Signal::derive(move || adjust.pending())
                                />
                            })
                            .collect_view()}
                    </div>
                }
                .into_any()
            })}
            {move || adjust.error().map(|err| view! { <InlineError message=err.to_string() /> })}
            {move || selected.get().map(|recipe| view! {
                <RecipeDetail recipe=recipe on_close=Callback::new(move |_| selected.set(None)) />
            })}
        </section>
    }
}

#[component]
fn RecipeCard(
    recipe: Recipe,
    #[prop(into)] on_select: Callback<Recipe>,
    #[prop(into)] on_adjust: Callback<(Recipe, ServingsStep)>,
    #[prop(into)] busy: Signal<bool>,
) -> impl IntoView {
    let can_decrease = recipe.servings > 1;
    let for_select = recipe.clone();
    let for_increase = recipe.clone();
    let for_decrease = recipe.clone();

    view! {
        <article class="recipe-card">
            <h3>{recipe.name.clone()}</h3>
            <p class="recipe-meta">{format!("Cooking time: {} minutes", recipe.cooking_time)}</p>
            <p class="recipe-meta">{format!("Servings: {}", recipe.servings)}</p>
            <p class="recipe-meta">{format!("Calories: {:.0} kcal", recipe.nutrition_info.calories)}</p>
            <div class="recipe-actions">
                <button class="btn-small" on:click=move |_| on_select.run(for_select.clone())>
                    "View details"
                </button>
                <button
                    class="btn-small"
                    disabled=move || busy.get()
                    on:click=move |_| on_adjust.run((for_increase.clone(), ServingsStep::Increase))
                >
                    "Increase servings"
                </button>
                {can_decrease.then(|| view! {
                    <button
                        class="btn-small"
                        disabled=move || busy.get()
                        on:click=move |_| on_adjust.run((for_decrease.clone(), ServingsStep::Decrease))
                    >
                        "Decrease servings"
                    </button>
                })}
            </div>
        </article>
    }
}

#[component]
fn RecipeDetail(recipe: Recipe, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    view! {
        <div class="recipe-detail">
            <div class="recipe-detail-header">
                <h3>{format!("{} - Details", recipe.name)}</h3>
                <button class="close-btn" aria-label="Close" on:click=move |_| on_close.run(())>"×"</button>
            </div>
            <p class="recipe-meta">
                {format!("{} servings · {} minutes", recipe.servings, recipe.cooking_time)}
            </p>
            <h4>"Ingredients"</h4>
            <ul>
                {recipe
                    .ingredients
                    .iter()
                    .map(|ingredient| view! { <li>{ingredient_line(ingredient)}</li> })
                    .collect_view()}
            </ul>
            <h4>"Instructions"</h4>
            <ol>
                {recipe
                    .instructions
                    .iter()
                    .map(|step| view! { <li>{step.clone()}</li> })
                    .collect_view()}
            </ol>
        </div>
    }
}
