//! Nutrition Panel Component
//!
//! Daily intake chart with deficiency warnings and recommendations.

use leptos::prelude::*;

use super::primitives::query_view;
use crate::panels::nutrition::{AlertKind, NutritionReport};
use crate::queries::{self, NUTRITION};
use crate::resource::use_query;

#[component]
pub fn NutritionPanel() -> impl IntoView {
    let nutrition = use_query(NUTRITION, queries::load_nutrition);

    view! {
        <section class="panel nutrition-panel">
            <h2>"Nutrition Analysis"</h2>
            {query_view(nutrition, "Analyzing nutrition...", |snapshot| {
                let report = NutritionReport::project(&snapshot);
                if report.is_empty() {
                    return view! { <p class="empty-state">"No nutrition data yet"</p> }.into_any();
                }
                let alerts = report.alerts();
                let bars = report.bars;
                view! {
                    <div class="nutrition-chart" role="img" aria-label="Percentage of daily recommended value">
                        {bars
                            .into_iter()
                            .map(|bar| {
                                let label = bar.label();
                                view! {
                                    <div class="nutrition-bar">
                                        <span class="bar-value">{label}</span>
                                        <div class="bar-track">
                                            <div
                                                class="bar-fill"
                                                class:over={bar.percentage > 100.0}
                                                style:height=format!("{:.1}%", bar.height)
                                            ></div>
                                        </div>
                                        <span class="bar-name">{bar.nutrient}</span>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                    <div class="nutrition-alerts">
                        {alerts
                            .into_iter()
                            .map(|(kind, text)| {
                                let role = (kind == AlertKind::Warning).then_some("alert");
                                view! { <div class=kind.class() role=role>{text}</div> }
                            })
                            .collect_view()}
                    </div>
                }
                .into_any()
            })}
        </section>
    }
}
