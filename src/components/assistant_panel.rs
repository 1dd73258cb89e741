//! Assistant Panel Component
//!
//! Preset and free-text questions for the food assistant. Only the answer to
//! the newest question is shown.

use leptos::prelude::*;

use crate::api::{AnalysisKind, AssistantPrompt, BreakfastKind, DinnerKind, ShoppingAdviceKind, SnackKind};
use crate::markdown::render_markdown;
use crate::panels::assistant::{AssistantView, RequestSequence};
use crate::queries;
use crate::resource::use_mutation;

#[component]
pub fn AssistantPanel() -> impl IntoView {
    let assistant = use_mutation(queries::ask_assistant);
    let sequence = RwSignal::new(RequestSequence::default());
    let answer = RwSignal::new(AssistantView::Idle);
    let (question, set_question) = signal(String::new());

    let ask = Callback::new(move |prompt: AssistantPrompt| {
        let Some(request) = sequence.try_update(RequestSequence::begin) else {
            return;
        };
        answer.set(AssistantView::Waiting);
        assistant.dispatch(prompt, move |result| {
            if let Some(next) = sequence.with_untracked(|seq| AssistantView::settle(seq, request, result)) {
                answer.set(next);
            }
        });
    });

    let ask_custom = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        ask.run(AssistantPrompt::Custom(question.get_untracked()));
    };

    view! {
        <section class="panel assistant-panel">
            <h2>"Kitchen Assistant"</h2>
            <div class="assistant-sections">
                {prompt_section("Breakfast", BreakfastKind::ALL, BreakfastKind::label, AssistantPrompt::Breakfast, ask)}
                {prompt_section("Dinner", DinnerKind::ALL, DinnerKind::label, AssistantPrompt::Dinner, ask)}
                {prompt_section("Snacks", SnackKind::ALL, SnackKind::label, AssistantPrompt::Snack, ask)}
                {prompt_section("Nutrition", AnalysisKind::ALL, AnalysisKind::label, AssistantPrompt::Analysis, ask)}
                {prompt_section("Shopping", ShoppingAdviceKind::ALL, ShoppingAdviceKind::label, AssistantPrompt::Shopping, ask)}
            </div>
            <form class="assistant-question" on:submit=ask_custom>
                <input
                    type="text"
                    placeholder="Ask anything about your pantry..."
                    prop:value=move || question.get()
                    on:input=move |ev| set_question.set(event_target_value(&ev))
                />
                <button type="submit">"Ask"</button>
            </form>
            <div class="assistant-result" aria-live="polite">
                {move || match answer.get() {
                    AssistantView::Idle => ().into_any(),
                    AssistantView::Waiting => view! {
                        <p class="assistant-waiting">"Thinking..."</p>
                    }
                    .into_any(),
                    AssistantView::Answer(text) => view! {
                        <div class="assistant-answer markdown-body" inner_html=render_markdown(&text)></div>
                    }
                    .into_any(),
                    AssistantView::Failed(message) => view! {
                        <p class="inline-error" role="alert">{message}</p>
                    }
                    .into_any(),
                }}
            </div>
        </section>
    }
}

fn prompt_section<K>(
    title: &'static str,
    kinds: &'static [K],
    label: fn(K) -> &'static str,
    prompt: fn(K) -> AssistantPrompt,
    ask: Callback<AssistantPrompt>,
) -> impl IntoView
where
    K: Copy + Send + Sync + 'static,
{
    view! {
        <div class="assistant-section">
            <h3>{title}</h3>
            <div class="assistant-buttons">
                {kinds
                    .iter()
                    .map(|&kind| view! {
                        <button class="btn-small" on:click=move |_| ask.run(prompt(kind))>
                            {label(kind)}
                        </button>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
