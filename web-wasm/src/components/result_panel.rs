//! 結果表示コンポーネント
//!
//! 素材名・確信度・推定価格・リサイクルのヒントを表示する。
//! 分類に成功するまでは案内文を出す。

use crate::components::confidence_bar::ConfidenceBar;
use ecoscan_common::{Presentation, View};
use leptos::prelude::*;

#[component]
pub fn ResultPanel(state: Memo<View>) -> impl IntoView {
    let result = Memo::new(move |_| state.get().result);

    view! {
        <section class="result-panel">
            <h2>"Scan Result"</h2>
            {move || match result.get() {
                Some(presentation) => view! { <ResultDetails presentation=presentation /> }.into_any(),
                None => view! { <p class="text-muted">"Select an image"</p> }.into_any(),
            }}
        </section>
    }
}

#[component]
fn ResultDetails(presentation: Presentation) -> impl IntoView {
    let Presentation {
        label,
        confidence_percent,
        bar_width,
        unit_price,
        weight,
        value_text,
        tip,
        advice,
        alternatives,
        ..
    } = presentation;

    view! {
        <div class="result-details">
            <h3 class="predicted-material">{label}</h3>
            <ConfidenceBar percent=confidence_percent bar_width=bar_width />

            <p class="estimated-value">
                <strong>{value_text}</strong>
                <span class="text-muted">{format!(" ({:.2} kg × {:.2} Birr/kg)", weight, unit_price)}</span>
            </p>

            <p class="recycling-tip">{tip}</p>

            {advice.map(|advice| view! { <p class="advice text-muted">{advice}</p> })}

            {(!alternatives.is_empty()).then(|| view! {
                <ul class="alternatives">
                    {alternatives
                        .into_iter()
                        .map(|alt| view! {
                            <li>{format!("{}: {}%", alt.label, alt.confidence_percent)}</li>
                        })
                        .collect_view()}
                </ul>
            })}
        </div>
    }
}
