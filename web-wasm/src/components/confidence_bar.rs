//! 確信度バーコンポーネント

use leptos::prelude::*;

#[component]
pub fn ConfidenceBar(percent: u8, bar_width: String) -> impl IntoView {
    view! {
        <div class="confidence-container">
            <div class="confidence-bar">
                <div class="confidence-fill" style=format!("width: {}", bar_width) />
            </div>
            <p class="confidence-text">{format!("{}%", percent)}</p>
        </div>
    }
}
