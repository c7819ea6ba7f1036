//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"EcoScan"</h1>
            <p class="text-muted">"Snap a photo of your waste to see what it is worth and how to recycle it"</p>
        </header>
    }
}
