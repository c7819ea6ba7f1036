//! エラーバナーコンポーネント

use ecoscan_common::View;
use leptos::prelude::*;

#[component]
pub fn ErrorBanner(state: Memo<View>) -> impl IntoView {
    view! {
        {move || state.get().error.map(|message| view! {
            <div class="error-banner" role="alert">{message}</div>
        })}
    }
}
