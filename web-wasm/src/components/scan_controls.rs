//! スキャンボタンと重量入力

use ecoscan_common::View;
use leptos::prelude::*;

#[component]
pub fn ScanControls<FS, FW>(state: Memo<View>, on_scan: FS, on_weight: FW) -> impl IntoView
where
    FS: Fn(()) + 'static + Clone + Send + Sync,
    FW: Fn(String) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="scan-controls">
            <div class="form-group">
                <label for="weight">"Weight (kg)"</label>
                <input
                    type="number"
                    id="weight"
                    min="0"
                    step="0.1"
                    value="1"
                    on:input=move |ev| on_weight(event_target_value(&ev))
                />
            </div>

            <button
                class="btn btn-primary"
                disabled=move || !state.get().scan_enabled
                on:click={
                    let on_scan = on_scan.clone();
                    move |_| on_scan(())
                }
            >
                {move || if state.get().loading { "Scanning..." } else { "Scan Material" }}
            </button>

            <Show when=move || state.get().loading>
                <span class="loading">"Analyzing image..."</span>
            </Show>
        </div>
    }
}
