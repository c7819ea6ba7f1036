//! メインアプリケーションコンポーネント
//!
//! 状態は `Controller` ひとつに集約し、表示は `Controller::render` の結果から導出する。
//! イベントハンドラは状態の更新だけを行う。

use crate::api::FetchTransport;
use crate::components::{
    error_banner::ErrorBanner, header::Header, result_panel::ResultPanel,
    scan_controls::ScanControls, upload_area::UploadArea,
};
use crate::config;
use ecoscan_common::{CandidateFile, ClassificationClient, Controller, ReferenceData};
use gloo::file::futures::read_as_bytes;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;

fn load_reference() -> ReferenceData {
    match ReferenceData::builtin() {
        Ok(reference) => reference,
        Err(e) => {
            gloo::console::error!(format!("failed to load reference data: {}", e));
            ReferenceData::default()
        }
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let reference = StoredValue::new(load_reference());
    let controller = RwSignal::new(Controller::new());
    let client = Arc::new(ClassificationClient::new(
        FetchTransport::new(config::TIMEOUT_SECS),
        config::api_url(),
    ));

    let state = Memo::new(move |_| controller.with(|c| reference.with_value(|r| c.render(r))));

    // ファイル選択ハンドラ（ピッカー/ドロップ共通）
    let on_file = move |file: web_sys::File| {
        let name = file.name();
        let content_type = file.type_();

        let Some(Ok(ticket)) = controller.try_update(|c| c.begin_selection(&content_type)) else {
            return;
        };

        spawn_local(async move {
            let file = gloo::file::File::from(file);
            match read_as_bytes(&file).await {
                Ok(bytes) => {
                    let candidate = CandidateFile::new(name, content_type, bytes);
                    controller.update(|c| match c.finish_selection(ticket, candidate) {
                        Ok(true) => {}
                        Ok(false) => gloo::console::debug!("stale file read discarded"),
                        Err(e) => gloo::console::warn!(format!("selection rejected: {}", e)),
                    });
                }
                Err(e) => {
                    gloo::console::error!(format!("failed to read {}: {}", name, e));
                    controller.update(|c| {
                        c.abandon_selection(ticket);
                    });
                }
            }
        });
    };

    // スキャン開始ハンドラ
    let on_scan = {
        let client = client.clone();
        move |_: ()| {
            let Some(ticket) = controller.try_update(|c| c.begin_scan()).flatten() else {
                return;
            };

            let client = client.clone();
            spawn_local(async move {
                let outcome = client.classify(ticket.file()).await;
                if let Err(e) = &outcome {
                    gloo::console::warn!(format!("classification failed: {}", e));
                }
                controller.update(|c| {
                    if !c.finish_scan(ticket, outcome) {
                        gloo::console::debug!("stale scan result discarded");
                    }
                });
            });
        }
    };

    // 重量入力ハンドラ
    let on_weight = move |raw: String| {
        controller.update(|c| c.set_weight(&raw));
    };

    view! {
        <div class="container">
            <Header />

            <UploadArea state=state on_file=on_file />

            <ErrorBanner state=state />

            <ScanControls state=state on_scan=on_scan on_weight=on_weight />

            <ResultPanel state=state />
        </div>
    }
}
