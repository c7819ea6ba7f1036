//! 分類サービスとの通信（fetch）
//!
//! 画像は FormData の `file` フィールドで送る。
//! タイムアウトは gloo のタイマーと競争させて判定する。

use ecoscan_common::{HttpReply, SelectedFile, Transport, TransportFailure, UPLOAD_FIELD};
use futures::future::{select, Either};
use gloo::timers::future::TimeoutFuture;
use js_sys::{Array, Uint8Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Request, RequestInit, RequestMode, Response};

/// fetch API によるTransport
#[derive(Debug, Clone, Copy)]
pub struct FetchTransport {
    timeout_ms: u32,
}

impl FetchTransport {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            timeout_ms: timeout_millis(timeout_secs),
        }
    }

    /// リクエスト送信からボディ読み込みまでをタイムアウト付きで行う
    async fn send(&self, request: Request) -> Result<HttpReply, TransportFailure> {
        let exchange = async move {
            let window = web_sys::window()
                .ok_or_else(|| TransportFailure::Network("window is not available".into()))?;
            let resp_value = JsFuture::from(window.fetch_with_request(&request))
                .await
                .map_err(js_failure)?;
            let resp: Response = resp_value.dyn_into().map_err(js_failure)?;
            let status = resp.status();
            let text = JsFuture::from(resp.text().map_err(js_failure)?)
                .await
                .map_err(js_failure)?;
            Ok::<_, TransportFailure>(HttpReply::new(status, text.as_string().unwrap_or_default()))
        };

        match select(Box::pin(exchange), TimeoutFuture::new(self.timeout_ms)).await {
            Either::Left((reply, _)) => reply,
            Either::Right(_) => Err(TransportFailure::Timeout),
        }
    }
}

impl Transport for FetchTransport {
    async fn post_file(&self, url: &str, file: &SelectedFile) -> Result<HttpReply, TransportFailure> {
        let form = build_form_data(file).map_err(js_failure)?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from(form));

        let request = Request::new_with_str_and_init(url, &opts).map_err(js_failure)?;
        self.send(request).await
    }

    async fn get(&self, url: &str) -> Result<HttpReply, TransportFailure> {
        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::Cors);

        let request = Request::new_with_str_and_init(url, &opts).map_err(js_failure)?;
        self.send(request).await
    }
}

/// 選択ファイルを FormData に詰める
fn build_form_data(file: &SelectedFile) -> Result<FormData, JsValue> {
    let bytes = Uint8Array::from(file.bytes.as_slice());
    let parts = Array::of1(&bytes);

    let options = BlobPropertyBag::new();
    options.set_type(&file.content_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;

    let form = FormData::new()?;
    form.append_with_blob_and_filename(UPLOAD_FIELD, &blob, &file.name)?;
    Ok(form)
}

fn js_failure(value: JsValue) -> TransportFailure {
    TransportFailure::Network(describe_js_error(&value))
}

fn describe_js_error(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// 秒 → ミリ秒（u32に収まらない値は上限に丸める）
pub fn timeout_millis(timeout_secs: u64) -> u32 {
    timeout_secs
        .saturating_mul(1000)
        .min(u64::from(u32::MAX)) as u32
}
