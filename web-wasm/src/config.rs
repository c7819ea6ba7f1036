//! ビルド時設定
//!
//! 接続先はビルド時の環境変数 `ECOSCAN_API_URL` で差し替えられる。

use ecoscan_common::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// 分類サービスのベースURL
pub fn api_url() -> &'static str {
    match option_env!("ECOSCAN_API_URL") {
        Some(url) if !url.trim().is_empty() => url,
        _ => DEFAULT_BASE_URL,
    }
}

/// リクエストのタイムアウト（秒）
pub const TIMEOUT_SECS: u64 = DEFAULT_TIMEOUT_SECS;
