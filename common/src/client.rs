//! 分類サービスクライアント
//!
//! 通信そのものは `Transport` に委ねる（WASMは fetch、CLIは reqwest）。
//! 1クライアントにつき同時に1リクエストまで。

use crate::error::{ClassificationError, Result, TransportFailure};
use crate::parser::{parse_classes, parse_prediction, parse_status};
use crate::selection::SelectedFile;
use crate::types::{ClassificationResult, ServiceClasses, ServiceStatus};
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// 既定の接続先
pub const DEFAULT_BASE_URL: &str = "https://ecoscan-backend.onrender.com";

/// 既定のタイムアウト（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// マルチパートのフィールド名
pub const UPLOAD_FIELD: &str = "file";

/// HTTP応答（ステータスとボディのみ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP通信の抽象
///
/// 実装側でタイムアウトを必ず設定し、`TransportFailure::Timeout` として返すこと。
pub trait Transport {
    /// `file` をマルチパート（フィールド名 `file`）でPOSTする
    fn post_file(
        &self,
        url: &str,
        file: &SelectedFile,
    ) -> impl Future<Output = std::result::Result<HttpReply, TransportFailure>>;

    fn get(&self, url: &str) -> impl Future<Output = std::result::Result<HttpReply, TransportFailure>>;
}

/// 処理中フラグを戻すガード
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// 分類クライアント
pub struct ClassificationClient<T> {
    transport: T,
    base_url: String,
    in_flight: AtomicBool,
    requests: AtomicU64,
}

impl<T: Transport> ClassificationClient<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            transport,
            base_url,
            in_flight: AtomicBool::new(false),
            requests: AtomicU64::new(0),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn predict_url(&self) -> String {
        format!("{}/predict", self.base_url)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// これまでに発行した分類リクエスト数
    pub fn requests_issued(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// 画像を分類する
    ///
    /// 処理中に呼ばれた場合は通信せず `Busy` を返す。
    /// 自動リトライはしない。
    pub async fn classify(
        &self,
        file: &SelectedFile,
    ) -> std::result::Result<ClassificationResult, ClassificationError> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            tracing::warn!(file = %file.name, "classification already in flight");
            return Err(ClassificationError::Busy);
        }
        let _guard = InFlight(&self.in_flight);
        self.requests.fetch_add(1, Ordering::Relaxed);

        let url = self.predict_url();
        tracing::debug!(%url, file = %file.name, bytes = file.bytes.len(), "posting image");

        let reply = self.transport.post_file(&url, file).await?;
        if !reply.is_success() {
            tracing::warn!(status = reply.status, "classification service returned an error status");
            return Err(TransportFailure::Status(reply.status).into());
        }

        let result = parse_prediction(&reply.body)?;
        tracing::debug!(label = %result.label, confidence = result.confidence, "classified");
        Ok(result)
    }

    /// GET /classes
    pub async fn fetch_classes(&self) -> std::result::Result<ServiceClasses, ClassificationError> {
        let body = self.get_ok(&format!("{}/classes", self.base_url)).await?;
        parse_classes(&body).map_err(|e| ClassificationError::MalformedResponse(e.to_string()))
    }

    /// GET /
    pub async fn health(&self) -> std::result::Result<ServiceStatus, ClassificationError> {
        let body = self.get_ok(&format!("{}/", self.base_url)).await?;
        parse_status(&body).map_err(|e| ClassificationError::MalformedResponse(e.to_string()))
    }

    async fn get_ok(&self, url: &str) -> std::result::Result<String, ClassificationError> {
        let reply = self.transport.get(url).await?;
        if !reply.is_success() {
            return Err(TransportFailure::Status(reply.status).into());
        }
        Ok(reply.body)
    }
}

/// ベースURLの簡易検証
pub fn validate_base_url(base_url: &str) -> Result<()> {
    let trimmed = base_url.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(())
    } else {
        Err(crate::error::Error::Config(format!(
            "base URL must start with http:// or https://: {}",
            base_url
        )))
    }
}
