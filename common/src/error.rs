//! エラー型定義
//!
//! - Error: 参照データ読み込みなどの共通エラー
//! - ValidationError: ファイル選択時の検証エラー
//! - ClassificationError: 分類リクエストのエラー

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

/// ファイル選択の検証エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select an image file (JPEG, PNG, etc.)")]
    InvalidFileType(String),
}

/// 通信レイヤーの失敗
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    /// 2xx以外のHTTPステータス
    #[error("Server error: {0}")]
    Status(u16),

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,
}

/// 分類リクエストのエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassificationError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportFailure),

    #[error("classification rejected: {0}")]
    RemoteRejected(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// 同じクライアントで別のリクエストが処理中
    #[error("a classification request is already in flight")]
    Busy,
}

impl ClassificationError {
    /// 通信エラーの場合のHTTPステータス（ネットワーク障害・タイムアウトはNone）
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClassificationError::Transport(TransportFailure::Status(code)) => Some(*code),
            _ => None,
        }
    }

    /// エラーバナーに表示するメッセージ
    pub fn user_message(&self) -> String {
        match self {
            ClassificationError::Transport(TransportFailure::Status(code)) => {
                format!("Server error: {}", code)
            }
            ClassificationError::Transport(TransportFailure::Network(_)) => {
                "Failed to analyze image. Please try again.".to_string()
            }
            ClassificationError::Transport(TransportFailure::Timeout) => {
                "The classification service did not respond in time. Please try again.".to_string()
            }
            ClassificationError::RemoteRejected(message) => message.clone(),
            ClassificationError::MalformedResponse(_) => {
                "Unexpected response from the classification service".to_string()
            }
            ClassificationError::Busy => {
                "A scan is already in progress. Please wait.".to_string()
            }
        }
    }
}
