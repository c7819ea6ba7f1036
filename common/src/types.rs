//! 分類結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - ClassificationResult: /predict の成功結果
//! - Alternative: 上位候補（サーバーが返した場合のみ）
//! - ServiceClasses / ServiceStatus: メタデータ系エンドポイントの応答

use serde::{Deserialize, Serialize};

/// 素材の上位候補
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    #[serde(rename = "class")]
    pub label: String,
    pub confidence: f64,
}

/// 分類結果（生成後は不変）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    /// 素材ラベル
    pub label: String,

    /// 確信度 [0, 1]
    pub confidence: f64,

    /// サーバー側の処分アドバイス
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advice: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<Alternative>,
}

impl ClassificationResult {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
            advice: None,
            alternatives: Vec::new(),
        }
    }
}

/// GET /classes の応答
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceClasses {
    pub classes: Vec<String>,
    #[serde(default)]
    pub count: usize,
}

/// GET / の応答
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceStatus {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}
