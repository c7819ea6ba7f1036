//! 分類サービスのレスポンスパーサー
//!
//! /predict のJSONボディを ClassificationResult または
//! ClassificationError に変換する。

use crate::error::{ClassificationError, Error, Result};
use crate::types::{Alternative, ClassificationResult, ServiceClasses, ServiceStatus};
use serde_json::{Map, Value};

const SUCCESS_STATUS: &str = "success";
const DEFAULT_REJECTION: &str = "Analysis failed";

/// /predict レスポンスをパース
///
/// - `status == "success"`: `prediction` と `confidence` を取り出す
/// - それ以外: サーバーのメッセージを `RemoteRejected` として返す
///
/// 確信度は [0, 1] の有限値のみ受け付ける（範囲外はクランプせず拒否）
///
/// # Examples
/// ```
/// use ecoscan_common::parse_prediction;
///
/// let body = r#"{"status": "success", "prediction": "Metal", "confidence": 0.93}"#;
/// let result = parse_prediction(body).unwrap();
/// assert_eq!(result.label, "Metal");
/// ```
pub fn parse_prediction(body: &str) -> std::result::Result<ClassificationResult, ClassificationError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ClassificationError::MalformedResponse(format!("invalid JSON: {}", e)))?;
    let map = value
        .as_object()
        .ok_or_else(|| ClassificationError::MalformedResponse("expected a JSON object".into()))?;

    let status = get_string(map, "status")
        .ok_or_else(|| ClassificationError::MalformedResponse("missing status".into()))?;

    if status != SUCCESS_STATUS {
        let message = get_string(map, "message")
            .or_else(|| get_string(map, "detail"))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REJECTION.to_string());
        return Err(ClassificationError::RemoteRejected(message));
    }

    let label = get_string(map, "prediction")
        .filter(|l| !l.trim().is_empty())
        .ok_or_else(|| ClassificationError::MalformedResponse("missing prediction".into()))?;

    let confidence = map
        .get("confidence")
        .and_then(Value::as_f64)
        .ok_or_else(|| ClassificationError::MalformedResponse("missing confidence".into()))?;

    if !is_probability(confidence) {
        return Err(ClassificationError::MalformedResponse(format!(
            "confidence out of range: {}",
            confidence
        )));
    }

    Ok(ClassificationResult {
        label,
        confidence,
        advice: get_string(map, "advice").filter(|a| !a.trim().is_empty()),
        alternatives: parse_alternatives(map),
    })
}

/// GET /classes レスポンスをパース
pub fn parse_classes(body: &str) -> Result<ServiceClasses> {
    let mut classes: ServiceClasses = serde_json::from_str(body)?;
    if classes.count == 0 {
        classes.count = classes.classes.len();
    }
    Ok(classes)
}

/// GET / レスポンスをパース
pub fn parse_status(body: &str) -> Result<ServiceStatus> {
    let status: ServiceStatus = serde_json::from_str(body)?;
    if status.status.is_empty() {
        return Err(Error::Config("service status missing".into()));
    }
    Ok(status)
}

fn is_probability(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}

/// `all_predictions` は任意項目。不正な要素は読み飛ばす
fn parse_alternatives(map: &Map<String, Value>) -> Vec<Alternative> {
    map.get("all_predictions")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value::<Alternative>(item.clone()).ok())
                .filter(|alt| is_probability(alt.confidence))
                .collect()
        })
        .unwrap_or_default()
}

fn get_string(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}
