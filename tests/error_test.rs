//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use ecoscan::error::EcoScanError;
use ecoscan::scanner;
use ecoscan_common::{ClassificationError, TransportFailure, ValidationError};
use std::path::Path;
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"), false);
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, EcoScanError::FolderNotFound(_)));
}

/// 空のフォルダをスキャンした場合
#[test]
fn test_scan_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = scanner::scan_folder(dir.path(), false);

    // 空フォルダはエラーではなく空のVecを返す
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// 画像のないフォルダを対象にした場合
#[test]
fn test_collect_targets_no_images() {
    let dir = tempdir().expect("Failed to create temp dir");

    std::fs::write(dir.path().join("test.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("data.json"), "{}").unwrap();

    let result = scanner::collect_targets(dir.path(), false);
    assert!(matches!(result, Err(EcoScanError::NoImagesFound(_))));
}

/// 存在しないパスを対象にした場合
#[test]
fn test_collect_targets_missing_path() {
    let result = scanner::collect_targets(Path::new("/nonexistent/photo.jpg"), false);
    assert!(matches!(result, Err(EcoScanError::FileNotFound(_))));
}

/// EcoScanErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        EcoScanError::Config("bad timeout".to_string()),
        EcoScanError::FileNotFound("test.jpg".to_string()),
        EcoScanError::FolderNotFound("/path/to/folder".to_string()),
        EcoScanError::NoImagesFound("folder".to_string()),
        EcoScanError::HttpClient("tls backend unavailable".to_string()),
        EcoScanError::Prompt("not a terminal".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "Error display should not be empty");
    }
}

/// 共通クレートのエラーからの変換
#[test]
fn test_error_conversions() {
    let err: EcoScanError = ClassificationError::Transport(TransportFailure::Status(500)).into();
    assert!(matches!(err, EcoScanError::Classification(_)));
    assert!(err.to_string().contains("500"));

    let err: EcoScanError =
        ecoscan_common::SelectError::from(ValidationError::InvalidFileType("text/plain".into())).into();
    assert_eq!(err.to_string(), "Please select an image file (JPEG, PNG, etc.)");

    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err: EcoScanError = io.into();
    assert!(matches!(err, EcoScanError::Io(_)));
}

/// 不正なJSONのパースエラー
#[test]
fn test_json_parse_error() {
    let result: Result<serde_json::Value, _> = serde_json::from_str("{ invalid json }");
    let err: EcoScanError = result.unwrap_err().into();
    assert!(matches!(err, EcoScanError::JsonParse(_)));
}
