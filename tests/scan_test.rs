//! スキャン処理の結合テスト
//!
//! 通信はモックに差し替えて、選択 → 分類 → 表示の流れを検証

use ecoscan::scan::{self, EntryStatus, ScanReport};
use ecoscan::scanner::ImageInfo;
use ecoscan_common::{
    ClassificationClient, Controller, HttpReply, ReferenceData, SelectedFile, Transport, TransportFailure, View,
};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;
use tempfile::tempdir;

const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// 返答を順に返すモック
struct QueuedTransport {
    replies: Mutex<VecDeque<Result<HttpReply, TransportFailure>>>,
    posted: Mutex<Vec<(String, String)>>,
}

impl QueuedTransport {
    fn new(replies: Vec<Result<HttpReply, TransportFailure>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            posted: Mutex::new(Vec::new()),
        }
    }

    fn posted(&self) -> Vec<(String, String)> {
        self.posted.lock().unwrap().clone()
    }
}

impl Transport for QueuedTransport {
    async fn post_file(&self, url: &str, file: &SelectedFile) -> Result<HttpReply, TransportFailure> {
        self.posted.lock().unwrap().push((url.to_string(), file.name.clone()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(TransportFailure::Network("no reply queued".into())))
    }

    async fn get(&self, _url: &str) -> Result<HttpReply, TransportFailure> {
        Err(TransportFailure::Network("not used".into()))
    }
}

fn success(label: &str, confidence: f64) -> Result<HttpReply, TransportFailure> {
    let body = serde_json::json!({
        "status": "success",
        "prediction": label,
        "confidence": confidence,
    });
    Ok(HttpReply::new(200, body.to_string()))
}

fn write_image(dir: &Path, name: &str) -> ImageInfo {
    let path = dir.join(name);
    std::fs::write(&path, PNG_MAGIC).unwrap();
    ImageInfo {
        path,
        file_name: name.to_string(),
    }
}

fn reference() -> ReferenceData {
    ReferenceData::builtin().unwrap()
}

#[tokio::test]
async fn test_scan_image_classified() {
    let dir = tempdir().unwrap();
    let image = write_image(dir.path(), "can.png");
    let client = ClassificationClient::new(QueuedTransport::new(vec![success("metal", 0.92)]), "http://svc/");
    let mut controller = Controller::new();
    controller.set_weight("2");

    let entry = scan::scan_image(&mut controller, &client, &reference(), &image).await.unwrap();

    assert_eq!(entry.status, EntryStatus::Classified);
    assert!(entry.error.is_none());
    let result = entry.result.unwrap();
    assert_eq!(result.label, "metal");
    assert_eq!(result.confidence_percent, 92);
    assert_eq!(result.value_text, "150.00 Birr");
    assert_eq!(
        client.transport().posted(),
        vec![("http://svc/predict".to_string(), "can.png".to_string())]
    );
}

#[tokio::test]
async fn test_scan_image_rejects_non_image_without_request() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "hello").unwrap();
    let image = ImageInfo {
        path,
        file_name: "notes.txt".to_string(),
    };
    let client = ClassificationClient::new(QueuedTransport::new(vec![success("metal", 0.9)]), "http://svc");
    let mut controller = Controller::new();

    let entry = scan::scan_image(&mut controller, &client, &reference(), &image).await.unwrap();

    assert_eq!(entry.status, EntryStatus::Rejected);
    assert_eq!(entry.error.as_deref(), Some("Please select an image file (JPEG, PNG, etc.)"));
    assert!(entry.result.is_none());
    assert_eq!(client.requests_issued(), 0);
}

#[tokio::test]
async fn test_scan_image_server_error() {
    let dir = tempdir().unwrap();
    let image = write_image(dir.path(), "bottle.png");
    let client = ClassificationClient::new(
        QueuedTransport::new(vec![Ok(HttpReply::new(500, "boom"))]),
        "http://svc",
    );
    let mut controller = Controller::new();

    let entry = scan::scan_image(&mut controller, &client, &reference(), &image).await.unwrap();

    assert_eq!(entry.status, EntryStatus::Failed);
    assert_eq!(entry.error.as_deref(), Some("Server error: 500"));
    assert!(entry.result.is_none());
}

#[tokio::test]
async fn test_scan_image_remote_rejection_message() {
    let dir = tempdir().unwrap();
    let image = write_image(dir.path(), "blurry.png");
    let body = r#"{"status": "error", "message": "Image too blurry"}"#;
    let client = ClassificationClient::new(QueuedTransport::new(vec![Ok(HttpReply::new(200, body))]), "http://svc");
    let mut controller = Controller::new();

    let entry = scan::scan_image(&mut controller, &client, &reference(), &image).await.unwrap();

    assert_eq!(entry.status, EntryStatus::Failed);
    assert_eq!(entry.error.as_deref(), Some("Image too blurry"));
}

#[tokio::test]
async fn test_scan_all_sequential() {
    let dir = tempdir().unwrap();
    let images = vec![
        write_image(dir.path(), "a.png"),
        write_image(dir.path(), "b.png"),
        write_image(dir.path(), "c.png"),
    ];
    let client = ClassificationClient::new(
        QueuedTransport::new(vec![
            success("plastic", 0.8),
            Err(TransportFailure::Timeout),
            success("unknown-thing", 0.55),
        ]),
        "http://svc",
    );
    let mut controller = Controller::new();

    let entries = scan::scan_all(&mut controller, &client, &reference(), &images, false)
        .await
        .unwrap();

    assert_eq!(entries.len(), 3);
    assert_eq!(client.requests_issued(), 3);
    assert!(!client.is_pending());

    let names: Vec<String> = client.transport().posted().into_iter().map(|(_, name)| name).collect();
    assert_eq!(names, vec!["a.png", "b.png", "c.png"]);

    assert_eq!(entries[0].status, EntryStatus::Classified);
    assert_eq!(entries[1].status, EntryStatus::Failed);
    assert_eq!(entries[2].status, EntryStatus::Classified);

    // 単価表にない素材は0円
    let unknown = entries[2].result.as_ref().unwrap();
    assert_eq!(unknown.value_text, "0.00 Birr");

    let report = ScanReport::new("http://svc", 1.0, entries);
    assert_eq!(report.count(EntryStatus::Classified), 2);
    assert_eq!(report.count(EntryStatus::Failed), 1);
    assert_eq!(report.count(EntryStatus::Rejected), 0);
}

#[tokio::test]
async fn test_weight_change_after_scan_needs_no_request() {
    let dir = tempdir().unwrap();
    let image = write_image(dir.path(), "can.png");
    let client = ClassificationClient::new(QueuedTransport::new(vec![success("metal", 0.9)]), "http://svc");
    let reference = reference();
    let mut controller = Controller::new();

    scan::scan_image(&mut controller, &client, &reference, &image).await.unwrap();
    controller.set_weight("0.5");
    let view = controller.render(&reference);

    assert_eq!(view.result.unwrap().value_text, "37.50 Birr");
    assert_eq!(client.requests_issued(), 1);
}

#[test]
fn test_entry_from_view_drops_stale_result_on_failure() {
    let view = View {
        phase: ecoscan_common::Phase::ClassificationFailed,
        error: Some("Server error: 502".to_string()),
        ..View::default()
    };
    let entry = scan::entry_from_view("x.png", view);
    assert_eq!(entry.status, EntryStatus::Failed);
    assert!(entry.result.is_none());
}

#[test]
fn test_report_serializes_lowercase_status() {
    let report = ScanReport::new(
        "http://svc",
        1.0,
        vec![scan::entry_from_view("x.png", View::default())],
    );
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["entries"][0]["status"], "rejected");
    assert_eq!(json["api_url"], "http://svc");
    assert!(json["entries"][0].get("result").is_none());
}
