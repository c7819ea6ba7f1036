//! 画像のスキャン処理
//!
//! ブラウザ版と同じ `Controller` を使い、選択 → 分類 → 表示を1枚ずつ行う。
//! 分類リクエストは常に1件ずつ。

use crate::error::{EcoScanError, Result};
use crate::scanner::{self, ImageInfo};
use dialoguer::Input;
use ecoscan_common::{ClassificationClient, Controller, Phase, Presentation, ReferenceData, Transport, View};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

/// 1枚分の結果
#[derive(Debug, Clone, Serialize)]
pub struct ScanEntry {
    pub file: String,
    pub status: EntryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Presentation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// 分類成功
    Classified,
    /// 分類リクエストの失敗
    Failed,
    /// 画像として受け付けなかった
    Rejected,
}

/// JSON出力用のレポート
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub scanned_at: String,
    pub api_url: String,
    pub weight_kg: f64,
    pub entries: Vec<ScanEntry>,
}

impl ScanReport {
    pub fn new(api_url: &str, weight_kg: f64, entries: Vec<ScanEntry>) -> Self {
        Self {
            scanned_at: chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%:z").to_string(),
            api_url: api_url.to_string(),
            weight_kg,
            entries,
        }
    }

    pub fn count(&self, status: EntryStatus) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }
}

/// 表示内容から結果を作る
pub fn entry_from_view(file: &str, view: View) -> ScanEntry {
    let status = match view.phase {
        Phase::Classified => EntryStatus::Classified,
        Phase::ClassificationFailed | Phase::Classifying => EntryStatus::Failed,
        Phase::NoFile | Phase::FileSelected => EntryStatus::Rejected,
    };
    ScanEntry {
        file: file.to_string(),
        status,
        error: view.error,
        result: if status == EntryStatus::Classified { view.result } else { None },
    }
}

/// 1枚をスキャンする
///
/// 選択できなかった場合はリクエストを出さずに `Rejected` を返す。
pub async fn scan_image<T: Transport>(
    controller: &mut Controller,
    client: &ClassificationClient<T>,
    reference: &ReferenceData,
    image: &ImageInfo,
) -> Result<ScanEntry> {
    let candidate = scanner::load_candidate(image)?;

    if let Err(e) = controller.select_file(candidate) {
        tracing::info!(file = %image.file_name, error = %e, "skipping file");
        return Ok(ScanEntry {
            file: image.file_name.clone(),
            status: EntryStatus::Rejected,
            error: Some(e.to_string()),
            result: None,
        });
    }

    let ticket = controller
        .begin_scan()
        .ok_or_else(|| EcoScanError::Config("scan could not be started".into()))?;
    let outcome = client.classify(ticket.file()).await;
    controller.finish_scan(ticket, outcome);

    Ok(entry_from_view(&image.file_name, controller.render(reference)))
}

/// 複数枚を順にスキャンする
pub async fn scan_all<T: Transport>(
    controller: &mut Controller,
    client: &ClassificationClient<T>,
    reference: &ReferenceData,
    images: &[ImageInfo],
    show_progress: bool,
) -> Result<Vec<ScanEntry>> {
    let progress = if show_progress && images.len() > 1 {
        let pb = ProgressBar::new(images.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        Some(pb)
    } else {
        None
    };

    let mut entries = Vec::with_capacity(images.len());
    for image in images {
        if let Some(pb) = &progress {
            pb.set_message(image.file_name.clone());
        }
        entries.push(scan_image(controller, client, reference, image).await?);
        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    Ok(entries)
}

/// 結果を表示
pub fn print_entry(entry: &ScanEntry) {
    println!("📷 {}", entry.file);
    match (&entry.result, &entry.error) {
        (Some(result), _) => print_presentation(result),
        (None, Some(error)) => println!("  ✗ {}", error),
        (None, None) => println!("  ✗ no result"),
    }
}

pub fn print_presentation(result: &Presentation) {
    println!("  Material:   {} ({}%)", result.label, result.confidence_percent);
    println!(
        "  Value:      {}  ({:.2} kg × {:.2} Birr/kg)",
        result.value_text, result.weight, result.unit_price
    );
    println!("  Tip:        {}", result.tip);
    if let Some(advice) = &result.advice {
        println!("  Advice:     {}", advice);
    }
    if !result.alternatives.is_empty() {
        let others: Vec<String> = result
            .alternatives
            .iter()
            .map(|alt| format!("{} {}%", alt.label, alt.confidence_percent))
            .collect();
        println!("  Candidates: {}", others.join(", "));
    }
}

/// 重量を対話的に変更して価格を再計算する（再分類はしない）
pub fn interactive_weights(controller: &mut Controller, reference: &ReferenceData) -> Result<()> {
    if controller.last_result().is_none() {
        return Ok(());
    }

    println!("\nEnter a new weight to re-estimate the value (empty to finish).");
    loop {
        let raw: String = Input::new()
            .with_prompt("Weight (kg)")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| EcoScanError::Prompt(e.to_string()))?;

        if raw.trim().is_empty() {
            break;
        }

        controller.set_weight(&raw);
        if let Some(result) = controller.render(reference).result {
            println!("  Value:      {}  ({:.2} kg)", result.value_text, result.weight);
        }
    }
    Ok(())
}
