//! 画面の状態管理
//!
//! ファイル選択・スキャン・重量入力のイベントを受けて状態を遷移させ、
//! `render` で状態から表示内容を作る。非同期処理の完了はチケットの
//! 世代番号を照合し、古い完了は捨てる。
//!
//! 状態遷移:
//! - NoFile → FileSelected: 選択成功
//! - FileSelected / Classified / ClassificationFailed → Classifying: スキャン開始
//! - Classifying → Classified / ClassificationFailed: 応答
//! - Classifying 以外 → FileSelected: 新しいファイルの選択（前回の結果は消す）

use crate::error::{ClassificationError, ValidationError};
use crate::presenter::{present, Presentation, WeightInput};
use crate::reference::ReferenceData;
use crate::selection::{validate_content_type, CandidateFile, PreviewSource, SelectedFile, Selection};
use crate::types::ClassificationResult;
use thiserror::Error;

/// ファイル読み込み失敗時のメッセージ
pub const READ_FAILED_MESSAGE: &str = "Could not read the selected file. Please try another image.";

/// 画面の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    NoFile,
    FileSelected,
    Classifying,
    Classified,
    ClassificationFailed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::NoFile => "no-file",
            Phase::FileSelected => "file-selected",
            Phase::Classifying => "classifying",
            Phase::Classified => "classified",
            Phase::ClassificationFailed => "classification-failed",
        }
    }
}

/// 選択操作のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Please wait for the current scan to finish")]
    ScanInProgress,
}

/// プレビュー生成中の選択を識別する
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionTicket {
    generation: u64,
}

/// 発行したスキャンを識別する
#[derive(Debug, Clone, PartialEq)]
pub struct ScanTicket {
    scan_generation: u64,
    selection_generation: u64,
    file: SelectedFile,
}

impl ScanTicket {
    /// 送信するファイル
    pub fn file(&self) -> &SelectedFile {
        &self.file
    }
}

/// 描画内容（状態の純粋関数）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct View {
    pub phase: Phase,
    pub preview: Option<String>,
    pub file_name: Option<String>,
    pub selection_enabled: bool,
    pub scan_enabled: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub result: Option<Presentation>,
}

/// 画面の状態と遷移
#[derive(Debug, Clone, Default)]
pub struct Controller {
    selection: Selection,
    phase: Phase,
    last_result: Option<ClassificationResult>,
    weight: WeightInput,
    error: Option<String>,
    selection_generation: u64,
    scan_generation: u64,
    pending_selection: Option<u64>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn weight(&self) -> WeightInput {
        self.weight
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_result(&self) -> Option<&ClassificationResult> {
        self.last_result.as_ref()
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selection.file()
    }

    pub fn preview(&self) -> Option<&PreviewSource> {
        self.selection.preview()
    }

    /// スキャン中は選択を受け付けない
    pub fn can_select(&self) -> bool {
        self.phase != Phase::Classifying
    }

    /// ファイルがあり、スキャン中でもプレビュー生成中でもない
    pub fn can_scan(&self) -> bool {
        self.selection.has_file() && self.phase != Phase::Classifying && self.pending_selection.is_none()
    }

    /// 選択の開始（Content-Typeの検証のみ）
    ///
    /// 成功したらプレビュー生成が終わるまでチケットを保持し、
    /// `finish_selection` に渡す。失敗時は以前の選択をそのまま残す。
    pub fn begin_selection(&mut self, content_type: &str) -> Result<SelectionTicket, SelectError> {
        if !self.can_select() {
            return Err(SelectError::ScanInProgress);
        }
        if let Err(e) = validate_content_type(content_type) {
            tracing::debug!(content_type, "rejected candidate");
            self.error = Some(e.to_string());
            return Err(e.into());
        }

        self.error = None;
        self.selection_generation += 1;
        self.pending_selection = Some(self.selection_generation);
        Ok(SelectionTicket {
            generation: self.selection_generation,
        })
    }

    /// プレビュー生成の完了
    ///
    /// 後から別の選択が始まっていれば捨てて `Ok(false)` を返す。
    pub fn finish_selection(
        &mut self,
        ticket: SelectionTicket,
        candidate: CandidateFile,
    ) -> Result<bool, SelectError> {
        if self.pending_selection != Some(ticket.generation) {
            tracing::debug!(generation = ticket.generation, "discarding stale selection");
            return Ok(false);
        }
        self.pending_selection = None;
        self.commit_selection(candidate)?;
        tracing::debug!(generation = ticket.generation, "file selected");
        Ok(true)
    }

    /// ファイル読み込みに失敗した選択を取り下げる
    pub fn abandon_selection(&mut self, ticket: SelectionTicket) -> bool {
        if self.pending_selection != Some(ticket.generation) {
            return false;
        }
        self.pending_selection = None;
        self.error = Some(READ_FAILED_MESSAGE.to_string());
        true
    }

    /// 同期的に選択する（読み込み済みのファイル向け）
    pub fn select_file(&mut self, candidate: CandidateFile) -> Result<PreviewSource, SelectError> {
        self.begin_selection(&candidate.content_type)?;
        self.pending_selection = None;
        self.commit_selection(candidate)
    }

    fn commit_selection(&mut self, candidate: CandidateFile) -> Result<PreviewSource, SelectError> {
        let preview = match self.selection.select(candidate) {
            Ok(preview) => preview.clone(),
            Err(e) => {
                self.error = Some(e.to_string());
                return Err(e.into());
            }
        };
        self.phase = Phase::FileSelected;
        self.last_result = None;
        self.error = None;
        Ok(preview)
    }

    /// スキャン開始
    ///
    /// 開始できない状態では `None`（リクエストは発行しないこと）
    pub fn begin_scan(&mut self) -> Option<ScanTicket> {
        if !self.can_scan() {
            return None;
        }
        let file = self.selection.file()?.clone();

        self.phase = Phase::Classifying;
        self.error = None;
        self.scan_generation += 1;
        tracing::debug!(generation = self.scan_generation, file = %file.name, "scan started");

        Some(ScanTicket {
            scan_generation: self.scan_generation,
            selection_generation: self.selection_generation,
            file,
        })
    }

    /// スキャン完了
    ///
    /// チケットが現在のスキャン・選択と一致しない場合は捨てて `false`。
    /// 失敗時も前回の結果とプレビューは残す。
    pub fn finish_scan(
        &mut self,
        ticket: ScanTicket,
        outcome: Result<ClassificationResult, ClassificationError>,
    ) -> bool {
        let current = self.phase == Phase::Classifying
            && ticket.scan_generation == self.scan_generation
            && ticket.selection_generation == self.selection_generation;
        if !current {
            tracing::debug!(generation = ticket.scan_generation, "discarding stale scan result");
            return false;
        }

        match outcome {
            Ok(result) => {
                tracing::info!(label = %result.label, confidence = result.confidence, "classification succeeded");
                self.last_result = Some(result);
                self.phase = Phase::Classified;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "classification failed");
                self.phase = Phase::ClassificationFailed;
                self.error = Some(e.user_message());
            }
        }
        true
    }

    /// 重量の変更（どの状態でも可、リクエストは発生しない）
    pub fn set_weight(&mut self, raw: &str) {
        self.weight = WeightInput::parse(raw);
    }

    /// 状態から表示内容を作る
    pub fn render(&self, reference: &ReferenceData) -> View {
        View {
            phase: self.phase,
            preview: self.selection.preview().map(|p| p.as_str().to_string()),
            file_name: self.selection.file().map(|f| f.name.clone()),
            selection_enabled: self.can_select(),
            scan_enabled: self.can_scan(),
            loading: self.phase == Phase::Classifying,
            error: self.error.clone(),
            result: self
                .last_result
                .as_ref()
                .map(|result| present(result, self.weight, reference)),
        }
    }
}
