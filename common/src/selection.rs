//! ファイル選択と検証
//!
//! ピッカー/ドラッグ&ドロップで渡された候補を検証し、
//! プレビュー用のData URLを生成する。

use crate::error::ValidationError;
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// 選択候補のファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// 検証済みの選択ファイル
pub type SelectedFile = CandidateFile;

/// プレビュー表示用のData URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewSource(String);

impl PreviewSource {
    /// "data:image/jpeg;base64,..." 形式
    pub fn from_file(file: &CandidateFile) -> Self {
        Self(format!(
            "data:{};base64,{}",
            file.content_type,
            STANDARD.encode(&file.bytes)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// `image/*` 系のContent-Typeか
///
/// 大文字小文字は区別せず、`;` 以降のパラメータは無視する
pub fn is_image_type(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or("").trim();
    match essence.split_once('/') {
        Some((kind, subtype)) => kind.eq_ignore_ascii_case("image") && !subtype.is_empty(),
        None => false,
    }
}

/// Content-Typeのみ検証（デコード前に同期的に判定する用）
pub fn validate_content_type(content_type: &str) -> Result<(), ValidationError> {
    if is_image_type(content_type) {
        Ok(())
    } else {
        Err(ValidationError::InvalidFileType(content_type.to_string()))
    }
}

/// 候補を検証してプレビューを生成
pub fn select_file(candidate: &CandidateFile) -> Result<PreviewSource, ValidationError> {
    validate_content_type(&candidate.content_type)?;
    Ok(PreviewSource::from_file(candidate))
}

/// 現在の選択ファイルとそのプレビュー
///
/// 新しい選択で丸ごと置き換わる。解除はしない。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    current: Option<(SelectedFile, PreviewSource)>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 検証に失敗した場合は以前の選択をそのまま残す
    pub fn select(&mut self, candidate: CandidateFile) -> Result<&PreviewSource, ValidationError> {
        let preview = select_file(&candidate)?;
        let (_, preview) = self.current.insert((candidate, preview));
        Ok(preview)
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.current.as_ref().map(|(file, _)| file)
    }

    pub fn preview(&self) -> Option<&PreviewSource> {
        self.current.as_ref().map(|(_, preview)| preview)
    }

    pub fn has_file(&self) -> bool {
        self.current.is_some()
    }
}
