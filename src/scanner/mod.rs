//! 画像ファイルの列挙と読み込み

use crate::error::{EcoScanError, Result};
use ecoscan_common::CandidateFile;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub file_name: String,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp", "tif", "tiff"];

const OCTET_STREAM: &str = "application/octet-stream";

/// フォルダ内の画像を列挙（ファイル名順）
pub fn scan_folder(folder: &Path, recursive: bool) -> Result<Vec<ImageInfo>> {
    if !folder.exists() {
        return Err(EcoScanError::FolderNotFound(folder.display().to_string()));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut images: Vec<ImageInfo> = WalkDir::new(folder)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| has_image_extension(entry.path()))
        .map(|entry| ImageInfo {
            path: entry.path().to_path_buf(),
            file_name: entry.file_name().to_string_lossy().to_string(),
        })
        .collect();

    images.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(images)
}

/// ファイルならそれ1件、フォルダなら中の画像
pub fn collect_targets(path: &Path, recursive: bool) -> Result<Vec<ImageInfo>> {
    if path.is_file() {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        return Ok(vec![ImageInfo {
            path: path.to_path_buf(),
            file_name,
        }]);
    }
    if !path.exists() {
        return Err(EcoScanError::FileNotFound(path.display().to_string()));
    }

    let images = scan_folder(path, recursive)?;
    if images.is_empty() {
        return Err(EcoScanError::NoImagesFound(path.display().to_string()));
    }
    Ok(images)
}

pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// 拡張子からContent-Typeを決める。不明な場合は中身から推定する
pub fn content_type_for(path: &Path, bytes: &[u8]) -> String {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let by_extension = match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "webp" => Some("image/webp"),
        "tif" | "tiff" => Some("image/tiff"),
        "pdf" => Some("application/pdf"),
        "txt" => Some("text/plain"),
        "json" => Some("application/json"),
        _ => None,
    };

    match by_extension {
        Some(content_type) => content_type.to_string(),
        None => image::guess_format(bytes)
            .map(|format| format.to_mime_type().to_string())
            .unwrap_or_else(|_| OCTET_STREAM.to_string()),
    }
}

/// 画像を読み込んで選択候補にする
pub fn load_candidate(image: &ImageInfo) -> Result<CandidateFile> {
    if !image.path.exists() {
        return Err(EcoScanError::FileNotFound(image.path.display().to_string()));
    }
    let bytes = std::fs::read(&image.path)?;
    let content_type = content_type_for(&image.path, &bytes);
    Ok(CandidateFile::new(image.file_name.clone(), content_type, bytes))
}
