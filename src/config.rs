use crate::error::{EcoScanError, Result};
use ecoscan_common::{
    validate_base_url, PriceTable, ReferenceData, TipTable, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 接続先を上書きする環境変数
pub const API_URL_ENV: &str = "ECOSCAN_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api_url: Option<String>,
    pub timeout_seconds: u64,
    pub prices_path: Option<PathBuf>,
    pub tips_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            prices_path: None,
            tips_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| EcoScanError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("ecoscan").join("config.json"))
    }

    pub fn set_api_url(&mut self, url: String) -> Result<()> {
        validate_base_url(&url)?;
        self.api_url = Some(url.trim().trim_end_matches('/').to_string());
        Ok(())
    }

    pub fn set_timeout(&mut self, seconds: u64) -> Result<()> {
        if seconds == 0 {
            return Err(EcoScanError::Config("timeout must be at least 1 second".into()));
        }
        self.timeout_seconds = seconds;
        Ok(())
    }

    /// 接続先の決定（フラグ > 環境変数 > 設定ファイル > 既定値）
    pub fn resolve_api_url(&self, flag: Option<&str>) -> Result<String> {
        let env = std::env::var(API_URL_ENV).ok();
        let url = pick_api_url(flag, env.as_deref(), self.api_url.as_deref());
        validate_base_url(&url)?;
        Ok(url)
    }
}

/// 空文字は未指定扱い
pub fn pick_api_url(flag: Option<&str>, env: Option<&str>, configured: Option<&str>) -> String {
    [flag, env, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty())
        .unwrap_or(DEFAULT_BASE_URL)
        .to_string()
}

/// 参照データの読み込み
///
/// 組み込みの表を基に、指定があればファイルの表で丸ごと置き換える。
pub fn load_reference(prices_path: Option<&Path>, tips_path: Option<&Path>) -> Result<ReferenceData> {
    let mut reference = ReferenceData::builtin()?;

    if let Some(path) = prices_path {
        let content = read_table(path)?;
        reference.prices = PriceTable::from_json(&content)?;
        tracing::info!(path = %path.display(), entries = reference.prices.len(), "loaded price table");
    }

    if let Some(path) = tips_path {
        let content = read_table(path)?;
        reference.tips = TipTable::from_json(&content)?;
        tracing::info!(path = %path.display(), entries = reference.tips.len(), "loaded tip table");
    }

    Ok(reference)
}

fn read_table(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(EcoScanError::FileNotFound(path.display().to_string()));
    }
    Ok(std::fs::read_to_string(path)?)
}
