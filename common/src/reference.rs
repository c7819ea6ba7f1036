//! 参照データ（単価表・リサイクルのヒント）
//!
//! 起動時に一度だけ構築し、以後は変更しない。
//! キーは小文字の素材ラベル。見つからない場合は既定値を返す。

use crate::error::{Error, Result};
use std::collections::BTreeMap;

const BUILTIN_PRICES: &str = include_str!("../data/prices.json");
const BUILTIN_TIPS: &str = include_str!("../data/tips.json");

/// 未知の素材に対するヒント
pub const GENERIC_TIP: &str = "Ensure the material is clean and free of contaminants for recycling.";

/// 素材ラベル → 単価（Birr/kg）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    entries: BTreeMap<String, f64>,
}

impl PriceTable {
    /// JSONオブジェクト `{"metal": 75.0, ...}` から構築
    ///
    /// 負の値・非有限値は設定エラー
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, f64> = serde_json::from_str(json)?;
        let mut entries = BTreeMap::new();
        for (label, price) in raw {
            if !price.is_finite() || price < 0.0 {
                return Err(Error::Config(format!("invalid price for {}: {}", label, price)));
            }
            entries.insert(label.trim().to_lowercase(), price);
        }
        Ok(Self { entries })
    }

    /// ラベルで単価を引く（大文字小文字は区別しない）
    pub fn lookup(&self, label: &str) -> Option<f64> {
        self.entries.get(&label.trim().to_lowercase()).copied()
    }

    /// 見つからなければ `default` を返す。0円の素材はヒット扱い
    pub fn lookup_or(&self, label: &str, default: f64) -> f64 {
        self.lookup(label).unwrap_or(default)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 素材ラベル → リサイクルのヒント
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TipTable {
    entries: BTreeMap<String, String>,
}

impl TipTable {
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, String> = serde_json::from_str(json)?;
        let entries = raw
            .into_iter()
            .map(|(label, tip)| (label.trim().to_lowercase(), tip))
            .collect();
        Ok(Self { entries })
    }

    pub fn lookup(&self, label: &str) -> Option<&str> {
        self.entries.get(&label.trim().to_lowercase()).map(String::as_str)
    }

    pub fn lookup_or<'a>(&'a self, label: &str, default: &'a str) -> &'a str {
        self.lookup(label).unwrap_or(default)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 単価表とヒント表の組
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    pub prices: PriceTable,
    pub tips: TipTable,
}

impl ReferenceData {
    pub fn new(prices: PriceTable, tips: TipTable) -> Self {
        Self { prices, tips }
    }

    /// 組み込みの参照データ
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            prices: PriceTable::from_json(BUILTIN_PRICES)?,
            tips: TipTable::from_json(BUILTIN_TIPS)?,
        })
    }

    /// 単価（未知の素材は0）
    pub fn unit_price(&self, label: &str) -> f64 {
        self.prices.lookup_or(label, 0.0)
    }

    /// ヒント（未知の素材は汎用メッセージ）
    pub fn tip(&self, label: &str) -> &str {
        self.tips.lookup_or(label, GENERIC_TIP)
    }
}
