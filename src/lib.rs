//! EcoScan CLI
//!
//! 写真から廃棄物の素材を分類し、推定価格とリサイクルのヒントを表示する

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod scan;
pub mod scanner;
pub mod transport;
