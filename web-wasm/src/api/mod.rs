//! 分類サービスAPI

pub mod predict;

pub use predict::FetchTransport;
