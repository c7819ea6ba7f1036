//! UIコンポーネント

pub mod confidence_bar;
pub mod error_banner;
pub mod header;
pub mod result_panel;
pub mod scan_controls;
pub mod upload_area;
