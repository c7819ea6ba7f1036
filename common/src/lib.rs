//! EcoScan Common Library
//!
//! CLIとWeb(WASM)で共有される型とロジック（I/Oなし）

pub mod client;
pub mod controller;
pub mod error;
pub mod parser;
pub mod presenter;
pub mod reference;
pub mod selection;
pub mod types;

pub use client::{
    validate_base_url, ClassificationClient, HttpReply, Transport, DEFAULT_BASE_URL,
    DEFAULT_TIMEOUT_SECS, UPLOAD_FIELD,
};
pub use controller::{Controller, Phase, ScanTicket, SelectError, SelectionTicket, View};
pub use error::{ClassificationError, Error, Result, TransportFailure, ValidationError};
pub use parser::{parse_classes, parse_prediction, parse_status};
pub use presenter::{present, Presentation, WeightInput, CURRENCY_SUFFIX};
pub use reference::{PriceTable, ReferenceData, TipTable, GENERIC_TIP};
pub use selection::{is_image_type, select_file, CandidateFile, PreviewSource, SelectedFile, Selection};
pub use types::{Alternative, ClassificationResult, ServiceClasses, ServiceStatus};
