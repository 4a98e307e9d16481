//! Core library for receipt-to-ledger expense tracking.
//!
//! This crate provides:
//! - OCR text extraction from photographed receipts
//! - Language-model structured extraction with JSON output repair
//! - Receipt normalization and one-row-per-item ledger persistence
//! - Inbox batch processing with per-file failure isolation

pub mod context;
pub mod error;
pub mod inbox;
pub mod ledger;
pub mod llm;
pub mod models;
pub mod ocr;
pub mod ops;
pub mod pipeline;
pub mod receipt;

pub use context::PipelineContext;
pub use error::{LedgerError, ModelError, OcrError, Result, SpenseError};
pub use inbox::{FileOutcome, RunReport, Stage};
pub use ledger::{CsvLedger, LedgerStore, SavedReceipt};
pub use llm::{GeminiExtractor, StructuredExtractor};
pub use models::config::SpenseConfig;
pub use models::receipt::{LedgerRow, LineItem, Receipt};
pub use ocr::{PureOcrExtractor, TextExtractor};
pub use ops::Operations;
