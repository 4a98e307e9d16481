//! OCR text extraction from receipt photos.

mod engine;

pub use engine::{PureOcrExtractor, TextExtractor};
