//! Language-model structured extraction and output repair.

mod gemini;
pub mod repair;

pub use gemini::{GeminiExtractor, StructuredExtractor};
