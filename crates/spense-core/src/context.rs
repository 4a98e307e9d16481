//! Pipeline dependency context.
//!
//! Every external collaborator (OCR engine, language model, ledger store)
//! is constructed exactly once and threaded through the pipeline. A
//! collaborator that fails to come up surfaces as a single setup error
//! instead of leaving the process half-functional.

use tracing::info;

use crate::error::{Result, SpenseError};
use crate::ledger::{CsvLedger, LedgerStore};
use crate::llm::{GeminiExtractor, StructuredExtractor};
use crate::models::config::SpenseConfig;
use crate::ocr::{PureOcrExtractor, TextExtractor};

/// Everything the pipeline needs, built once at startup.
pub struct PipelineContext {
    /// Active configuration.
    pub config: SpenseConfig,

    /// OCR text extraction.
    pub ocr: Box<dyn TextExtractor>,

    /// Language-model structured extraction.
    pub llm: Box<dyn StructuredExtractor>,

    /// Tabular ledger store.
    pub ledger: Box<dyn LedgerStore>,
}

impl PipelineContext {
    /// Construct all collaborators from configuration.
    ///
    /// Creates the inbox and processed directories if absent, loads the
    /// OCR models, reads the model API key from the environment, and
    /// opens the ledger file.
    pub fn initialize(config: SpenseConfig) -> Result<Self> {
        for dir in [&config.inbox.inbox_dir, &config.inbox.processed_dir] {
            std::fs::create_dir_all(dir).map_err(|e| {
                SpenseError::Setup(format!("cannot create {}: {}", dir.display(), e))
            })?;
        }

        let ocr = PureOcrExtractor::from_dir(&config.ocr.model_dir, config.ocr.clone())
            .map_err(|e| SpenseError::Setup(e.to_string()))?;

        let api_key = std::env::var(&config.model.api_key_env).map_err(|_| {
            SpenseError::Setup(format!(
                "environment variable {} is not set",
                config.model.api_key_env
            ))
        })?;
        let llm = GeminiExtractor::new(&config.model, api_key)
            .map_err(|e| SpenseError::Setup(e.to_string()))?;

        let ledger =
            CsvLedger::open(&config.ledger.path).map_err(|e| SpenseError::Setup(e.to_string()))?;

        info!("Pipeline context initialized");

        Ok(Self {
            config,
            ocr: Box::new(ocr),
            llm: Box::new(llm),
            ledger: Box::new(ledger),
        })
    }

    /// Assemble a context from preconstructed collaborators.
    ///
    /// Used by tests and by callers wiring alternative backends.
    pub fn with_parts(
        config: SpenseConfig,
        ocr: Box<dyn TextExtractor>,
        llm: Box<dyn StructuredExtractor>,
        ledger: Box<dyn LedgerStore>,
    ) -> Self {
        Self {
            config,
            ocr,
            llm,
            ledger,
        }
    }
}
