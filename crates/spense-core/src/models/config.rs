//! Configuration structures for the receipt pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the spense pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpenseConfig {
    /// OCR configuration.
    pub ocr: OcrConfig,

    /// Language-model configuration.
    pub model: ModelConfig,

    /// Ledger store configuration.
    pub ledger: LedgerConfig,

    /// Inbox lifecycle configuration.
    pub inbox: InboxConfig,
}

impl Default for SpenseConfig {
    fn default() -> Self {
        Self {
            ocr: OcrConfig::default(),
            model: ModelConfig::default(),
            ledger: LedgerConfig::default(),
            inbox: InboxConfig::default(),
        }
    }
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Directory containing OCR model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,

    /// Maximum image dimension (longer side) before downscaling.
    pub max_image_size: u32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
            max_image_size: 2048,
        }
    }
}

/// Language-model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model identifier to request.
    pub model: String,

    /// Service endpoint base URL.
    pub endpoint: String,

    /// Environment variable holding the API key.
    pub api_key_env: String,

    /// Per-request deadline in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            request_timeout_secs: 60,
        }
    }
}

/// Ledger store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Path to the ledger CSV file.
    pub path: PathBuf,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("ledger.csv"),
        }
    }
}

/// Inbox lifecycle configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InboxConfig {
    /// Directory scanned for receipt images.
    pub inbox_dir: PathBuf,

    /// Directory processed images are moved into.
    pub processed_dir: PathBuf,
}

impl Default for InboxConfig {
    fn default() -> Self {
        Self {
            inbox_dir: PathBuf::from("receipt_inbox"),
            processed_dir: PathBuf::from("receipts_processed"),
        }
    }
}

impl SpenseConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
