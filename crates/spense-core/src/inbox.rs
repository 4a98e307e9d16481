//! Inbox batch processing and the receipt image lifecycle.
//!
//! Each image lives through `inbox -> processed` exactly once. A failure
//! at any stage leaves the file untouched in the inbox and is recorded in
//! the run report; the batch always continues with the next file. The
//! ordering is persist-then-move, so a failed move still leaves durable
//! rows in the ledger.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::context::PipelineContext;
use crate::error::Result;
use crate::ledger;
use crate::models::receipt::{DEFAULT_DATE, Receipt};
use crate::pipeline;

/// Filename extensions recognized as inbox members, lowercase.
const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Pipeline stage a file can fail in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// OCR text extraction.
    Extracting,
    /// Model call, JSON repair, and normalization.
    Parsing,
    /// Appending rows to the ledger.
    Persisting,
    /// Moving the file out of the inbox.
    Relocating,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Extracting => "extracting",
            Stage::Parsing => "parsing",
            Stage::Persisting => "persisting",
            Stage::Relocating => "relocating",
        };
        f.write_str(name)
    }
}

/// Outcome of one inbox file.
#[derive(Debug, Clone)]
pub enum FileOutcome {
    /// Rows persisted and the file moved out of the inbox.
    Processed {
        receipt_id: String,
        rows: usize,
        new_name: String,
    },

    /// Rows are durable but the file is still in the inbox. Must stay
    /// distinguishable from a fully failed file: re-running the inbox
    /// will save these rows again.
    SavedNotMoved {
        receipt_id: String,
        rows: usize,
        error: String,
    },

    /// Nothing was persisted for this file.
    Failed { stage: Stage, error: String },
}

/// Result of one batch run, one entry per inbox image in visit order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub entries: Vec<(String, FileOutcome)>,
}

impl RunReport {
    /// True when the inbox held no image files at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of files fully processed (saved and moved).
    pub fn processed(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, o)| matches!(o, FileOutcome::Processed { .. }))
            .count()
    }

    /// Number of files that persisted nothing.
    pub fn failed(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, o)| matches!(o, FileOutcome::Failed { .. }))
            .count()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (file, outcome) in &self.entries {
            if !first {
                writeln!(f)?;
            }
            first = false;
            match outcome {
                FileOutcome::Processed {
                    receipt_id,
                    rows,
                    new_name,
                } => write!(
                    f,
                    "{file}: Saved {rows} row(s) with Receipt ID {receipt_id}. | Moved to {new_name}"
                )?,
                FileOutcome::SavedNotMoved {
                    receipt_id,
                    rows,
                    error,
                } => write!(
                    f,
                    "{file}: Saved {rows} row(s) with Receipt ID {receipt_id} but failed to move file: {error}"
                )?,
                FileOutcome::Failed { stage, error } => {
                    write!(f, "Failed {file} during {stage}: {error}")?
                }
            }
        }
        Ok(())
    }
}

/// Process every image in the inbox through the full pipeline.
pub async fn process(ctx: &PipelineContext) -> Result<RunReport> {
    let files = inbox_files(&ctx.config.inbox.inbox_dir)?;

    info!("Processing {} inbox file(s)", files.len());

    let mut report = RunReport::default();

    for path in files {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        let outcome = process_file(ctx, &path, &filename).await;
        if let FileOutcome::Failed { stage, error } = &outcome {
            warn!("{} failed during {}: {}", filename, stage, error);
        }
        report.entries.push((filename, outcome));
    }

    Ok(report)
}

async fn process_file(ctx: &PipelineContext, path: &Path, filename: &str) -> FileOutcome {
    let text = match pipeline::extract_text(ctx, path) {
        Ok(text) => text,
        Err(e) => {
            return FileOutcome::Failed {
                stage: Stage::Extracting,
                error: e.to_string(),
            };
        }
    };

    let receipt = match pipeline::parse_text(ctx, &text).await {
        Ok(receipt) => receipt,
        Err(e) => {
            return FileOutcome::Failed {
                stage: Stage::Parsing,
                error: e.to_string(),
            };
        }
    };

    let saved = match ledger::persist(ctx.ledger.as_ref(), &receipt) {
        Ok(saved) => saved,
        Err(e) => {
            return FileOutcome::Failed {
                stage: Stage::Persisting,
                error: e.to_string(),
            };
        }
    };

    // Rows are durable from here on; a move failure must not read as a
    // fully failed file.
    let new_name = processed_name(&receipt, filename);
    let dest = ctx.config.inbox.processed_dir.join(&new_name);
    match relocate(path, &dest) {
        Ok(()) => FileOutcome::Processed {
            receipt_id: saved.receipt_id,
            rows: saved.rows,
            new_name,
        },
        Err(e) => FileOutcome::SavedNotMoved {
            receipt_id: saved.receipt_id,
            rows: saved.rows,
            error: e.to_string(),
        },
    }
}

/// List inbox image files, sorted by name so reports are deterministic.
fn inbox_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_receipt_image(path))
        .collect();
    files.sort();
    Ok(files)
}

fn is_receipt_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Build the processed-side filename for a receipt image.
///
/// The store name is filtered down to alphanumeric characters so the
/// result stays filesystem-safe; a receipt without a usable date gets
/// today's date instead.
fn processed_name(receipt: &Receipt, filename: &str) -> String {
    let safe_store: String = receipt
        .store_name
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect();

    let date = if receipt.purchase_date == DEFAULT_DATE {
        chrono::Local::now().format("%Y-%m-%d").to_string()
    } else {
        receipt.purchase_date.clone()
    };

    format!("{safe_store}_{date}_{filename}")
}

/// Move a file, falling back to copy+remove across filesystems.
fn relocate(src: &Path, dest: &Path) -> std::io::Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(src, dest)?;
            fs::remove_file(src)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use async_trait::async_trait;

    use crate::error::{ModelError, OcrError};
    use crate::ledger::testing::MemoryLedger;
    use crate::llm::StructuredExtractor;
    use crate::models::config::SpenseConfig;
    use crate::models::receipt::DEFAULT_STORE;
    use crate::ocr::TextExtractor;

    use super::*;

    /// OCR double: reads the file content as one fragment; a file holding
    /// the sentinel "unreadable" fails extraction.
    struct StubOcr;

    impl TextExtractor for StubOcr {
        fn extract(&self, path: &Path) -> std::result::Result<Vec<String>, OcrError> {
            if !path.exists() {
                return Err(OcrError::NotFound(path.to_path_buf()));
            }
            let content = fs::read_to_string(path)
                .map_err(|e| OcrError::InvalidImage(e.to_string()))?;
            if content.trim() == "unreadable" {
                return Err(OcrError::Extraction("no text detected".to_string()));
            }
            Ok(vec![content])
        }
    }

    /// Model double: echoes the OCR text back as the raw model response.
    struct EchoLlm;

    #[async_trait]
    impl StructuredExtractor for EchoLlm {
        async fn extract_structured(
            &self,
            text: &str,
        ) -> std::result::Result<String, ModelError> {
            Ok(text.to_string())
        }
    }

    struct Fixture {
        ctx: PipelineContext,
        inbox_dir: PathBuf,
        processed_dir: PathBuf,
        _tmp: tempfile::TempDir,
    }

    fn fixture() -> Fixture {
        fixture_with_ledger(Box::new(MemoryLedger::new()))
    }

    fn fixture_with_ledger(ledger: Box<dyn crate::ledger::LedgerStore>) -> Fixture {
        let tmp = tempfile::tempdir().unwrap();
        let inbox_dir = tmp.path().join("inbox");
        let processed_dir = tmp.path().join("processed");
        fs::create_dir_all(&inbox_dir).unwrap();
        fs::create_dir_all(&processed_dir).unwrap();

        let mut config = SpenseConfig::default();
        config.inbox.inbox_dir = inbox_dir.clone();
        config.inbox.processed_dir = processed_dir.clone();

        let ctx =
            PipelineContext::with_parts(config, Box::new(StubOcr), Box::new(EchoLlm), ledger);

        Fixture {
            ctx,
            inbox_dir,
            processed_dir,
            _tmp: tmp,
        }
    }

    fn write_inbox_file(fixture: &Fixture, name: &str, content: &str) {
        fs::write(fixture.inbox_dir.join(name), content).unwrap();
    }

    const VALID_RECEIPT: &str = r#"```json
{"store_name": "Best Buy", "bill_purchase_date": "2025-02-02", "total_cost": 416.36,
 "tax_amount": 42.96,
 "items": [{"name": "Sony Earbuds", "price": 373.40, "category": "Electronics"}]}
```"#;

    #[tokio::test]
    async fn test_empty_inbox_yields_empty_report() {
        let fixture = fixture();
        let report = process(&fixture.ctx).await.unwrap();
        assert!(report.is_empty());
        assert_eq!(report.to_string(), "");
    }

    #[tokio::test]
    async fn test_successful_file_is_saved_and_relocated() {
        let fixture = fixture();
        write_inbox_file(&fixture, "receipt1.png", VALID_RECEIPT);

        let report = process(&fixture.ctx).await.unwrap();

        assert_eq!(report.entries.len(), 1);
        let (file, outcome) = &report.entries[0];
        assert_eq!(file, "receipt1.png");
        match outcome {
            FileOutcome::Processed {
                rows, new_name, ..
            } => {
                assert_eq!(*rows, 1);
                assert_eq!(new_name, "BestBuy_2025-02-02_receipt1.png");
                assert!(fixture.processed_dir.join(new_name).exists());
                assert!(!fixture.inbox_dir.join("receipt1.png").exists());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_store_punctuation_is_stripped_from_new_name() {
        let fixture = fixture();
        write_inbox_file(
            &fixture,
            "r.jpg",
            r#"{"store_name": "Best Buy!!", "bill_purchase_date": "2025-02-02", "total_cost": 1}"#,
        );

        let report = process(&fixture.ctx).await.unwrap();

        match &report.entries[0].1 {
            FileOutcome::Processed { new_name, .. } => {
                assert_eq!(new_name, "BestBuy_2025-02-02_r.jpg");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_mixed_inbox_isolates_failures_per_file() {
        let fixture = fixture();
        write_inbox_file(&fixture, "a_good.png", VALID_RECEIPT);
        write_inbox_file(&fixture, "b_unreadable.jpg", "unreadable");
        write_inbox_file(&fixture, "c_malformed.jpeg", "I could not find any JSON here.");
        write_inbox_file(&fixture, "notes.txt", "not an image");

        let report = process(&fixture.ctx).await.unwrap();

        // One line per image file, in filename order; the .txt is ignored.
        assert_eq!(report.entries.len(), 3);
        assert_eq!(report.processed(), 1);
        assert_eq!(report.failed(), 2);

        assert!(matches!(
            report.entries[0].1,
            FileOutcome::Processed { .. }
        ));
        match &report.entries[1].1 {
            FileOutcome::Failed { stage, .. } => assert_eq!(*stage, Stage::Extracting),
            other => panic!("unexpected outcome: {other:?}"),
        }
        match &report.entries[2].1 {
            FileOutcome::Failed { stage, .. } => assert_eq!(*stage, Stage::Parsing),
            other => panic!("unexpected outcome: {other:?}"),
        }

        // Failed files stay in the inbox.
        assert!(fixture.inbox_dir.join("b_unreadable.jpg").exists());
        assert!(fixture.inbox_dir.join("c_malformed.jpeg").exists());

        let report_text = report.to_string();
        assert_eq!(report_text.lines().count(), 3);
        assert!(report_text.contains("Failed b_unreadable.jpg during extracting:"));
        assert!(report_text.contains("Failed c_malformed.jpeg during parsing:"));
    }

    #[tokio::test]
    async fn test_persist_failure_leaves_file_in_inbox() {
        let fixture = fixture_with_ledger(Box::new(MemoryLedger::failing()));
        write_inbox_file(&fixture, "receipt1.png", VALID_RECEIPT);

        let report = process(&fixture.ctx).await.unwrap();

        match &report.entries[0].1 {
            FileOutcome::Failed { stage, .. } => assert_eq!(*stage, Stage::Persisting),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(fixture.inbox_dir.join("receipt1.png").exists());
    }

    #[tokio::test]
    async fn test_move_failure_is_distinguishable_from_full_failure() {
        let mut fixture = fixture();
        // Point relocation at a directory that does not exist.
        fixture.ctx.config.inbox.processed_dir = fixture.processed_dir.join("missing/nested");
        write_inbox_file(&fixture, "receipt1.png", VALID_RECEIPT);

        let report = process(&fixture.ctx).await.unwrap();

        match &report.entries[0].1 {
            FileOutcome::SavedNotMoved { rows, .. } => assert_eq!(*rows, 1),
            other => panic!("unexpected outcome: {other:?}"),
        }
        // The rows are durable even though the file never moved.
        assert!(fixture.inbox_dir.join("receipt1.png").exists());
        let text = report.to_string();
        assert!(text.contains("but failed to move file"));
    }

    #[tokio::test]
    async fn test_extension_filter_is_case_insensitive() {
        let fixture = fixture();
        write_inbox_file(&fixture, "UPPER.PNG", VALID_RECEIPT);

        let report = process(&fixture.ctx).await.unwrap();
        assert_eq!(report.entries.len(), 1);
        assert!(matches!(
            report.entries[0].1,
            FileOutcome::Processed { .. }
        ));
    }

    #[tokio::test]
    async fn test_receipt_without_items_saves_placeholder_row() {
        let fixture = fixture();
        write_inbox_file(
            &fixture,
            "bare.png",
            r#"{"store_name": "Kiosk", "bill_purchase_date": "2025-03-01", "total_cost": 9.5}"#,
        );

        let report = process(&fixture.ctx).await.unwrap();
        match &report.entries[0].1 {
            FileOutcome::Processed { rows, .. } => assert_eq!(*rows, 1),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_processed_name_falls_back_to_today_for_missing_date() {
        let receipt = Receipt {
            store_name: DEFAULT_STORE.to_string(),
            purchase_date: DEFAULT_DATE.to_string(),
            total_cost: Default::default(),
            tax_amount: Default::default(),
            items: vec![],
        };

        let name = processed_name(&receipt, "x.png");
        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        assert_eq!(name, format!("UnknownStore_{today}_x.png"));
    }
}
