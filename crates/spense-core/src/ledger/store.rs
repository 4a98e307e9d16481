//! Ledger storage backends.

use std::fs::OpenOptions;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::LedgerError;
use crate::models::receipt::{LEDGER_COLUMNS, LedgerRow};

/// Trait for the append-only tabular store behind the ledger.
///
/// The store owns the persisted rows; callers only append batches and
/// read the full table back. Nothing ever updates or deletes a row.
pub trait LedgerStore: Send + Sync {
    /// Append all `rows` in one batch.
    fn append_rows(&self, rows: &[LedgerRow]) -> Result<(), LedgerError>;

    /// Read every record, including the header row.
    fn read_all(&self) -> Result<Vec<Vec<String>>, LedgerError>;
}

/// Ledger store backed by a local CSV file.
pub struct CsvLedger {
    path: PathBuf,
}

impl CsvLedger {
    /// Open the ledger at `path`, creating it with a header row if absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        let path = path.into();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .map_err(|e| LedgerError::Persist(e.to_string()))?;
                }
            }

            let mut writer =
                csv::Writer::from_path(&path).map_err(|e| LedgerError::Persist(e.to_string()))?;
            writer
                .write_record(LEDGER_COLUMNS)
                .map_err(|e| LedgerError::Persist(e.to_string()))?;
            writer
                .flush()
                .map_err(|e| LedgerError::Persist(e.to_string()))?;

            info!("Created ledger file at {}", path.display());
        }

        Ok(Self { path })
    }
}

impl LedgerStore for CsvLedger {
    fn append_rows(&self, rows: &[LedgerRow]) -> Result<(), LedgerError> {
        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| LedgerError::Persist(e.to_string()))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        for row in rows {
            writer
                .write_record(row.to_record())
                .map_err(|e| LedgerError::Persist(e.to_string()))?;
        }
        writer
            .flush()
            .map_err(|e| LedgerError::Persist(e.to_string()))?;

        debug!("Appended {} row(s) to {}", rows.len(), self.path.display());

        Ok(())
    }

    fn read_all(&self) -> Result<Vec<Vec<String>>, LedgerError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| LedgerError::Read(e.to_string()))?;

        let mut records = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| LedgerError::Read(e.to_string()))?;
            records.push(record.iter().map(str::to_string).collect());
        }

        Ok(records)
    }
}
