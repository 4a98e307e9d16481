//! Append-only tabular ledger of persisted line items.

mod reader;
mod store;
mod writer;

pub use reader::recent;
pub use store::{CsvLedger, LedgerStore};
pub use writer::{SavedReceipt, persist};
