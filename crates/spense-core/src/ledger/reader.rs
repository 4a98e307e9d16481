//! Reading recent rows back from the ledger.

use crate::error::LedgerError;

use super::store::LedgerStore;

/// Render the most recent `limit` data rows, oldest first.
///
/// Returns `Ok(None)` when the ledger holds no data rows yet; the caller
/// reports that as "no receipts" rather than as an error.
pub fn recent(store: &dyn LedgerStore, limit: usize) -> Result<Option<Vec<String>>, LedgerError> {
    let records = store.read_all()?;

    // First record is the header.
    let rows = records.get(1..).unwrap_or_default();
    if rows.is_empty() {
        return Ok(None);
    }

    let start = rows.len().saturating_sub(limit);
    let lines = rows[start..].iter().map(render_row).collect();

    Ok(Some(lines))
}

fn render_row(row: &Vec<String>) -> String {
    let field = |i: usize| row.get(i).map(String::as_str).unwrap_or("");
    format!(
        "{} | {} | {} | Total: {}",
        field(0),
        field(1),
        field(2),
        field(7)
    )
}
