//! Persisting a receipt as ledger rows.

use tracing::info;
use uuid::Uuid;

use crate::error::LedgerError;
use crate::models::receipt::{DEFAULT_CATEGORY, LedgerRow, LineItem, PLACEHOLDER_ITEM_NAME, Receipt};

use super::store::LedgerStore;

/// Length of a generated receipt identity token.
const RECEIPT_ID_LEN: usize = 8;

/// Outcome of persisting one receipt.
#[derive(Debug, Clone)]
pub struct SavedReceipt {
    /// Identity token shared by every row of this receipt.
    pub receipt_id: String,

    /// Number of rows appended.
    pub rows: usize,
}

/// Fresh random identity. Deliberately not derived from receipt content:
/// the same receipt saved twice gets two identities.
fn generate_receipt_id() -> String {
    Uuid::new_v4().simple().to_string()[..RECEIPT_ID_LEN].to_string()
}

/// Fan `receipt` out into one row per item and append them in one batch.
///
/// A receipt with no items yields exactly one placeholder row carrying the
/// receipt total as its price, so every persisted receipt is visible in
/// the ledger.
pub fn persist(store: &dyn LedgerStore, receipt: &Receipt) -> Result<SavedReceipt, LedgerError> {
    let receipt_id = generate_receipt_id();

    let placeholder;
    let items: &[LineItem] = if receipt.items.is_empty() {
        placeholder = [LineItem {
            name: PLACEHOLDER_ITEM_NAME.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            price: receipt.total_cost,
        }];
        &placeholder
    } else {
        &receipt.items
    };

    let rows: Vec<LedgerRow> = items
        .iter()
        .map(|item| LedgerRow {
            receipt_id: receipt_id.clone(),
            date: receipt.purchase_date.clone(),
            store_name: receipt.store_name.clone(),
            item_name: item.name.clone(),
            category: item.category.clone(),
            price: item.price,
            tax_amount: receipt.tax_amount,
            total_cost: receipt.total_cost,
        })
        .collect();

    store.append_rows(&rows)?;

    info!("Persisted receipt {} as {} row(s)", receipt_id, rows.len());

    Ok(SavedReceipt {
        receipt_id,
        rows: rows.len(),
    })
}
