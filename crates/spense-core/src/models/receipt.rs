//! Receipt data models and the persisted ledger row layout.

use rust_decimal::Decimal;
use serde::Serialize;

/// Store name used when the model response omits one.
pub const DEFAULT_STORE: &str = "Unknown Store";

/// Purchase date used when the model response omits one.
pub const DEFAULT_DATE: &str = "N/A";

/// Line-item name used when an item omits one.
pub const DEFAULT_ITEM_NAME: &str = "Unknown";

/// Line-item category used when an item omits one.
pub const DEFAULT_CATEGORY: &str = "Misc";

/// Item name for the row synthesized when a receipt lists no items.
pub const PLACEHOLDER_ITEM_NAME: &str = "Unspecified Item";

/// A normalized purchase receipt.
///
/// Serializes with the same field names the model is instructed to emit,
/// so a parsed receipt can be fed back into the save operation unchanged.
#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    /// Store or merchant name.
    pub store_name: String,

    /// Purchase date, preferably YYYY-MM-DD. Kept as free text, never
    /// validated.
    #[serde(rename = "bill_purchase_date")]
    pub purchase_date: String,

    /// Grand total on the receipt.
    pub total_cost: Decimal,

    /// Tax amount, zero when the receipt shows none.
    pub tax_amount: Decimal,

    /// Purchased items. May be empty when extraction found none.
    pub items: Vec<LineItem>,
}

/// One purchased product or service within a receipt.
#[derive(Debug, Clone, Serialize)]
pub struct LineItem {
    /// Product or service name.
    pub name: String,

    /// Expense category.
    pub category: String,

    /// Item price.
    pub price: Decimal,
}

/// Ledger column names, in persisted order.
pub const LEDGER_COLUMNS: [&str; 8] = [
    "receipt_id",
    "date",
    "store_name",
    "item_name",
    "category",
    "price",
    "tax_amount",
    "total_cost",
];

/// One persisted ledger row: a single line item plus the shared fields of
/// the receipt it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRow {
    /// Identity token shared by every row of one receipt.
    pub receipt_id: String,

    /// Purchase date of the receipt.
    pub date: String,

    /// Store name of the receipt.
    pub store_name: String,

    /// Item name.
    pub item_name: String,

    /// Item category.
    pub category: String,

    /// Item price.
    pub price: Decimal,

    /// Receipt-level tax amount.
    pub tax_amount: Decimal,

    /// Receipt-level grand total.
    pub total_cost: Decimal,
}

impl LedgerRow {
    /// Positional record in [`LEDGER_COLUMNS`] order.
    pub fn to_record(&self) -> [String; 8] {
        [
            self.receipt_id.clone(),
            self.date.clone(),
            self.store_name.clone(),
            self.item_name.clone(),
            self.category.clone(),
            self.price.to_string(),
            self.tax_amount.to_string(),
            self.total_cost.to_string(),
        ]
    }
}
