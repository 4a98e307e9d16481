//! Receipt normalization from parsed model output.

use rust_decimal::Decimal;
use serde_json::Value;

use crate::models::receipt::{
    DEFAULT_CATEGORY, DEFAULT_DATE, DEFAULT_ITEM_NAME, DEFAULT_STORE, LineItem, Receipt,
};

/// Build a normalized [`Receipt`] from a parsed model payload.
///
/// Never fails: a missing or mistyped field degrades to its default, and
/// a missing or non-array `items` yields an empty item list.
pub fn normalize(value: &Value) -> Receipt {
    let items = value
        .get("items")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(normalize_item).collect())
        .unwrap_or_default();

    Receipt {
        store_name: string_field(value, "store_name", DEFAULT_STORE),
        purchase_date: string_field(value, "bill_purchase_date", DEFAULT_DATE),
        total_cost: decimal_field(value, "total_cost"),
        tax_amount: decimal_field(value, "tax_amount"),
        items,
    }
}

fn normalize_item(value: &Value) -> LineItem {
    LineItem {
        name: string_field(value, "name", DEFAULT_ITEM_NAME),
        category: string_field(value, "category", DEFAULT_CATEGORY),
        price: decimal_field(value, "price"),
    }
}

fn string_field(value: &Value, key: &str, default: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}

fn decimal_field(value: &Value, key: &str) -> Decimal {
    value
        .get(key)
        .cloned()
        .and_then(|v| serde_json::from_value::<Decimal>(v).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_full_payload() {
        let value = json!({
            "store_name": "Best Buy",
            "bill_purchase_date": "2025-02-02",
            "total_cost": 416.36,
            "tax_amount": 42.96,
            "items": [
                {"name": "Sony Earbuds", "price": 373.40, "category": "Electronics"}
            ]
        });

        let receipt = normalize(&value);

        assert_eq!(receipt.store_name, "Best Buy");
        assert_eq!(receipt.purchase_date, "2025-02-02");
        assert_eq!(receipt.total_cost, "416.36".parse::<Decimal>().unwrap());
        assert_eq!(receipt.tax_amount, "42.96".parse::<Decimal>().unwrap());
        assert_eq!(receipt.items.len(), 1);
        assert_eq!(receipt.items[0].name, "Sony Earbuds");
        assert_eq!(receipt.items[0].category, "Electronics");
        assert_eq!(receipt.items[0].price, "373.40".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_empty_payload_degrades_to_defaults() {
        let receipt = normalize(&json!({}));

        assert_eq!(receipt.store_name, DEFAULT_STORE);
        assert_eq!(receipt.purchase_date, DEFAULT_DATE);
        assert_eq!(receipt.total_cost, Decimal::ZERO);
        assert_eq!(receipt.tax_amount, Decimal::ZERO);
        assert!(receipt.items.is_empty());
    }

    #[test]
    fn test_mistyped_fields_degrade_to_defaults() {
        let value = json!({
            "store_name": 7,
            "total_cost": "not a number",
            "items": "none"
        });

        let receipt = normalize(&value);

        assert_eq!(receipt.store_name, DEFAULT_STORE);
        assert_eq!(receipt.total_cost, Decimal::ZERO);
        assert!(receipt.items.is_empty());
    }

    #[test]
    fn test_partial_item_gets_defaults() {
        let value = json!({
            "items": [{"price": 4.20}]
        });

        let receipt = normalize(&value);

        assert_eq!(receipt.items.len(), 1);
        assert_eq!(receipt.items[0].name, DEFAULT_ITEM_NAME);
        assert_eq!(receipt.items[0].category, DEFAULT_CATEGORY);
        assert_eq!(receipt.items[0].price, "4.2".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_blank_strings_count_as_missing() {
        let value = json!({"store_name": "   ", "bill_purchase_date": ""});

        let receipt = normalize(&value);

        assert_eq!(receipt.store_name, DEFAULT_STORE);
        assert_eq!(receipt.purchase_date, DEFAULT_DATE);
    }

    #[test]
    fn test_amounts_parse_from_strings_too() {
        // Some model responses quote their numbers.
        let value = json!({"total_cost": "19.99"});

        let receipt = normalize(&value);

        assert_eq!(receipt.total_cost, "19.99".parse::<Decimal>().unwrap());
    }
}
