//! Order Model

use serde::{Deserialize, Serialize};

use super::food_item::MealSlot;

/// A placed food order. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub account_id: i64,
    pub item_id: i64,
    pub meal: MealSlot,
    /// Calendar date (YYYY-MM-DD) the order is for
    pub date: String,
    pub count: i64,
    pub unit_price: f64,
    pub total_amount: f64,
    /// Encoded verification token
    pub qr_text: String,
    /// QR rendering of `qr_text` as a PNG data URL
    pub qr_code: Option<String>,
    pub created_at: i64,
}

/// Order joined with the name of the purchased item (history view)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderWithItem {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub order: Order,
    pub item_name: String,
}

/// Purchase request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    pub item_id: i64,
    pub meal: MealSlot,
    pub date: String,
    /// Unit price; the catalog price is used when absent
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default = "default_count")]
    pub count: i64,
}

fn default_count() -> i64 {
    1
}

/// Verification request carrying the scanned token text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyQrRequest {
    pub qr_string: String,
}

/// Verification outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyQrResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
}

impl VerifyQrResponse {
    pub fn valid(order: Order) -> Self {
        Self {
            valid: true,
            message: None,
            order: Some(order),
        }
    }

    pub fn not_found() -> Self {
        Self {
            valid: false,
            message: Some("Order not found".to_string()),
            order: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_order_request_defaults() {
        let req: PlaceOrderRequest =
            serde_json::from_str(r#"{"item_id":7,"meal":"dinner","date":"2025-01-02"}"#).unwrap();
        assert_eq!(req.count, 1);
        assert_eq!(req.amount, None);
        assert_eq!(req.meal, MealSlot::Dinner);
    }

    #[test]
    fn test_verify_response_not_found_has_no_order() {
        let json = serde_json::to_value(VerifyQrResponse::not_found()).unwrap();
        assert_eq!(json["valid"], false);
        assert!(json.get("order").is_none());
    }
}
