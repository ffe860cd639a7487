use serde::{Deserialize, Serialize};

use crate::lenient;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub user_id: Option<String>,
    pub shipping_address: Option<String>,
    pub items: Option<Vec<OrderItemRequest>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderItemRequest {
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub book_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub quantity: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub price_at_purchase: Option<f64>,
}

/// Body of the order and payment status endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_order_request_coerces_fields() {
        let request: CreateOrderRequest = serde_json::from_value(serde_json::json!({
            "user_id": 12,
            "shipping_address": "1 Library Lane",
            "items": [{"book_id": "b1", "quantity": "2", "price_at_purchase": 9.99}]
        }))
        .unwrap();

        assert_eq!(request.user_id.as_deref(), Some("12"));
        let items = request.items.unwrap();
        assert_eq!(items[0].quantity, Some(2));
        assert_eq!(items[0].price_at_purchase, Some(9.99));
    }
}
