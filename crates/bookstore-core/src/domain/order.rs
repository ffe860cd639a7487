use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Cancelled,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Cancelled,
        OrderStatus::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Delivered => "delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                let allowed: Vec<&str> = OrderStatus::ALL.iter().map(OrderStatus::as_str).collect();
                DomainError::validation(format!(
                    "Invalid status. Allowed statuses are: {}",
                    allowed.join(", ")
                ))
            })
    }
}

/// An order together with the items it exclusively owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i32,
    pub user_id: String,
    pub order_date: DateTime<Utc>,
    /// Computed once at creation; never recomputed.
    pub total_amount: f64,
    pub status: OrderStatus,
    pub shipping_address: String,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub book_id: String,
    pub quantity: i32,
    pub price_at_purchase: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated line item awaiting persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub book_id: String,
    pub quantity: i32,
    pub price_at_purchase: f64,
}

impl NewOrderItem {
    pub fn new(
        book_id: Option<String>,
        quantity: Option<i64>,
        price_at_purchase: Option<f64>,
    ) -> Result<Self, DomainError> {
        let (Some(book_id), Some(quantity), Some(price_at_purchase)) =
            (super::present(book_id), quantity, price_at_purchase)
        else {
            return Err(DomainError::validation(
                "Each item must have book_id, quantity, and price_at_purchase",
            ));
        };

        if quantity <= 0 || !(price_at_purchase > 0.0) {
            return Err(DomainError::validation(
                "Quantity and price_at_purchase must be positive for items",
            ));
        }
        let quantity = i32::try_from(quantity)
            .map_err(|_| DomainError::validation("Quantity is too large"))?;

        Ok(Self {
            book_id,
            quantity,
            price_at_purchase,
        })
    }

    pub fn subtotal(&self) -> f64 {
        f64::from(self.quantity) * self.price_at_purchase
    }
}

/// A validated order awaiting persistence. Always carries at least one item.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: String,
    pub shipping_address: String,
    pub items: Vec<NewOrderItem>,
}

impl NewOrder {
    pub fn new(
        user_id: String,
        shipping_address: String,
        items: Vec<NewOrderItem>,
    ) -> Result<Self, DomainError> {
        if items.is_empty() {
            return Err(DomainError::validation("Items must be a non-empty list"));
        }
        Ok(Self {
            user_id,
            shipping_address,
            items,
        })
    }

    pub fn total_amount(&self) -> f64 {
        self.items.iter().map(NewOrderItem::subtotal).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(book_id: &str, quantity: i64, price: f64) -> Result<NewOrderItem, DomainError> {
        NewOrderItem::new(Some(book_id.to_string()), Some(quantity), Some(price))
    }

    #[test]
    fn test_total_amount_sums_line_items() {
        let order = NewOrder::new(
            "42".to_string(),
            "1 Library Lane".to_string(),
            vec![item("b1", 2, 9.99).unwrap(), item("b2", 1, 5.00).unwrap()],
        )
        .unwrap();

        assert!((order.total_amount() - 24.98).abs() < 1e-9);
    }

    #[test]
    fn test_item_rejects_non_positive_values() {
        let err = item("b2", -1, 5.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Quantity and price_at_purchase must be positive for items"
        );
        assert!(item("b2", 1, 0.0).is_err());
    }

    #[test]
    fn test_item_requires_all_fields() {
        let err = NewOrderItem::new(Some(" ".to_string()), Some(1), Some(1.0)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(NewOrderItem::new(Some("b1".to_string()), None, Some(1.0)).is_err());
    }

    #[test]
    fn test_order_requires_items() {
        let err = NewOrder::new("1".to_string(), "addr".to_string(), vec![]).unwrap_err();
        assert_eq!(err.to_string(), "Items must be a non-empty list");
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("shipped".parse::<OrderStatus>().unwrap(), OrderStatus::Shipped);
        assert!("lost".parse::<OrderStatus>().is_err());
    }
}
