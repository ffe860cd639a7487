use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
    Refunded,
    Disputed,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 5] = [
        PaymentStatus::Pending,
        PaymentStatus::Completed,
        PaymentStatus::Failed,
        PaymentStatus::Refunded,
        PaymentStatus::Disputed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
            PaymentStatus::Disputed => "disputed",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                let allowed: Vec<&str> =
                    PaymentStatus::ALL.iter().map(PaymentStatus::as_str).collect();
                DomainError::validation(format!(
                    "Invalid status. Allowed statuses are: {}",
                    allowed.join(", ")
                ))
            })
    }
}

/// A payment attempt. Order and user are referenced by value only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i32,
    pub order_id: String,
    pub user_id: String,
    pub amount: f64,
    pub currency: String,
    pub payment_method: String,
    pub transaction_id: String,
    pub status: PaymentStatus,
    pub payment_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated payment awaiting an outcome and persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub order_id: String,
    pub user_id: String,
    pub amount: f64,
    pub currency: String,
    pub payment_method: String,
    pub transaction_id: String,
    pub status: PaymentStatus,
}

impl NewPayment {
    /// Validate the amount and assign a fresh transaction id.
    pub fn new(
        order_id: String,
        user_id: String,
        amount: f64,
        currency: String,
        payment_method: String,
    ) -> Result<Self, DomainError> {
        if !(amount > 0.0) {
            return Err(DomainError::validation("Amount must be positive"));
        }

        Ok(Self {
            order_id,
            user_id,
            amount,
            currency,
            payment_method,
            transaction_id: Uuid::new_v4().to_string(),
            status: PaymentStatus::Pending,
        })
    }

    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.status = status;
        self
    }
}
