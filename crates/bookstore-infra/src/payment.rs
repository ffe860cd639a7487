//! Payment outcome deciders.

use rand::Rng;

use bookstore_core::domain::{NewPayment, PaymentStatus};
use bookstore_core::ports::PaymentOutcomeDecider;

/// Simulated gateway: completes a payment with probability `success_rate`,
/// fails it otherwise.
#[derive(Debug, Clone)]
pub struct RandomOutcomeDecider {
    success_rate: f64,
}

impl RandomOutcomeDecider {
    pub fn new(success_rate: f64) -> Self {
        let success_rate = if success_rate.is_finite() {
            success_rate.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self { success_rate }
    }
}

impl Default for RandomOutcomeDecider {
    fn default() -> Self {
        Self::new(0.8)
    }
}

impl PaymentOutcomeDecider for RandomOutcomeDecider {
    fn decide(&self, payment: &NewPayment) -> PaymentStatus {
        let status = if rand::thread_rng().gen_bool(self.success_rate) {
            PaymentStatus::Completed
        } else {
            PaymentStatus::Failed
        };
        tracing::debug!(
            transaction_id = %payment.transaction_id,
            status = %status,
            "Simulated payment outcome"
        );
        status
    }
}

/// Always returns the same status.
#[derive(Debug, Clone, Copy)]
pub struct FixedOutcomeDecider(pub PaymentStatus);

impl PaymentOutcomeDecider for FixedOutcomeDecider {
    fn decide(&self, _payment: &NewPayment) -> PaymentStatus {
        self.0
    }
}
