//! Payment outcome port.

use crate::domain::{NewPayment, PaymentStatus};

/// Decides the outcome of a payment attempt.
///
/// Stands in for a real payment gateway integration.
pub trait PaymentOutcomeDecider: Send + Sync {
    fn decide(&self, payment: &NewPayment) -> PaymentStatus;
}
