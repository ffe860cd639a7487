//! Domain entities - the core business objects.

mod catalog;
mod order;
mod payment;
mod user;

pub use catalog::{CatalogChanges, CatalogItem, NewCatalogItem};
pub use order::{NewOrder, NewOrderItem, Order, OrderItem, OrderStatus};
pub use payment::{NewPayment, Payment, PaymentStatus};
pub use user::{NewUser, Role, User, UserChanges};

/// Treat blank strings the same as absent ones.
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
