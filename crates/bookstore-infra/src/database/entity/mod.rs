//! SeaORM entity definitions, one module per table.

pub mod catalog_item;
pub mod order;
pub mod order_item;
pub mod payment;
pub mod user;
