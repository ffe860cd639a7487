//! Database connection management, schema setup and SeaORM repositories.

mod base;
mod catalog_repo;
mod connections;
pub mod entity;
mod order_repo;
mod payment_repo;
mod schema;
mod user_repo;

pub use base::SqlRepository;
pub use catalog_repo::SqlCatalogRepository;
pub use connections::{DatabaseConfig, connect};
pub use order_repo::SqlOrderRepository;
pub use payment_repo::SqlPaymentRepository;
pub use schema::{
    init_catalog_schema, init_order_schema, init_payment_schema, init_user_schema,
};
pub use user_repo::SqlUserRepository;

#[cfg(test)]
mod tests;
