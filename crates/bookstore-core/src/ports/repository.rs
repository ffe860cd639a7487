use async_trait::async_trait;

use crate::domain::{
    CatalogItem, NewCatalogItem, NewOrder, NewPayment, NewUser, Order, OrderItem, OrderStatus,
    Payment, PaymentStatus, User,
};
use crate::error::RepoError;

/// Generic repository trait defining the shared read/delete operations.
#[async_trait]
pub trait BaseRepository<T>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: i32) -> Result<Option<T>, RepoError>;

    /// List every entity, oldest first.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Delete an entity by its ID. `RepoError::NotFound` if nothing was deleted.
    async fn delete(&self, id: i32) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Match either the username or the email.
    async fn find_by_login(&self, username_or_email: &str) -> Result<Option<User>, RepoError>;

    async fn create(&self, user: NewUser) -> Result<User, RepoError>;

    async fn update(&self, user: User) -> Result<User, RepoError>;
}

#[async_trait]
pub trait CatalogRepository: BaseRepository<CatalogItem> {
    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<CatalogItem>, RepoError>;

    async fn create(&self, item: NewCatalogItem) -> Result<CatalogItem, RepoError>;

    async fn update(&self, item: CatalogItem) -> Result<CatalogItem, RepoError>;
}

/// Orders own their items, so every operation here spans both tables.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist the order and all of its items atomically.
    async fn create(&self, order: NewOrder) -> Result<Order, RepoError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, RepoError>;

    async fn find_all(&self) -> Result<Vec<Order>, RepoError>;

    async fn items_for_order(&self, order_id: i32) -> Result<Vec<OrderItem>, RepoError>;

    async fn update_status(&self, id: i32, status: OrderStatus) -> Result<Order, RepoError>;

    /// Delete the order and, with it, all of its items.
    async fn delete(&self, id: i32) -> Result<(), RepoError>;
}

#[async_trait]
pub trait PaymentRepository: BaseRepository<Payment> {
    async fn create(&self, payment: NewPayment) -> Result<Payment, RepoError>;

    async fn find_by_order(&self, order_id: &str) -> Result<Vec<Payment>, RepoError>;

    async fn update_status(&self, id: i32, status: PaymentStatus) -> Result<Payment, RepoError>;
}
