use bookstore_core::domain::{
    CatalogItem, NewCatalogItem, NewOrder, NewOrderItem, NewPayment, NewUser, OrderStatus,
    PaymentStatus, Role, User,
};
use bookstore_core::error::RepoError;
use bookstore_core::ports::{
    BaseRepository, CatalogRepository, OrderRepository, PaymentRepository, UserRepository,
};
use sea_orm::{DatabaseBackend, DbConn, MockDatabase};

use super::*;

async fn memory_db() -> DbConn {
    connect(&DatabaseConfig::in_memory()).await.unwrap()
}

fn new_user(username: &str, email: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: "hash".to_string(),
        first_name: None,
        last_name: None,
        role: Role::Customer,
        profile_pic: None,
    }
}

fn item(book_id: &str, quantity: i64, price: f64) -> NewOrderItem {
    NewOrderItem::new(Some(book_id.to_string()), Some(quantity), Some(price)).unwrap()
}

#[tokio::test]
async fn test_find_catalog_item_by_id_with_mock() {
    let now = chrono::Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![entity::catalog_item::Model {
            id: 3,
            title: "Dune".to_owned(),
            author: "Frank Herbert".to_owned(),
            isbn: "9780441013593".to_owned(),
            price: 9.5,
            stock_quantity: 4,
            description: None,
            publisher: None,
            cover_image_filename: None,
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let repo = SqlCatalogRepository::new(db);

    let result: Option<CatalogItem> = repo.find_by_id(3).await.unwrap();

    let item = result.unwrap();
    assert_eq!(item.title, "Dune");
    assert_eq!(item.id, 3);
}

#[tokio::test]
async fn test_user_create_and_lookup() {
    let db = memory_db().await;
    init_user_schema(&db).await.unwrap();
    let repo = SqlUserRepository::new(db);

    let created = repo
        .create(new_user("reader", "reader@example.com"))
        .await
        .unwrap();
    assert!(!created.is_verified);
    assert_eq!(created.role, Role::Customer);

    let by_login = repo.find_by_login("reader@example.com").await.unwrap();
    assert_eq!(by_login.map(|u| u.id), Some(created.id));
    let by_name = repo.find_by_login("reader").await.unwrap();
    assert_eq!(by_name.map(|u| u.id), Some(created.id));
    assert!(repo.find_by_username("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_user_unique_email_is_a_constraint_error() {
    let db = memory_db().await;
    init_user_schema(&db).await.unwrap();
    let repo = SqlUserRepository::new(db);

    repo.create(new_user("a", "same@example.com")).await.unwrap();
    let err = repo
        .create(new_user("b", "same@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Constraint(_)));
}

#[tokio::test]
async fn test_user_update_persists_verification() {
    let db = memory_db().await;
    init_user_schema(&db).await.unwrap();
    let repo = SqlUserRepository::new(db);

    let mut user = repo
        .create(new_user("reader", "reader@example.com"))
        .await
        .unwrap();
    user.mark_verified(true);
    repo.update(user.clone()).await.unwrap();

    let stored: User = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert!(stored.is_verified);
    assert_eq!(stored.password_hash, "hash");
}

#[tokio::test]
async fn test_delete_missing_row_is_not_found() {
    let db = memory_db().await;
    init_catalog_schema(&db).await.unwrap();
    let repo = SqlCatalogRepository::new(db);

    let err = BaseRepository::<CatalogItem>::delete(&repo, 99)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound));
}

#[tokio::test]
async fn test_catalog_find_all_in_id_order() {
    let db = memory_db().await;
    init_catalog_schema(&db).await.unwrap();
    let repo = SqlCatalogRepository::new(db);

    for isbn in ["111", "222"] {
        let item = NewCatalogItem::new(
            format!("Book {isbn}"),
            "Author".to_string(),
            isbn.to_string(),
            12.0,
            Some(1),
        )
        .unwrap();
        repo.create(item).await.unwrap();
    }

    let all: Vec<CatalogItem> = repo.find_all().await.unwrap();
    let isbns: Vec<&str> = all.iter().map(|i| i.isbn.as_str()).collect();
    assert_eq!(isbns, vec!["111", "222"]);
    assert!(repo.find_by_isbn("222").await.unwrap().is_some());
}

#[tokio::test]
async fn test_order_create_persists_items_and_total() {
    let db = memory_db().await;
    init_order_schema(&db).await.unwrap();
    let repo = SqlOrderRepository::new(db);

    let order = NewOrder::new(
        "42".to_string(),
        "1 Library Lane".to_string(),
        vec![item("b1", 2, 9.99), item("b2", 1, 5.00)],
    )
    .unwrap();
    let created = repo.create(order).await.unwrap();

    assert!((created.total_amount - 24.98).abs() < 1e-9);
    assert_eq!(created.status, OrderStatus::Pending);
    assert_eq!(created.items.len(), 2);

    let stored = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(stored.items.len(), 2);
    assert_eq!(stored.items[0].book_id, "b1");
}

#[tokio::test]
async fn test_order_delete_removes_items() {
    let db = memory_db().await;
    init_order_schema(&db).await.unwrap();
    let repo = SqlOrderRepository::new(db);

    let order = NewOrder::new(
        "42".to_string(),
        "1 Library Lane".to_string(),
        vec![item("b1", 1, 3.0)],
    )
    .unwrap();
    let created = repo.create(order).await.unwrap();

    repo.delete(created.id).await.unwrap();

    assert!(repo.find_by_id(created.id).await.unwrap().is_none());
    assert!(repo.items_for_order(created.id).await.unwrap().is_empty());
    assert!(matches!(
        repo.delete(created.id).await.unwrap_err(),
        RepoError::NotFound
    ));
}

#[tokio::test]
async fn test_order_status_update() {
    let db = memory_db().await;
    init_order_schema(&db).await.unwrap();
    let repo = SqlOrderRepository::new(db);

    let order = NewOrder::new(
        "7".to_string(),
        "Somewhere".to_string(),
        vec![item("b1", 1, 3.0)],
    )
    .unwrap();
    let created = repo.create(order).await.unwrap();

    let updated = repo
        .update_status(created.id, OrderStatus::Shipped)
        .await
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Shipped);
    assert_eq!(updated.items.len(), 1);

    let err = repo
        .update_status(404, OrderStatus::Shipped)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound));
}

#[tokio::test]
async fn test_payment_lookup_by_order_and_status_update() {
    let db = memory_db().await;
    init_payment_schema(&db).await.unwrap();
    let repo = SqlPaymentRepository::new(db);

    let payment = NewPayment::new(
        "17".to_string(),
        "4".to_string(),
        24.98,
        "USD".to_string(),
        "credit_card".to_string(),
    )
    .unwrap()
    .with_status(PaymentStatus::Completed);
    let created = repo.create(payment).await.unwrap();

    let found = repo.find_by_order("17").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].transaction_id, created.transaction_id);
    assert!(repo.find_by_order("18").await.unwrap().is_empty());

    let refunded = repo
        .update_status(created.id, PaymentStatus::Refunded)
        .await
        .unwrap();
    assert_eq!(refunded.status, PaymentStatus::Refunded);
}
