//! Table creation from the entity definitions.

use sea_orm::{ConnectionTrait, DbConn, DbErr, EntityTrait, Schema};

use super::entity::{catalog_item, order, order_item, payment, user};

async fn ensure_table<E>(db: &DbConn, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let mut statement = Schema::new(backend).create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(backend.build(&statement)).await?;
    tracing::debug!(table = %entity.table_name(), "Table ready");
    Ok(())
}

pub async fn init_user_schema(db: &DbConn) -> Result<(), DbErr> {
    ensure_table(db, user::Entity).await
}

pub async fn init_catalog_schema(db: &DbConn) -> Result<(), DbErr> {
    ensure_table(db, catalog_item::Entity).await
}

/// Orders first: `order_items` references it.
pub async fn init_order_schema(db: &DbConn) -> Result<(), DbErr> {
    ensure_table(db, order::Entity).await?;
    ensure_table(db, order_item::Entity).await
}

pub async fn init_payment_schema(db: &DbConn) -> Result<(), DbErr> {
    ensure_table(db, payment::Entity).await
}
