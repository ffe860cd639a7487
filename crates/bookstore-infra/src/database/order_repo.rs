//! Order repository. Orders and their items change together, so every
//! multi-row mutation runs in one transaction.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, ModelTrait, NotSet, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use bookstore_core::domain::{NewOrder, Order, OrderItem, OrderStatus};
use bookstore_core::error::RepoError;
use bookstore_core::ports::OrderRepository;

use super::base::map_db_err;
use super::entity::order::{self, Entity as OrderEntity};
use super::entity::order_item::{self, Entity as OrderItemEntity};

pub struct SqlOrderRepository {
    db: DbConn,
}

impl SqlOrderRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderRepository for SqlOrderRepository {
    async fn create(&self, new_order: NewOrder) -> Result<Order, RepoError> {
        let now = Utc::now();
        let total_amount = new_order.total_amount();

        // Dropping `txn` on any early return rolls everything back.
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let order = order::ActiveModel {
            id: NotSet,
            user_id: Set(new_order.user_id),
            order_date: Set(now.into()),
            total_amount: Set(total_amount),
            status: Set(OrderStatus::Pending.to_string()),
            shipping_address: Set(new_order.shipping_address),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&txn)
        .await
        .map_err(map_db_err)?;

        let mut items = Vec::with_capacity(new_order.items.len());
        for item in new_order.items {
            let row = order_item::ActiveModel {
                id: NotSet,
                order_id: Set(order.id),
                book_id: Set(item.book_id),
                quantity: Set(item.quantity),
                price_at_purchase: Set(item.price_at_purchase),
                created_at: Set(now.into()),
                updated_at: Set(now.into()),
            }
            .insert(&txn)
            .await
            .map_err(map_db_err)?;
            items.push(row);
        }

        txn.commit().await.map_err(map_db_err)?;
        tracing::debug!(order_id = order.id, items = items.len(), "Order persisted");

        Ok(order.into_order(items))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, RepoError> {
        let Some(order) = OrderEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let items = order
            .find_related(OrderItemEntity)
            .order_by_asc(order_item::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(Some(order.into_order(items)))
    }

    async fn find_all(&self) -> Result<Vec<Order>, RepoError> {
        let rows = OrderEntity::find()
            .order_by_asc(order::Column::Id)
            .find_with_related(OrderItemEntity)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows
            .into_iter()
            .map(|(order, items)| order.into_order(items))
            .collect())
    }

    async fn items_for_order(&self, order_id: i32) -> Result<Vec<OrderItem>, RepoError> {
        let rows = OrderItemEntity::find()
            .filter(order_item::Column::OrderId.eq(order_id))
            .order_by_asc(order_item::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_status(&self, id: i32, status: OrderStatus) -> Result<Order, RepoError> {
        order::ActiveModel {
            id: Set(id),
            status: Set(status.to_string()),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(map_db_err)?;

        self.find_by_id(id).await?.ok_or(RepoError::NotFound)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        OrderItemEntity::delete_many()
            .filter(order_item::Column::OrderId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        let result = OrderEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;
        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(map_db_err)?;
        Ok(())
    }
}
