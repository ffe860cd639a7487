//! Order entity for SeaORM. Owns its `order_items` rows.

use sea_orm::entity::prelude::*;

use bookstore_core::domain::{Order, OrderItem};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: String,
    pub order_date: DateTimeWithTimeZone,
    pub total_amount: f64,
    pub status: String,
    #[sea_orm(column_type = "Text")]
    pub shipping_address: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItem,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Build the domain order from this row and its item rows.
    pub fn into_order(self, items: Vec<super::order_item::Model>) -> Order {
        Order {
            id: self.id,
            user_id: self.user_id,
            order_date: self.order_date.into(),
            total_amount: self.total_amount,
            status: self.status.parse().unwrap_or_default(),
            shipping_address: self.shipping_address,
            items: items.into_iter().map(OrderItem::from).collect(),
            created_at: self.created_at.into(),
            updated_at: self.updated_at.into(),
        }
    }
}
