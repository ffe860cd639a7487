//! Payment entity for SeaORM.

use sea_orm::entity::prelude::*;

use bookstore_core::domain::Payment;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub order_id: String,
    pub user_id: String,
    pub amount: f64,
    pub currency: String,
    pub payment_method: String,
    #[sea_orm(unique)]
    pub transaction_id: String,
    pub status: String,
    pub payment_date: DateTimeWithTimeZone,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Payment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            user_id: model.user_id,
            amount: model.amount,
            currency: model.currency,
            payment_method: model.payment_method,
            transaction_id: model.transaction_id,
            status: model.status.parse().unwrap_or_default(),
            payment_date: model.payment_date.into(),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}
