use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};

use bookstore_core::domain::{NewPayment, Payment, PaymentStatus};
use bookstore_core::error::RepoError;
use bookstore_core::ports::PaymentRepository;

use super::base::{SqlRepository, map_db_err};
use super::entity::payment::{self, Entity as PaymentEntity};

pub type SqlPaymentRepository = SqlRepository<PaymentEntity>;

#[async_trait]
impl PaymentRepository for SqlPaymentRepository {
    async fn create(&self, new_payment: NewPayment) -> Result<Payment, RepoError> {
        let now = Utc::now();
        let model = payment::ActiveModel {
            id: NotSet,
            order_id: Set(new_payment.order_id),
            user_id: Set(new_payment.user_id),
            amount: Set(new_payment.amount),
            currency: Set(new_payment.currency),
            payment_method: Set(new_payment.payment_method),
            transaction_id: Set(new_payment.transaction_id),
            status: Set(new_payment.status.to_string()),
            payment_date: Set(now.into()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await
        .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn find_by_order(&self, order_id: &str) -> Result<Vec<Payment>, RepoError> {
        let rows = PaymentEntity::find()
            .filter(payment::Column::OrderId.eq(order_id))
            .order_by_asc(payment::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_status(&self, id: i32, status: PaymentStatus) -> Result<Payment, RepoError> {
        let model = payment::ActiveModel {
            id: Set(id),
            status: Set(status.to_string()),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(map_db_err)?;

        Ok(model.into())
    }
}
