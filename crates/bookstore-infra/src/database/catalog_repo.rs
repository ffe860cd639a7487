use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, NotSet, QueryFilter, Set};

use bookstore_core::domain::{CatalogItem, NewCatalogItem};
use bookstore_core::error::RepoError;
use bookstore_core::ports::CatalogRepository;

use super::base::{SqlRepository, map_db_err};
use super::entity::catalog_item::{self, Entity as CatalogEntity};

pub type SqlCatalogRepository = SqlRepository<CatalogEntity>;

#[async_trait]
impl CatalogRepository for SqlCatalogRepository {
    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<CatalogItem>, RepoError> {
        let result = CatalogEntity::find()
            .filter(catalog_item::Column::Isbn.eq(isbn))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, item: NewCatalogItem) -> Result<CatalogItem, RepoError> {
        let now = Utc::now();
        let model = catalog_item::ActiveModel {
            id: NotSet,
            title: Set(item.title),
            author: Set(item.author),
            isbn: Set(item.isbn),
            price: Set(item.price),
            stock_quantity: Set(item.stock_quantity),
            description: Set(item.description),
            publisher: Set(item.publisher),
            cover_image_filename: Set(item.cover_image_filename),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await
        .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update(&self, item: CatalogItem) -> Result<CatalogItem, RepoError> {
        let model = catalog_item::ActiveModel {
            id: Set(item.id),
            title: Set(item.title),
            author: Set(item.author),
            isbn: Set(item.isbn),
            price: Set(item.price),
            stock_quantity: Set(item.stock_quantity),
            description: Set(item.description),
            publisher: Set(item.publisher),
            cover_image_filename: Set(item.cover_image_filename),
            created_at: Set(item.created_at.into()),
            updated_at: Set(item.updated_at.into()),
        }
        .update(&self.db)
        .await
        .map_err(map_db_err)?;

        Ok(model.into())
    }
}
