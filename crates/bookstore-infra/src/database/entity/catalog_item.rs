//! Catalog item entity for SeaORM.

use sea_orm::entity::prelude::*;

use bookstore_core::domain::CatalogItem;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "catalog_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub author: String,
    #[sea_orm(unique)]
    pub isbn: String,
    pub price: f64,
    pub stock_quantity: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub publisher: Option<String>,
    pub cover_image_filename: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CatalogItem {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            author: model.author,
            isbn: model.isbn,
            price: model.price,
            stock_quantity: model.stock_quantity,
            description: model.description,
            publisher: model.publisher,
            cover_image_filename: model.cover_image_filename,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}
