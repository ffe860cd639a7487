//! Catalog item CRUD.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use bookstore_core::domain::{CatalogChanges, CatalogItem, NewCatalogItem, present};
use bookstore_core::error::RepoError;
use bookstore_shared::MessageResponse;
use bookstore_shared::dto::{CreateCatalogItemRequest, UpdateCatalogItemRequest};
use bookstore_web::{AppError, AppResult};

use crate::state::CatalogState;

const DUPLICATE_ISBN: &str = "Book with this ISBN already exists";

/// Item as returned to clients, with the public cover image path.
#[derive(Serialize)]
struct CatalogItemView {
    #[serde(flatten)]
    item: CatalogItem,
    cover_image_url: Option<String>,
}

impl From<CatalogItem> for CatalogItemView {
    fn from(item: CatalogItem) -> Self {
        Self {
            cover_image_url: item.cover_image_url(),
            item,
        }
    }
}

fn item_not_found() -> AppError {
    AppError::NotFound("Catalog item not found".to_string())
}

async fn find_item(state: &CatalogState, id: i32) -> AppResult<CatalogItem> {
    state.catalog.find_by_id(id).await?.ok_or_else(item_not_found)
}

/// POST /catalog
pub async fn create_item(
    state: web::Data<CatalogState>,
    body: web::Json<CreateCatalogItemRequest>,
) -> AppResult<HttpResponse> {
    let request = body.into_inner();
    let (Some(title), Some(author), Some(isbn), Some(price)) = (
        present(request.title),
        present(request.author),
        present(request.isbn),
        request.price,
    ) else {
        return Err(AppError::bad_request(
            "Missing required fields: title, author, isbn, price",
        ));
    };

    let mut new_item = NewCatalogItem::new(title, author, isbn, price, request.stock_quantity)?;
    new_item.description = present(request.description);
    new_item.publisher = present(request.publisher);
    new_item.cover_image_filename = present(request.cover_image_filename);

    if state.catalog.find_by_isbn(&new_item.isbn).await?.is_some() {
        return Err(AppError::Conflict(DUPLICATE_ISBN.to_string()));
    }

    let item = state.catalog.create(new_item).await?;
    tracing::info!(item_id = item.id, isbn = %item.isbn, "Catalog item created");
    Ok(HttpResponse::Created().json(CatalogItemView::from(item)))
}

/// GET /catalog
pub async fn list_items(state: web::Data<CatalogState>) -> AppResult<HttpResponse> {
    let items: Vec<CatalogItemView> = state
        .catalog
        .find_all()
        .await?
        .into_iter()
        .map(CatalogItemView::from)
        .collect();
    Ok(HttpResponse::Ok().json(items))
}

/// GET /catalog/{id}
pub async fn get_item(
    state: web::Data<CatalogState>,
    id: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let item = find_item(&state, id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(CatalogItemView::from(item)))
}

/// PUT /catalog/{id} - partial update.
pub async fn update_item(
    state: web::Data<CatalogState>,
    id: web::Path<i32>,
    body: web::Json<UpdateCatalogItemRequest>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let request = body.into_inner();
    let changes = CatalogChanges {
        title: present(request.title),
        author: present(request.author),
        isbn: present(request.isbn),
        description: request.description,
        publisher: request.publisher,
        cover_image_filename: present(request.cover_image_filename),
        ..Default::default()
    }
    .with_numbers(request.price, request.stock_quantity)?;
    if changes.is_empty() {
        return Err(AppError::bad_request("No update data provided"));
    }

    let mut item = find_item(&state, id).await?;
    if let Some(isbn) = &changes.isbn {
        let taken = state.catalog.find_by_isbn(isbn).await?;
        if taken.is_some_and(|other| other.id != id) {
            return Err(AppError::Conflict(DUPLICATE_ISBN.to_string()));
        }
    }

    item.apply(changes);
    let item = state.catalog.update(item).await?;
    tracing::info!(item_id = id, "Catalog item updated");
    Ok(HttpResponse::Ok().json(CatalogItemView::from(item)))
}

/// DELETE /catalog/{id}
pub async fn delete_item(
    state: web::Data<CatalogState>,
    id: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    state.catalog.delete(id).await.map_err(|e| match e {
        RepoError::NotFound => item_not_found(),
        other => other.into(),
    })?;

    tracing::info!(item_id = id, "Catalog item deleted");
    Ok(HttpResponse::Ok().json(MessageResponse::new("Catalog item deleted successfully")))
}
