use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Public path prefix under which cover images are served.
pub const COVER_IMAGE_PATH: &str = "/static/cover_images";

/// A book in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub price: f64,
    pub stock_quantity: i32,
    pub description: Option<String>,
    pub publisher: Option<String>,
    pub cover_image_filename: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CatalogItem {
    pub fn cover_image_url(&self) -> Option<String> {
        self.cover_image_filename
            .as_ref()
            .map(|name| format!("{}/{}", COVER_IMAGE_PATH, name))
    }

    /// Apply a partial update. Numeric fields are validated by [`CatalogChanges::new`].
    pub fn apply(&mut self, changes: CatalogChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(author) = changes.author {
            self.author = author;
        }
        if let Some(isbn) = changes.isbn {
            self.isbn = isbn;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(stock_quantity) = changes.stock_quantity {
            self.stock_quantity = stock_quantity;
        }
        if let Some(description) = changes.description {
            self.description = Some(description);
        }
        if let Some(publisher) = changes.publisher {
            self.publisher = Some(publisher);
        }
        if let Some(filename) = changes.cover_image_filename {
            self.cover_image_filename = Some(filename);
        }
        self.updated_at = Utc::now();
    }
}

/// A catalog item that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCatalogItem {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub price: f64,
    pub stock_quantity: i32,
    pub description: Option<String>,
    pub publisher: Option<String>,
    pub cover_image_filename: Option<String>,
}

impl NewCatalogItem {
    /// Build a new item; stock defaults to zero.
    pub fn new(
        title: String,
        author: String,
        isbn: String,
        price: f64,
        stock_quantity: Option<i64>,
    ) -> Result<Self, DomainError> {
        let stock = stock_quantity.unwrap_or(0);
        if !(price > 0.0) || stock < 0 {
            return Err(DomainError::validation(
                "Price must be positive, stock_quantity must be non-negative",
            ));
        }

        Ok(Self {
            title,
            author,
            isbn,
            price,
            stock_quantity: stock_to_i32(stock)?,
            description: None,
            publisher: None,
            cover_image_filename: None,
        })
    }
}

/// Partial update of a catalog item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogChanges {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub price: Option<f64>,
    pub stock_quantity: Option<i32>,
    pub description: Option<String>,
    pub publisher: Option<String>,
    pub cover_image_filename: Option<String>,
}

impl CatalogChanges {
    /// Validate the numeric fields of an update.
    pub fn with_numbers(
        mut self,
        price: Option<f64>,
        stock_quantity: Option<i64>,
    ) -> Result<Self, DomainError> {
        if let Some(price) = price {
            if !(price > 0.0) {
                return Err(DomainError::validation("Price must be positive"));
            }
            self.price = Some(price);
        }
        if let Some(stock) = stock_quantity {
            if stock < 0 {
                return Err(DomainError::validation(
                    "Stock quantity must be non-negative",
                ));
            }
            self.stock_quantity = Some(stock_to_i32(stock)?);
        }
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn stock_to_i32(stock: i64) -> Result<i32, DomainError> {
    i32::try_from(stock).map_err(|_| DomainError::validation("Stock quantity is too large"))
}
