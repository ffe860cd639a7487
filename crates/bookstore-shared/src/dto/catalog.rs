use serde::{Deserialize, Serialize};

use crate::lenient;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCatalogItemRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub stock_quantity: Option<i64>,
    pub description: Option<String>,
    pub publisher: Option<String>,
    pub cover_image_filename: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCatalogItemRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub stock_quantity: Option<i64>,
    pub description: Option<String>,
    pub publisher: Option<String>,
    pub cover_image_filename: Option<String>,
}
