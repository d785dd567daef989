use chrono::{DateTime, Utc};
use poem_openapi::Object;

use business::domain::product::model::Product;

#[derive(Debug, Clone, Object)]
pub struct CreateProductRequest {
    /// Product name (cannot be empty)
    pub name: String,
    /// Free-form description
    #[oai(skip_serializing_if_is_none)]
    pub description: Option<String>,
    /// Unit price in cents (cannot be negative)
    pub price_cents: i64,
}

#[derive(Debug, Clone, Object)]
pub struct UpdateProductRequest {
    /// Product name (cannot be empty)
    pub name: String,
    /// Free-form description
    #[oai(skip_serializing_if_is_none)]
    pub description: Option<String>,
    /// Unit price in cents (cannot be negative)
    pub price_cents: i64,
}

#[derive(Debug, Clone, Object)]
pub struct ProductResponse {
    /// Product unique identifier
    pub id: String,
    /// Product name
    pub name: String,
    /// Free-form description
    #[oai(skip_serializing_if_is_none)]
    pub description: Option<String>,
    /// Unit price in cents
    pub price_cents: i64,
    /// Unit price as a decimal string, e.g. "19.99"
    pub price: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name,
            description: product.description,
            price_cents: product.price.cents(),
            price: product.price.to_string(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct DeleteProductResponse {
    /// Whether a product was removed
    pub success: bool,
}
