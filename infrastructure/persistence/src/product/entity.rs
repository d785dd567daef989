use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use num_traits::ToPrimitive;
use sqlx::FromRow;
use uuid::Uuid;

use business::domain::errors::RepositoryError;
use business::domain::product::model::Product;
use business::domain::product::value_objects::Price;

#[derive(Debug, FromRow)]
pub struct ProductEntity {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductEntity {
    pub fn into_domain(self) -> Result<Product, RepositoryError> {
        let price = price_from_numeric(&self.price)?;
        Ok(Product::from_repository(
            self.id,
            self.name,
            self.description,
            price,
            self.created_at,
            self.updated_at,
        ))
    }
}

/// Converts a `NUMERIC(12, 2)` amount to cents.
pub fn price_from_numeric(amount: &BigDecimal) -> Result<Price, RepositoryError> {
    let cents = (amount * BigDecimal::from(100))
        .round(0)
        .to_i64()
        .ok_or(RepositoryError::DatabaseError)?;
    Price::from_cents(cents).map_err(|_| RepositoryError::DatabaseError)
}

/// Converts cents to a two-decimal `NUMERIC` amount.
pub fn price_to_numeric(price: Price) -> BigDecimal {
    (BigDecimal::from(price.cents()) / BigDecimal::from(100)).with_scale(2)
}
