use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::ProductError;
use super::value_objects::Price;

#[derive(Debug, Clone)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewProductProps {
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
}

impl Product {
    pub fn new(props: NewProductProps) -> Result<Self, ProductError> {
        let name = validate_name(props.name)?;
        let price = Price::from_cents(props.price_cents)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            description: normalize_description(props.description),
            price,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies new attributes, keeping identity and creation time.
    pub fn revise(self, props: NewProductProps) -> Result<Self, ProductError> {
        let name = validate_name(props.name)?;
        let price = Price::from_cents(props.price_cents)?;

        Ok(Self {
            name,
            description: normalize_description(props.description),
            price,
            updated_at: Utc::now(),
            ..self
        })
    }

    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        id: Uuid,
        name: String,
        description: Option<String>,
        price: Price,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            price,
            created_at,
            updated_at,
        }
    }
}

fn validate_name(name: String) -> Result<String, ProductError> {
    if name.trim().is_empty() {
        return Err(ProductError::NameEmpty);
    }
    Ok(name)
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|d| !d.trim().is_empty())
}
