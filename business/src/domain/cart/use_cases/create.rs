use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::Cart;

pub struct CreateCartParams {
    /// Creation timestamp; defaults to the current time.
    pub now: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait CreateCartUseCase: Send + Sync {
    async fn execute(&self, params: CreateCartParams) -> Result<Cart, CartError>;
}
