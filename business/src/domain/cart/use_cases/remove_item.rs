use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::Cart;

pub struct RemoveCartItemParams {
    pub cart_id: String,
    pub product_id: Uuid,
}

#[async_trait]
pub trait RemoveCartItemUseCase: Send + Sync {
    /// Returns `Ok(None)` when the cart does not exist; nothing is written in that case.
    async fn execute(&self, params: RemoveCartItemParams) -> Result<Option<Cart>, CartError>;
}
