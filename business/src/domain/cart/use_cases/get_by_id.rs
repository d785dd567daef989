use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::Cart;

pub struct GetCartByIdParams {
    /// Raw identifier as received from the caller.
    pub id: String,
}

#[async_trait]
pub trait GetCartByIdUseCase: Send + Sync {
    async fn execute(&self, params: GetCartByIdParams) -> Result<Option<Cart>, CartError>;
}
