use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::Cart;

pub struct GetCartByHashParams {
    pub hash: String,
}

#[async_trait]
pub trait GetCartByHashUseCase: Send + Sync {
    async fn execute(&self, params: GetCartByHashParams) -> Result<Option<Cart>, CartError>;
}
