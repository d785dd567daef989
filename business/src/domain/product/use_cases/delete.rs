use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::product::errors::ProductError;

pub struct DeleteProductParams {
    pub id: Uuid,
}

#[async_trait]
pub trait DeleteProductUseCase: Send + Sync {
    /// Returns `true` when the product existed and was removed.
    async fn execute(&self, params: DeleteProductParams) -> Result<bool, ProductError>;
}
