use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::delete::{DeleteProductParams, DeleteProductUseCase};

pub struct DeleteProductUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl DeleteProductUseCase for DeleteProductUseCaseImpl {
    async fn execute(&self, params: DeleteProductParams) -> Result<bool, ProductError> {
        self.logger.info(&format!("Deleting product: {}", params.id));

        let deleted = self.repository.delete(params.id).await?;

        if deleted {
            self.logger.info(&format!("Product deleted: {}", params.id));
        } else {
            self.logger.warn(&format!("Product {} was not deleted", params.id));
        }
        Ok(deleted)
    }
}
