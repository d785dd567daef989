use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::Cart;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::get_by_hash::{GetCartByHashParams, GetCartByHashUseCase};
use crate::domain::cart::value_objects::CartHash;
use crate::domain::logger::Logger;

pub struct GetCartByHashUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetCartByHashUseCase for GetCartByHashUseCaseImpl {
    async fn execute(&self, params: GetCartByHashParams) -> Result<Option<Cart>, CartError> {
        let Some(hash) = CartHash::parse(&params.hash) else {
            self.logger.debug("Malformed cart hash");
            return Ok(None);
        };

        let Some(cart) = self.repository.find_by_hash(&hash).await? else {
            return Ok(None);
        };

        self.logger.info(&format!("Shared cart resolved: {}", cart.id));
        let items = self.repository.find_items(cart.id).await?;
        Ok(Some(cart.with_items(items)))
    }
}
