use std::sync::Arc;

use async_trait::async_trait;

use crate::application::cart::lookup::load_cart;
use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::Cart;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::get_by_id::{GetCartByIdParams, GetCartByIdUseCase};
use crate::domain::cart::value_objects::CartId;
use crate::domain::logger::Logger;

pub struct GetCartByIdUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetCartByIdUseCase for GetCartByIdUseCaseImpl {
    async fn execute(&self, params: GetCartByIdParams) -> Result<Option<Cart>, CartError> {
        let Some(id) = CartId::parse(&params.id) else {
            self.logger.debug(&format!("Malformed cart id: {}", params.id));
            return Ok(None);
        };

        self.logger.info(&format!("Fetching cart by id: {}", id));
        Ok(load_cart(self.repository.as_ref(), id).await?)
    }
}
