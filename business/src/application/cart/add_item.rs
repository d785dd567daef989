use std::sync::Arc;

use async_trait::async_trait;

use crate::application::cart::lookup::{existing_cart_id, load_cart};
use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::Cart;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::add_item::{AddCartItemParams, AddCartItemUseCase};
use crate::domain::logger::Logger;

pub struct AddCartItemUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl AddCartItemUseCase for AddCartItemUseCaseImpl {
    async fn execute(&self, params: AddCartItemParams) -> Result<Option<Cart>, CartError> {
        let Some(cart_id) = existing_cart_id(self.repository.as_ref(), &params.cart_id).await?
        else {
            self.logger.warn(&format!(
                "Cannot add product {}: cart {} not found",
                params.product_id, params.cart_id
            ));
            return Ok(None);
        };

        self.repository
            .adjust_quantity(cart_id, params.product_id, 1)
            .await?;

        self.logger.info(&format!(
            "Product {} added to cart {}",
            params.product_id, cart_id
        ));
        Ok(load_cart(self.repository.as_ref(), cart_id).await?)
    }
}
