use std::sync::Arc;

use async_trait::async_trait;

use crate::application::cart::lookup::{existing_cart_id, load_cart};
use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::Cart;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::remove_item::{RemoveCartItemParams, RemoveCartItemUseCase};
use crate::domain::logger::Logger;

pub struct RemoveCartItemUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl RemoveCartItemUseCase for RemoveCartItemUseCaseImpl {
    async fn execute(&self, params: RemoveCartItemParams) -> Result<Option<Cart>, CartError> {
        let Some(cart_id) = existing_cart_id(self.repository.as_ref(), &params.cart_id).await?
        else {
            self.logger.warn(&format!(
                "Cannot remove product {}: cart {} not found",
                params.product_id, params.cart_id
            ));
            return Ok(None);
        };

        // Decrement and cleanup are two separate atomic writes. A row may sit at <= 0
        // between them; readers skip such rows.
        self.repository
            .adjust_quantity(cart_id, params.product_id, -1)
            .await?;
        let deleted = self
            .repository
            .delete_depleted(cart_id, params.product_id)
            .await?;

        if deleted > 0 {
            self.logger.info(&format!(
                "Product {} dropped from cart {}",
                params.product_id, cart_id
            ));
        } else {
            self.logger.info(&format!(
                "Product {} decremented in cart {}",
                params.product_id, cart_id
            ));
        }
        Ok(load_cart(self.repository.as_ref(), cart_id).await?)
    }
}
