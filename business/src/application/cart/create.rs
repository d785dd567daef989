use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::Cart;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::create::{CreateCartParams, CreateCartUseCase};
use crate::domain::logger::Logger;

pub struct CreateCartUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl CreateCartUseCase for CreateCartUseCaseImpl {
    async fn execute(&self, params: CreateCartParams) -> Result<Cart, CartError> {
        let cart = Cart::new(params.now.unwrap_or_else(Utc::now));
        self.repository.insert(&cart).await?;

        self.logger.info(&format!("Cart created: {}", cart.id));
        Ok(cart)
    }
}
