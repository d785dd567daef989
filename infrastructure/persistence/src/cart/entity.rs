use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use business::domain::cart::model::{Cart, CartItem};
use business::domain::cart::value_objects::{CartHash, CartId};

#[derive(Debug, FromRow)]
pub struct CartEntity {
    pub id: Uuid,
    pub hash: String,
    pub created_at: DateTime<Utc>,
}

impl CartEntity {
    pub fn into_domain(self) -> Cart {
        Cart::from_repository(
            CartId::from(self.id),
            CartHash::from_repository(self.hash),
            self.created_at,
        )
    }
}

#[derive(Debug, FromRow)]
pub struct CartItemEntity {
    pub cart_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
}

impl CartItemEntity {
    pub fn into_domain(self) -> CartItem {
        CartItem::new(CartId::from(self.cart_id), self.product_id, self.quantity)
    }
}
