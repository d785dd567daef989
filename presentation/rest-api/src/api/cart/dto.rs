use chrono::{DateTime, Utc};
use poem_openapi::Object;

use business::domain::cart::model::{Cart, CartItem};

#[derive(Debug, Clone, Object)]
pub struct CartItemResponse {
    /// Product in the cart
    pub product_id: String,
    /// Units of the product, always at least 1
    pub quantity: i32,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            product_id: item.product_id.to_string(),
            quantity: item.quantity,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct CartResponse {
    /// Cart unique identifier
    pub id: String,
    /// Token for sharing the cart via `/shared-carts/{hash}`
    pub hash: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Current line items
    pub items: Vec<CartItemResponse>,
    /// Sum of all item quantities
    pub total_quantity: i64,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        let total_quantity = cart.total_quantity();
        Self {
            id: cart.id.to_string(),
            hash: cart.hash.to_string(),
            created_at: cart.created_at,
            items: cart.items.into_iter().map(|i| i.into()).collect(),
            total_quantity,
        }
    }
}
