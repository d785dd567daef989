use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::value_objects::{CartHash, CartId};

/// A product line inside a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub cart_id: CartId,
    pub product_id: Uuid,
    pub quantity: i32,
}

impl CartItem {
    pub fn new(cart_id: CartId, product_id: Uuid, quantity: i32) -> Self {
        Self {
            cart_id,
            product_id,
            quantity,
        }
    }

    /// Rows at zero or below are left over from a decrement and count as absent.
    pub fn is_active(&self) -> bool {
        self.quantity > 0
    }
}

#[derive(Debug, Clone)]
pub struct Cart {
    pub id: CartId,
    pub hash: CartHash,
    pub created_at: DateTime<Utc>,
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Opens an empty cart with a fresh id and sharing hash.
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            id: CartId::new(),
            hash: CartHash::generate(),
            created_at,
            items: Vec::new(),
        }
    }

    /// Constructor for data already persisted in the repository (no validation).
    ///
    /// Items live in their own collection and are attached with [`Cart::with_items`].
    pub fn from_repository(id: CartId, hash: CartHash, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            hash,
            created_at,
            items: Vec::new(),
        }
    }

    /// Attaches the item rows read for this cart, dropping depleted ones.
    pub fn with_items(mut self, items: Vec<CartItem>) -> Self {
        self.items = items.into_iter().filter(CartItem::is_active).collect();
        self
    }

    pub fn quantity_of(&self, product_id: Uuid) -> i32 {
        self.items
            .iter()
            .find(|item| item.product_id == product_id)
            .map_or(0, |item| item.quantity)
    }

    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|item| i64::from(item.quantity)).sum()
    }
}
