use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;

use super::model::{Cart, CartItem};
use super::value_objects::{CartHash, CartId};

/// Storage port for carts and their item rows.
///
/// Carts and items live in separate collections joined by `cart_id`. The two quantity
/// primitives must each be a single atomic store operation: concurrent adjustments on the
/// same pair are summed by the store, never read-modify-written in process.
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn insert(&self, cart: &Cart) -> Result<(), RepositoryError>;
    /// Returns the cart header without items.
    async fn find_by_id(&self, id: CartId) -> Result<Option<Cart>, RepositoryError>;
    /// Returns the cart header without items.
    async fn find_by_hash(&self, hash: &CartHash) -> Result<Option<Cart>, RepositoryError>;
    async fn exists(&self, id: CartId) -> Result<bool, RepositoryError>;
    /// Item rows of a cart. Rows with quantity <= 0 are never returned.
    async fn find_items(&self, cart_id: CartId) -> Result<Vec<CartItem>, RepositoryError>;
    /// Adds `delta` to the pair's quantity, inserting the row with `delta` when absent.
    async fn adjust_quantity(
        &self,
        cart_id: CartId,
        product_id: Uuid,
        delta: i32,
    ) -> Result<(), RepositoryError>;
    /// Deletes the pair's row only if its quantity is <= 0 at delete time.
    async fn delete_depleted(&self, cart_id: CartId, product_id: Uuid)
    -> Result<u64, RepositoryError>;
}
