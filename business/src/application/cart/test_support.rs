use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::cart::add_item::AddCartItemUseCaseImpl;
use crate::application::cart::create::CreateCartUseCaseImpl;
use crate::application::cart::get_by_id::GetCartByIdUseCaseImpl;
use crate::application::cart::remove_item::RemoveCartItemUseCaseImpl;
use crate::domain::cart::model::{Cart, CartItem};
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::value_objects::{CartHash, CartId};
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;

/// Store double with the same single-operation atomicity as the real adapter:
/// every method holds the lock for its whole body.
#[derive(Default)]
pub(crate) struct InMemoryCartRepository {
    carts: Mutex<Vec<Cart>>,
    items: Mutex<Vec<CartItem>>,
}

impl InMemoryCartRepository {
    /// Raw rows, including any left at zero or below.
    pub(crate) fn raw_items(&self) -> Vec<CartItem> {
        self.items.lock().unwrap().clone()
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn insert(&self, cart: &Cart) -> Result<(), RepositoryError> {
        let mut carts = self.carts.lock().unwrap();
        if carts.iter().any(|c| c.id == cart.id || c.hash == cart.hash) {
            return Err(RepositoryError::Duplicated);
        }
        carts.push(Cart::from_repository(
            cart.id,
            cart.hash.clone(),
            cart.created_at,
        ));
        Ok(())
    }

    async fn find_by_id(&self, id: CartId) -> Result<Option<Cart>, RepositoryError> {
        Ok(self
            .carts
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn find_by_hash(&self, hash: &CartHash) -> Result<Option<Cart>, RepositoryError> {
        Ok(self
            .carts
            .lock()
            .unwrap()
            .iter()
            .find(|c| &c.hash == hash)
            .cloned())
    }

    async fn exists(&self, id: CartId) -> Result<bool, RepositoryError> {
        Ok(self.carts.lock().unwrap().iter().any(|c| c.id == id))
    }

    async fn find_items(&self, cart_id: CartId) -> Result<Vec<CartItem>, RepositoryError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|item| item.cart_id == cart_id && item.is_active())
            .cloned()
            .collect())
    }

    async fn adjust_quantity(
        &self,
        cart_id: CartId,
        product_id: Uuid,
        delta: i32,
    ) -> Result<(), RepositoryError> {
        let mut items = self.items.lock().unwrap();
        let existing = items
            .iter()
            .position(|item| item.cart_id == cart_id && item.product_id == product_id);
        match existing {
            Some(index) => items[index].quantity += delta,
            None => items.push(CartItem::new(cart_id, product_id, delta)),
        }
        Ok(())
    }

    async fn delete_depleted(
        &self,
        cart_id: CartId,
        product_id: Uuid,
    ) -> Result<u64, RepositoryError> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|item| {
            !(item.cart_id == cart_id && item.product_id == product_id && item.quantity <= 0)
        });
        Ok((before - items.len()) as u64)
    }
}

pub(crate) struct SilentLogger;

impl Logger for SilentLogger {
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
    fn debug(&self, _message: &str) {}
}

/// All cart use cases wired to one shared in-memory store.
pub(crate) struct CartFixture {
    pub store: Arc<InMemoryCartRepository>,
    pub create: CreateCartUseCaseImpl,
    pub get_by_id: GetCartByIdUseCaseImpl,
    pub add: AddCartItemUseCaseImpl,
    pub remove: RemoveCartItemUseCaseImpl,
}

impl CartFixture {
    pub(crate) fn new() -> Self {
        let store = Arc::new(InMemoryCartRepository::default());
        let logger: Arc<dyn Logger> = Arc::new(SilentLogger);
        Self {
            create: CreateCartUseCaseImpl {
                repository: store.clone(),
                logger: logger.clone(),
            },
            get_by_id: GetCartByIdUseCaseImpl {
                repository: store.clone(),
                logger: logger.clone(),
            },
            add: AddCartItemUseCaseImpl {
                repository: store.clone(),
                logger: logger.clone(),
            },
            remove: RemoveCartItemUseCaseImpl {
                repository: store.clone(),
                logger,
            },
            store,
        }
    }
}
