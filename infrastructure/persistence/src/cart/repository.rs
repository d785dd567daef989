use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use business::domain::cart::model::{Cart, CartItem};
use business::domain::cart::repository::CartRepository;
use business::domain::cart::value_objects::{CartHash, CartId};
use business::domain::errors::RepositoryError;

use super::entity::{CartEntity, CartItemEntity};

pub struct CartRepositoryPostgres {
    pool: PgPool,
}

impl CartRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(error: sqlx::Error) -> RepositoryError {
    match &error {
        sqlx::Error::Database(db) if db.is_unique_violation() => RepositoryError::Duplicated,
        _ => {
            tracing::error!(error = %error, "cart store write failed");
            RepositoryError::DatabaseError
        }
    }
}

#[async_trait]
impl CartRepository for CartRepositoryPostgres {
    async fn insert(&self, cart: &Cart) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO carts (id, hash, created_at) VALUES ($1, $2, $3)")
            .bind(cart.id.as_uuid())
            .bind(cart.hash.as_str())
            .bind(cart.created_at)
            .execute(&self.pool)
            .await
            .map_err(map_write_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: CartId) -> Result<Option<Cart>, RepositoryError> {
        let entity = sqlx::query_as::<_, CartEntity>(
            "SELECT id, hash, created_at FROM carts WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(entity.map(|e| e.into_domain()))
    }

    async fn find_by_hash(&self, hash: &CartHash) -> Result<Option<Cart>, RepositoryError> {
        let entity = sqlx::query_as::<_, CartEntity>(
            "SELECT id, hash, created_at FROM carts WHERE hash = $1",
        )
        .bind(hash.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(entity.map(|e| e.into_domain()))
    }

    async fn exists(&self, id: CartId) -> Result<bool, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM carts WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(count > 0)
    }

    async fn find_items(&self, cart_id: CartId) -> Result<Vec<CartItem>, RepositoryError> {
        let entities = sqlx::query_as::<_, CartItemEntity>(
            "SELECT cart_id, product_id, quantity FROM cart_items WHERE cart_id = $1 AND quantity > 0 ORDER BY added_at, product_id",
        )
        .bind(cart_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(entities.into_iter().map(|e| e.into_domain()).collect())
    }

    async fn adjust_quantity(
        &self,
        cart_id: CartId,
        product_id: Uuid,
        delta: i32,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO cart_items (cart_id, product_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (cart_id, product_id) DO UPDATE SET
                quantity = cart_items.quantity + EXCLUDED.quantity"#,
        )
        .bind(cart_id.as_uuid())
        .bind(product_id)
        .bind(delta)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn delete_depleted(
        &self,
        cart_id: CartId,
        product_id: Uuid,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            "DELETE FROM cart_items WHERE cart_id = $1 AND product_id = $2 AND quantity <= 0",
        )
        .bind(cart_id.as_uuid())
        .bind(product_id)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_db::TestDb;
    use chrono::Utc;
    use std::sync::Arc;

    async fn repository_with_cart() -> (TestDb, CartRepositoryPostgres, CartId) {
        let db = TestDb::new().await;
        let repository = CartRepositoryPostgres::new(db.pool());
        let cart = Cart::new(Utc::now());
        repository.insert(&cart).await.unwrap();
        (db, repository, cart.id)
    }

    /// Every stored row for the pair, including depleted ones.
    async fn raw_quantity(db: &TestDb, cart_id: CartId, product_id: Uuid) -> Option<i32> {
        sqlx::query_scalar("SELECT quantity FROM cart_items WHERE cart_id = $1 AND product_id = $2")
            .bind(cart_id.as_uuid())
            .bind(product_id)
            .fetch_optional(&db.pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn should_increment_existing_row_on_repeated_adjust() {
        let (db, repository, cart_id) = repository_with_cart().await;
        let product_id = Uuid::new_v4();

        repository.adjust_quantity(cart_id, product_id, 1).await.unwrap();
        repository.adjust_quantity(cart_id, product_id, 1).await.unwrap();

        let items = repository.find_items(cart_id).await.unwrap();
        assert_eq!(items, vec![CartItem::new(cart_id, product_id, 2)]);
        assert_eq!(raw_quantity(&db, cart_id, product_id).await, Some(2));
    }

    #[tokio::test]
    async fn should_decrement_then_delete_at_zero() {
        let (db, repository, cart_id) = repository_with_cart().await;
        let product_id = Uuid::new_v4();
        repository.adjust_quantity(cart_id, product_id, 1).await.unwrap();
        repository.adjust_quantity(cart_id, product_id, 1).await.unwrap();

        repository.adjust_quantity(cart_id, product_id, -1).await.unwrap();
        let deleted = repository.delete_depleted(cart_id, product_id).await.unwrap();
        assert_eq!(deleted, 0);
        assert_eq!(raw_quantity(&db, cart_id, product_id).await, Some(1));

        repository.adjust_quantity(cart_id, product_id, -1).await.unwrap();
        let deleted = repository.delete_depleted(cart_id, product_id).await.unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(raw_quantity(&db, cart_id, product_id).await, None);
        assert!(repository.find_items(cart_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_leave_no_row_when_decrementing_absent_product() {
        let (db, repository, cart_id) = repository_with_cart().await;
        let product_id = Uuid::new_v4();

        repository.adjust_quantity(cart_id, product_id, -1).await.unwrap();
        assert_eq!(raw_quantity(&db, cart_id, product_id).await, Some(-1));

        let deleted = repository.delete_depleted(cart_id, product_id).await.unwrap();

        assert_eq!(deleted, 1);
        assert_eq!(raw_quantity(&db, cart_id, product_id).await, None);
    }

    #[tokio::test]
    async fn should_only_delete_depleted_row_of_the_given_pair() {
        let (db, repository, cart_id) = repository_with_cart().await;
        let kept = Uuid::new_v4();
        let depleted = Uuid::new_v4();
        repository.adjust_quantity(cart_id, kept, 1).await.unwrap();
        repository.adjust_quantity(cart_id, depleted, -1).await.unwrap();

        repository.delete_depleted(cart_id, kept).await.unwrap();

        assert_eq!(raw_quantity(&db, cart_id, kept).await, Some(1));
        assert_eq!(raw_quantity(&db, cart_id, depleted).await, Some(-1));
    }

    #[tokio::test]
    async fn should_hide_rows_at_or_below_zero() {
        let (db, repository, cart_id) = repository_with_cart().await;
        let active = Uuid::new_v4();
        repository.adjust_quantity(cart_id, active, 1).await.unwrap();
        sqlx::query("INSERT INTO cart_items (cart_id, product_id, quantity) VALUES ($1, $2, 0), ($1, $3, -2)")
            .bind(cart_id.as_uuid())
            .bind(Uuid::new_v4())
            .bind(Uuid::new_v4())
            .execute(&db.pool)
            .await
            .unwrap();

        let items = repository.find_items(cart_id).await.unwrap();

        assert_eq!(items, vec![CartItem::new(cart_id, active, 1)]);
    }

    #[tokio::test]
    async fn should_keep_items_of_other_carts_apart() {
        let (_db, repository, first) = repository_with_cart().await;
        let second = Cart::new(Utc::now());
        repository.insert(&second).await.unwrap();
        let product_id = Uuid::new_v4();

        repository.adjust_quantity(first, product_id, 1).await.unwrap();

        assert!(repository.find_items(second.id).await.unwrap().is_empty());
        assert_eq!(repository.find_items(first).await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn should_sum_concurrent_increments() {
        let (db, repository, cart_id) = repository_with_cart().await;
        let repository = Arc::new(repository);
        let product_id = Uuid::new_v4();

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let repository = repository.clone();
                tokio::spawn(async move {
                    repository.adjust_quantity(cart_id, product_id, 1).await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(raw_quantity(&db, cart_id, product_id).await, Some(32));
    }

    #[tokio::test]
    async fn should_find_cart_by_id_and_hash() {
        let db = TestDb::new().await;
        let repository = CartRepositoryPostgres::new(db.pool());
        let cart = Cart::new(Utc::now());
        repository.insert(&cart).await.unwrap();

        let by_id = repository.find_by_id(cart.id).await.unwrap().unwrap();
        let by_hash = repository.find_by_hash(&cart.hash).await.unwrap().unwrap();

        assert_eq!(by_id.id, cart.id);
        assert_eq!(by_hash.id, cart.id);
        assert!(repository.exists(cart.id).await.unwrap());
        assert!(!repository.exists(CartId::new()).await.unwrap());
        assert!(repository.find_by_id(CartId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_report_duplicated_hash() {
        let (_db, repository, _) = repository_with_cart().await;
        let first = Cart::new(Utc::now());
        repository.insert(&first).await.unwrap();
        let clash = Cart::from_repository(CartId::new(), first.hash.clone(), Utc::now());

        let result = repository.insert(&clash).await;

        assert!(matches!(result, Err(RepositoryError::Duplicated)));
    }
}
