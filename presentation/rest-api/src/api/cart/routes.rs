use std::sync::Arc;

use poem_openapi::{OpenApi, param::Path, payload::Json};
use uuid::Uuid;

use business::domain::cart::errors::CartError;
use business::domain::cart::model::Cart;
use business::domain::cart::use_cases::add_item::{AddCartItemParams, AddCartItemUseCase};
use business::domain::cart::use_cases::create::{CreateCartParams, CreateCartUseCase};
use business::domain::cart::use_cases::get_by_hash::{GetCartByHashParams, GetCartByHashUseCase};
use business::domain::cart::use_cases::get_by_id::{GetCartByIdParams, GetCartByIdUseCase};
use business::domain::cart::use_cases::remove_item::{
    RemoveCartItemParams, RemoveCartItemUseCase,
};

use crate::api::cart::dto::CartResponse;
use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::tags::ApiTags;

pub struct CartApi {
    create_use_case: Arc<dyn CreateCartUseCase>,
    get_by_id_use_case: Arc<dyn GetCartByIdUseCase>,
    get_by_hash_use_case: Arc<dyn GetCartByHashUseCase>,
    add_item_use_case: Arc<dyn AddCartItemUseCase>,
    remove_item_use_case: Arc<dyn RemoveCartItemUseCase>,
}

impl CartApi {
    pub fn new(
        create_use_case: Arc<dyn CreateCartUseCase>,
        get_by_id_use_case: Arc<dyn GetCartByIdUseCase>,
        get_by_hash_use_case: Arc<dyn GetCartByHashUseCase>,
        add_item_use_case: Arc<dyn AddCartItemUseCase>,
        remove_item_use_case: Arc<dyn RemoveCartItemUseCase>,
    ) -> Self {
        Self {
            create_use_case,
            get_by_id_use_case,
            get_by_hash_use_case,
            add_item_use_case,
            remove_item_use_case,
        }
    }
}

fn cart_lookup_response(result: Result<Option<Cart>, CartError>) -> GetCartResponse {
    match result {
        Ok(Some(cart)) => GetCartResponse::Ok(Json(cart.into())),
        Ok(None) => GetCartResponse::NotFound(ErrorResponse::not_found("cart.not_found")),
        Err(err) => {
            let (_status, json) = err.into_error_response();
            GetCartResponse::InternalError(json)
        }
    }
}

fn cart_mutation_response(result: Result<Option<Cart>, CartError>) -> UpdateCartResponse {
    match result {
        Ok(Some(cart)) => UpdateCartResponse::Ok(Json(cart.into())),
        Ok(None) => UpdateCartResponse::NotFound(ErrorResponse::not_found("cart.not_found")),
        Err(err) => {
            let (_status, json) = err.into_error_response();
            UpdateCartResponse::InternalError(json)
        }
    }
}

/// Shopping cart API
///
/// A malformed cart id is answered like an unknown cart (404).
#[OpenApi]
impl CartApi {
    /// Create a cart
    ///
    /// Opens a new empty cart with its own sharing hash.
    #[oai(path = "/carts", method = "post", tag = "ApiTags::Carts")]
    async fn create(&self) -> CreateCartResponse {
        match self
            .create_use_case
            .execute(CreateCartParams { now: None })
            .await
        {
            Ok(cart) => CreateCartResponse::Created(Json(cart.into())),
            Err(err) => {
                let (_status, json) = err.into_error_response();
                CreateCartResponse::InternalError(json)
            }
        }
    }

    /// Get a cart by ID
    ///
    /// Returns the cart together with its current items.
    #[oai(path = "/carts/:id", method = "get", tag = "ApiTags::Carts")]
    async fn get_by_id(&self, id: Path<String>) -> GetCartResponse {
        cart_lookup_response(
            self.get_by_id_use_case
                .execute(GetCartByIdParams { id: id.0 })
                .await,
        )
    }

    /// Get a shared cart
    ///
    /// Resolves a cart through the hash handed out for sharing.
    #[oai(path = "/shared-carts/:hash", method = "get", tag = "ApiTags::Carts")]
    async fn get_by_hash(&self, hash: Path<String>) -> GetCartResponse {
        cart_lookup_response(
            self.get_by_hash_use_case
                .execute(GetCartByHashParams { hash: hash.0 })
                .await,
        )
    }

    /// Add one unit of a product
    ///
    /// Creates the line at quantity 1 or increments it.
    #[oai(
        path = "/carts/:id/items/:product_id",
        method = "post",
        tag = "ApiTags::Carts"
    )]
    async fn add_item(&self, id: Path<String>, product_id: Path<String>) -> UpdateCartResponse {
        let Ok(product_id) = Uuid::parse_str(&product_id.0) else {
            return UpdateCartResponse::BadRequest(ErrorResponse::validation(
                "cart.invalid_product_id",
            ));
        };

        cart_mutation_response(
            self.add_item_use_case
                .execute(AddCartItemParams {
                    cart_id: id.0,
                    product_id,
                })
                .await,
        )
    }

    /// Remove one unit of a product
    ///
    /// Decrements the line; it disappears once its quantity reaches zero.
    #[oai(
        path = "/carts/:id/items/:product_id",
        method = "delete",
        tag = "ApiTags::Carts"
    )]
    async fn remove_item(&self, id: Path<String>, product_id: Path<String>) -> UpdateCartResponse {
        let Ok(product_id) = Uuid::parse_str(&product_id.0) else {
            return UpdateCartResponse::BadRequest(ErrorResponse::validation(
                "cart.invalid_product_id",
            ));
        };

        cart_mutation_response(
            self.remove_item_use_case
                .execute(RemoveCartItemParams {
                    cart_id: id.0,
                    product_id,
                })
                .await,
        )
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum CreateCartResponse {
    #[oai(status = 201)]
    Created(Json<CartResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetCartResponse {
    #[oai(status = 200)]
    Ok(Json<CartResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum UpdateCartResponse {
    #[oai(status = 200)]
    Ok(Json<CartResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use business::domain::cart::model::CartItem;
    use business::domain::cart::value_objects::CartId;
    use business::domain::errors::RepositoryError;
    use chrono::Utc;
    use poem::http::StatusCode;
    use poem::test::TestClient;
    use poem_openapi::OpenApiService;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Answers every cart use case from a fixed cart, or with a store failure.
    struct StubCarts {
        cart: Option<Cart>,
        fail: bool,
        mutations: AtomicUsize,
    }

    impl StubCarts {
        fn respond(&self) -> Result<Option<Cart>, CartError> {
            if self.fail {
                return Err(CartError::Repository(RepositoryError::DatabaseError));
            }
            Ok(self.cart.clone())
        }
    }

    #[async_trait]
    impl CreateCartUseCase for StubCarts {
        async fn execute(&self, _params: CreateCartParams) -> Result<Cart, CartError> {
            self.respond()
                .map(|cart| cart.unwrap_or_else(|| Cart::new(Utc::now())))
        }
    }

    #[async_trait]
    impl GetCartByIdUseCase for StubCarts {
        async fn execute(&self, params: GetCartByIdParams) -> Result<Option<Cart>, CartError> {
            if CartId::parse(&params.id).is_none() {
                return Ok(None);
            }
            self.respond()
        }
    }

    #[async_trait]
    impl GetCartByHashUseCase for StubCarts {
        async fn execute(&self, _params: GetCartByHashParams) -> Result<Option<Cart>, CartError> {
            self.respond()
        }
    }

    #[async_trait]
    impl AddCartItemUseCase for StubCarts {
        async fn execute(&self, _params: AddCartItemParams) -> Result<Option<Cart>, CartError> {
            self.mutations.fetch_add(1, Ordering::SeqCst);
            self.respond()
        }
    }

    #[async_trait]
    impl RemoveCartItemUseCase for StubCarts {
        async fn execute(
            &self,
            _params: RemoveCartItemParams,
        ) -> Result<Option<Cart>, CartError> {
            self.mutations.fetch_add(1, Ordering::SeqCst);
            self.respond()
        }
    }

    fn client(stub: Arc<StubCarts>) -> TestClient<poem::endpoint::BoxEndpoint<'static>> {
        let api = CartApi::new(
            stub.clone(),
            stub.clone(),
            stub.clone(),
            stub.clone(),
            stub,
        );
        TestClient::new(OpenApiService::new(api, "Shop API", "test"))
    }

    fn stub(cart: Option<Cart>, fail: bool) -> Arc<StubCarts> {
        Arc::new(StubCarts {
            cart,
            fail,
            mutations: AtomicUsize::new(0),
        })
    }

    fn cart_with_item(product_id: Uuid, quantity: i32) -> Cart {
        let cart = Cart::new(Utc::now());
        let id = cart.id;
        cart.with_items(vec![CartItem::new(id, product_id, quantity)])
    }

    #[tokio::test]
    async fn should_create_cart() {
        let cli = client(stub(None, false));

        let resp = cli.post("/carts").send().await;

        resp.assert_status(StatusCode::CREATED);
        let body: serde_json::Value = resp.0.into_body().into_json().await.unwrap();
        assert_eq!(body["hash"].as_str().unwrap().len(), 22);
        assert_eq!(body["items"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn should_answer_not_found_for_malformed_cart_id() {
        let cli = client(stub(Some(Cart::new(Utc::now())), false));

        let resp = cli.get("/carts/not-a-cart").send().await;

        resp.assert_status(StatusCode::NOT_FOUND);
        let body: serde_json::Value = resp.0.into_body().into_json().await.unwrap();
        assert_eq!(body["name"], "NotFoundError");
        assert_eq!(body["message"], "cart.not_found");
    }

    #[tokio::test]
    async fn should_return_cart_with_items() {
        let product_id = Uuid::new_v4();
        let cart = cart_with_item(product_id, 2);
        let id = cart.id;
        let cli = client(stub(Some(cart), false));

        let resp = cli.get(format!("/carts/{}", id)).send().await;

        resp.assert_status_is_ok();
        let body: serde_json::Value = resp.0.into_body().into_json().await.unwrap();
        assert_eq!(body["id"], id.to_string());
        assert_eq!(body["items"][0]["product_id"], product_id.to_string());
        assert_eq!(body["items"][0]["quantity"], 2);
        assert_eq!(body["total_quantity"], 2);
    }

    #[tokio::test]
    async fn should_reject_malformed_product_id_before_mutating() {
        let carts = stub(Some(Cart::new(Utc::now())), false);
        let cli = client(carts.clone());

        let resp = cli
            .post(format!("/carts/{}/items/not-a-product", CartId::new()))
            .send()
            .await;

        resp.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(carts.mutations.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn should_return_refreshed_cart_after_add() {
        let product_id = Uuid::new_v4();
        let cart = cart_with_item(product_id, 1);
        let id = cart.id;
        let carts = stub(Some(cart), false);
        let cli = client(carts.clone());

        let resp = cli
            .post(format!("/carts/{}/items/{}", id, product_id))
            .send()
            .await;

        resp.assert_status_is_ok();
        assert_eq!(carts.mutations.load(Ordering::SeqCst), 1);
        let body: serde_json::Value = resp.0.into_body().into_json().await.unwrap();
        assert_eq!(body["items"][0]["quantity"], 1);
    }

    #[tokio::test]
    async fn should_answer_not_found_when_removing_from_unknown_cart() {
        let cli = client(stub(None, false));

        let resp = cli
            .delete(format!("/carts/{}/items/{}", CartId::new(), Uuid::new_v4()))
            .send()
            .await;

        resp.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_answer_internal_error_when_store_fails() {
        let cli = client(stub(None, true));

        let resp = cli
            .get("/shared-carts/AAAAAAAAAAAAAAAAAAAAAA")
            .send()
            .await;

        resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = resp.0.into_body().into_json().await.unwrap();
        assert_eq!(body["message"], "repository.persistence");
    }
}
