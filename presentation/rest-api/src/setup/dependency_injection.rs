use std::sync::Arc;

use logger::TracingLogger;
use persistence::cart::repository::CartRepositoryPostgres;
use persistence::db::Database;
use persistence::product::repository::ProductRepositoryPostgres;

use business::application::cart::add_item::AddCartItemUseCaseImpl;
use business::application::cart::create::CreateCartUseCaseImpl;
use business::application::cart::get_by_hash::GetCartByHashUseCaseImpl;
use business::application::cart::get_by_id::GetCartByIdUseCaseImpl;
use business::application::cart::remove_item::RemoveCartItemUseCaseImpl;
use business::application::product::create::CreateProductUseCaseImpl;
use business::application::product::delete::DeleteProductUseCaseImpl;
use business::application::product::get_all::GetAllProductsUseCaseImpl;
use business::application::product::get_by_id::GetProductByIdUseCaseImpl;
use business::application::product::update::UpdateProductUseCaseImpl;

use crate::api::cart::routes::CartApi;
use crate::api::health::routes::Api as HealthApi;
use crate::api::product::routes::ProductApi;

pub struct DependencyContainer {
    pub health_api: HealthApi,
    pub product_api: ProductApi,
    pub cart_api: CartApi,
}

impl DependencyContainer {
    /// Wires every adapter and use case onto the given store handle.
    pub fn new(database: &Database) -> Self {
        let logger = Arc::new(TracingLogger);
        let health_api = HealthApi::new(database.clone());

        // Infrastructure adapters
        let product_repository = Arc::new(ProductRepositoryPostgres::new(database.pool()));
        let cart_repository = Arc::new(CartRepositoryPostgres::new(database.pool()));

        // Product use cases
        let create_product_use_case = Arc::new(CreateProductUseCaseImpl {
            repository: product_repository.clone(),
            logger: logger.clone(),
        });
        let get_all_products_use_case = Arc::new(GetAllProductsUseCaseImpl {
            repository: product_repository.clone(),
            logger: logger.clone(),
        });
        let get_product_by_id_use_case = Arc::new(GetProductByIdUseCaseImpl {
            repository: product_repository.clone(),
            logger: logger.clone(),
        });
        let update_product_use_case = Arc::new(UpdateProductUseCaseImpl {
            repository: product_repository.clone(),
            logger: logger.clone(),
        });
        let delete_product_use_case = Arc::new(DeleteProductUseCaseImpl {
            repository: product_repository,
            logger: logger.clone(),
        });

        // Cart use cases
        let create_cart_use_case = Arc::new(CreateCartUseCaseImpl {
            repository: cart_repository.clone(),
            logger: logger.clone(),
        });
        let get_cart_by_id_use_case = Arc::new(GetCartByIdUseCaseImpl {
            repository: cart_repository.clone(),
            logger: logger.clone(),
        });
        let get_cart_by_hash_use_case = Arc::new(GetCartByHashUseCaseImpl {
            repository: cart_repository.clone(),
            logger: logger.clone(),
        });
        let add_cart_item_use_case = Arc::new(AddCartItemUseCaseImpl {
            repository: cart_repository.clone(),
            logger: logger.clone(),
        });
        let remove_cart_item_use_case = Arc::new(RemoveCartItemUseCaseImpl {
            repository: cart_repository,
            logger,
        });

        let product_api = ProductApi::new(
            create_product_use_case,
            get_all_products_use_case,
            get_product_by_id_use_case,
            update_product_use_case,
            delete_product_use_case,
        );

        let cart_api = CartApi::new(
            create_cart_use_case,
            get_cart_by_id_use_case,
            get_cart_by_hash_use_case,
            add_cart_item_use_case,
            remove_cart_item_use_case,
        );

        Self {
            health_api,
            product_api,
            cart_api,
        }
    }
}
