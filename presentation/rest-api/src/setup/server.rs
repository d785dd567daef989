use poem::{EndpointExt, Route, Server as PoemServer, listener::TcpListener, middleware::Tracing};
use poem_openapi::OpenApiService;

use crate::{config::app_config::AppConfig, setup::dependency_injection::DependencyContainer};

pub struct Server;

impl Server {
    /// Serves until ctrl-c, then lets in-flight requests finish within the configured window.
    pub async fn run(config: AppConfig, container: DependencyContainer) -> anyhow::Result<()> {
        let addr = config.server.bind_address();
        let api_service = OpenApiService::new(
            (
                container.health_api,
                container.product_api,
                container.cart_api,
            ),
            "Shop Backend API",
            env!("CARGO_PKG_VERSION"),
        )
        .server(format!("http://{}", addr));
        let ui = api_service.swagger_ui();
        let spec = api_service.spec_endpoint();
        let app = Route::new()
            .nest("/", api_service)
            .nest("/docs", ui)
            .nest("/openapi.json", spec)
            .with(config.cors)
            .with(Tracing);

        tracing::info!(address = %addr, "server listening");
        tracing::info!("swagger UI at http://{}/docs", addr);

        PoemServer::new(TcpListener::bind(&addr))
            .run_with_graceful_shutdown(
                app,
                async {
                    if let Err(err) = tokio::signal::ctrl_c().await {
                        tracing::error!(error = %err, "failed to listen for shutdown signal");
                    }
                    tracing::info!("shutdown signal received");
                },
                Some(config.server.shutdown_timeout),
            )
            .await?;
        Ok(())
    }
}
