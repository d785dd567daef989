use chrono::Utc;
use persistence::db::Database;
use poem_openapi::{ApiResponse, Object, OpenApi, payload::Json};
use serde::{Deserialize, Serialize};

use crate::api::tags::ApiTags;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct HealthCheckResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// "up" when the database answers a query
    pub database: String,
    /// Current server timestamp
    pub timestamp: String,
    /// Service version
    pub version: String,
}

#[derive(ApiResponse)]
pub enum HealthResponse {
    #[oai(status = 200)]
    Healthy(Json<HealthCheckResponse>),
    #[oai(status = 503)]
    Degraded(Json<HealthCheckResponse>),
}

/// Health API for liveness and readiness probes
pub struct Api {
    database: Database,
}

impl Api {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

#[OpenApi]
impl Api {
    /// Health check endpoint
    ///
    /// Reports service status and database reachability.
    /// Answers 503 when the database cannot be queried.
    #[oai(path = "/health", method = "get", tag = "ApiTags::Health")]
    async fn health_check(&self) -> HealthResponse {
        let database_up = self.database.ping().await;
        let body = HealthCheckResponse {
            status: if database_up { "healthy" } else { "degraded" }.to_string(),
            database: if database_up { "up" } else { "down" }.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        };

        if database_up {
            HealthResponse::Healthy(Json(body))
        } else {
            tracing::warn!("health check: database unreachable");
            HealthResponse::Degraded(Json(body))
        }
    }
}
