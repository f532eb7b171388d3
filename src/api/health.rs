use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::services::UserService;

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub database: String,
    pub timestamp: i64,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service and database are reachable", body = HealthResponse),
        (status = 503, description = "Database ping failed", body = HealthResponse)
    )
)]
pub async fn health_check(service: web::Data<UserService>) -> HttpResponse {
    let (status, database) = match service.ping().await {
        Ok(()) => ("healthy", "connected".to_string()),
        Err(e) => {
            log::warn!("⚠️ Health check failed: {}", e);
            ("unhealthy", "unreachable".to_string())
        }
    };

    let body = HealthResponse {
        status: status.to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
        timestamp: chrono::Utc::now().timestamp(),
    };

    if status == "healthy" {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
