use crate::database::DbPool;
use crate::models::*;
use actix_web::{HttpResponse, Result, web};
use chrono::Utc;

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "All dependencies reachable", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    )
)]
pub async fn health(pool: web::Data<DbPool>) -> Result<HttpResponse> {
    let database_up = match pool.ping().await {
        Ok(()) => true,
        Err(e) => {
            log::error!("Health check database ping failed: {}", e);
            false
        }
    };

    let body = HealthResponse {
        status: if database_up { "healthy" } else { "unhealthy" }.to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        services: ServiceHealth {
            database: if database_up { "up" } else { "down" }.to_string(),
        },
    };

    if database_up {
        Ok(HttpResponse::Ok().json(body))
    } else {
        Ok(HttpResponse::ServiceUnavailable().json(body))
    }
}

#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Ready to serve", body = ReadyResponse),
        (status = 503, description = "Database unreachable", body = ReadyResponse)
    )
)]
pub async fn ready(pool: web::Data<DbPool>) -> Result<HttpResponse> {
    match pool.ping().await {
        Ok(()) => Ok(HttpResponse::Ok().json(ReadyResponse { ready: true })),
        Err(_) => Ok(HttpResponse::ServiceUnavailable().json(ReadyResponse { ready: false })),
    }
}

#[utoipa::path(
    get,
    path = "/health/live",
    tag = "health",
    responses(
        (status = 200, description = "Process is up", body = LiveResponse)
    )
)]
pub async fn live() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(LiveResponse { alive: true }))
}

pub fn health_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/health")
            .route("", web::get().to(health))
            .route("/ready", web::get().to(ready))
            .route("/live", web::get().to(live)),
    );
}
