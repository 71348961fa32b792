use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::{DbErr, SqlErr};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Rate limited, retry after {retry_after}s")]
    RateLimited { message: String, retry_after: u64 },

    #[error("External API error: {0}")]
    ExternalApiError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl AppError {
    /// Maps a unique-constraint violation to `Conflict` with the given message.
    /// Every other database error passes through unchanged.
    pub fn conflict_on_unique(err: DbErr, message: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                log::info!("Unique constraint rejected write: {detail}");
                AppError::Conflict(message.to_string())
            }
            _ => AppError::DatabaseError(err),
        }
    }

    pub fn is_unique_violation(err: &DbErr) -> bool {
        matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::SerdeJsonError(_) => StatusCode::BAD_REQUEST,
            AppError::AuthError(_) | AppError::JwtError(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) | AppError::DatabaseError(DbErr::RecordNotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::ExternalApiError(_) | AppError::ConfigError(_) | AppError::ReqwestError(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let message = match self {
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                msg.clone()
            }
            AppError::SerdeJsonError(err) => {
                log::warn!("Malformed JSON: {err}");
                format!("Invalid JSON: {err}")
            }
            AppError::AuthError(msg) => {
                log::warn!("Authentication error: {msg}");
                msg.clone()
            }
            AppError::JwtError(err) => {
                log::warn!("JWT error: {err}");
                "Invalid token".to_string()
            }
            AppError::Forbidden(msg) => {
                log::warn!("Forbidden access: {msg}");
                msg.clone()
            }
            AppError::NotFound(msg) => msg.clone(),
            AppError::DatabaseError(DbErr::RecordNotFound(msg)) => msg.clone(),
            AppError::Conflict(msg) => msg.clone(),
            AppError::RateLimited {
                message,
                retry_after,
            } => {
                log::warn!("Rate limit exceeded");
                return HttpResponse::build(status_code)
                    .insert_header(("Retry-After", retry_after.to_string()))
                    .json(json!({
                        "error": message,
                        "retry_after": retry_after,
                    }));
            }
            AppError::ExternalApiError(msg) => {
                log::error!("External API error: {msg}");
                msg.clone()
            }
            AppError::ReqwestError(err) => {
                log::error!("Upstream request failed: {err}");
                "Upstream service unavailable".to_string()
            }
            AppError::ConfigError(msg) => {
                log::error!("Config error: {msg}");
                msg.clone()
            }
            AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                "Database error".to_string()
            }
            AppError::InternalError(msg) => {
                log::error!("Internal error: {msg}");
                "Internal server error".to_string()
            }
        };

        HttpResponse::build(status_code).json(json!({ "error": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let resp = err.error_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn test_error_body_is_flat() {
        let (status, body) = body_json(AppError::Conflict("Tee time not available".into())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body, json!({ "error": "Tee time not available" }));
    }

    #[actix_web::test]
    async fn test_internal_details_are_hidden() {
        let (status, body) =
            body_json(AppError::DatabaseError(DbErr::Custom("connection reset".into()))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Database error");
    }

    #[actix_web::test]
    async fn test_rate_limited_carries_retry_after() {
        let (status, body) = body_json(AppError::RateLimited {
            message: "Too many login attempts. Please try again in 60 seconds.".into(),
            retry_after: 60,
        })
        .await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["retry_after"], 60);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::ValidationError(String::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Forbidden(String::new()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::ConfigError(String::new()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::ExternalApiError(String::new()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
