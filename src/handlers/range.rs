use crate::middlewares::current_user;
use crate::models::*;
use crate::services::RangeService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/range/sessions",
    tag = "range",
    request_body = CreateRangeSessionRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Session booked", body = RangeSessionResponse),
        (status = 400, description = "Invalid session", body = ErrorBody)
    )
)]
pub async fn book_session(
    range_service: web::Data<RangeService>,
    req: HttpRequest,
    request: web::Json<CreateRangeSessionRequest>,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    match range_service.book_session(user.user_id, request.into_inner()).await {
        Ok(session) => Ok(HttpResponse::Created().json(session)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/range/sessions",
    tag = "range",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's sessions, latest first", body = [RangeSessionResponse])
    )
)]
pub async fn list_sessions(
    range_service: web::Data<RangeService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    match range_service.list_for_user(user.user_id).await {
        Ok(sessions) => Ok(HttpResponse::Ok().json(sessions)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/range/bucket-prices",
    tag = "range",
    responses(
        (status = 200, description = "Current bucket prices and ball counts", body = BucketPricesResponse)
    )
)]
pub async fn bucket_prices(range_service: web::Data<RangeService>) -> Result<HttpResponse> {
    match range_service.bucket_prices().await {
        Ok(prices) => Ok(HttpResponse::Ok().json(prices)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn range_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/range")
            .route("/sessions", web::post().to(book_session))
            .route("/sessions", web::get().to(list_sessions))
            .route("/bucket-prices", web::get().to(bucket_prices)),
    );
}
