use crate::middlewares::current_user;
use crate::models::*;
use crate::services::ScorecardService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/scorecards",
    tag = "scorecards",
    request_body = CreateScorecardRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Scorecard recorded", body = ScorecardResponse),
        (status = 400, description = "Invalid hole entries", body = ErrorBody),
        (status = 404, description = "Unknown course or tee time", body = ErrorBody)
    )
)]
pub async fn create(
    scorecard_service: web::Data<ScorecardService>,
    req: HttpRequest,
    request: web::Json<CreateScorecardRequest>,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    match scorecard_service.create(user.user_id, request.into_inner()).await {
        Ok(card) => Ok(HttpResponse::Created().json(card)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/scorecards",
    tag = "scorecards",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's rounds, latest first", body = [ScorecardResponse])
    )
)]
pub async fn list(
    scorecard_service: web::Data<ScorecardService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    match scorecard_service.list_for_user(user.user_id).await {
        Ok(cards) => Ok(HttpResponse::Ok().json(cards)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/scorecards/{id}",
    tag = "scorecards",
    params(("id" = i32, Path, description = "Scorecard id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Scorecard with hole entries", body = ScorecardResponse),
        (status = 404, description = "No such scorecard for the caller", body = ErrorBody)
    )
)]
pub async fn get(
    scorecard_service: web::Data<ScorecardService>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    match scorecard_service.get(path.into_inner(), user.user_id).await {
        Ok(card) => Ok(HttpResponse::Ok().json(card)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn scorecard_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/scorecards")
            .route("", web::post().to(create))
            .route("", web::get().to(list))
            .route("/{id}", web::get().to(get)),
    );
}
