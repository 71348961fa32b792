use crate::middlewares::current_user;
use crate::models::*;
use crate::services::TeeTimeService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/tee-times/available",
    tag = "tee-times",
    params(AvailableSlotsQuery),
    responses(
        (status = 200, description = "Open 15-minute slots in start order", body = [AvailableSlot]),
        (status = 400, description = "Malformed date", body = ErrorBody),
        (status = 404, description = "Unknown course", body = ErrorBody)
    )
)]
pub async fn available(
    tee_time_service: web::Data<TeeTimeService>,
    query: web::Query<AvailableSlotsQuery>,
) -> Result<HttpResponse> {
    match tee_time_service
        .available_slots(query.course_id, &query.date)
        .await
    {
        Ok(slots) => Ok(HttpResponse::Ok().json(slots)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/tee-times",
    tag = "tee-times",
    request_body = CreateTeeTimeRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Booked", body = TeeTimeResponse),
        (status = 400, description = "Invalid booking", body = ErrorBody),
        (status = 404, description = "Unknown course", body = ErrorBody),
        (status = 409, description = "Slot already booked", body = ErrorBody)
    )
)]
pub async fn create(
    tee_time_service: web::Data<TeeTimeService>,
    req: HttpRequest,
    request: web::Json<CreateTeeTimeRequest>,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    match tee_time_service
        .create_tee_time(user.user_id, request.into_inner())
        .await
    {
        Ok(booking) => Ok(HttpResponse::Created().json(booking)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/tee-times",
    tag = "tee-times",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's bookings, latest first", body = [TeeTimeResponse])
    )
)]
pub async fn list_mine(
    tee_time_service: web::Data<TeeTimeService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    match tee_time_service.list_for_user(user.user_id).await {
        Ok(bookings) => Ok(HttpResponse::Ok().json(bookings)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn tee_time_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tee-times")
            .route("/available", web::get().to(available))
            .route("", web::post().to(create))
            .route("", web::get().to(list_mine)),
    );
}
