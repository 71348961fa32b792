use crate::models::*;
use crate::services::{
    CourseService, EquipmentService, RangeService, StaffService, TeeTimeService,
};
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    put,
    path = "/staff/equipment/{id}/status",
    tag = "staff",
    params(("id" = i32, Path, description = "Equipment id")),
    request_body = EquipmentStatusRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Equipment status updated", body = EquipmentResponse),
        (status = 403, description = "Staff access required", body = ErrorBody),
        (status = 404, description = "Unknown equipment", body = ErrorBody)
    )
)]
pub async fn equipment_status(
    equipment_service: web::Data<EquipmentService>,
    path: web::Path<i32>,
    request: web::Json<EquipmentStatusRequest>,
) -> Result<HttpResponse> {
    match equipment_service
        .set_status(path.into_inner(), request.into_inner())
        .await
    {
        Ok(item) => Ok(HttpResponse::Ok().json(item)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/staff/bookings/{id}/status",
    tag = "staff",
    params(("id" = i32, Path, description = "Tee time id")),
    request_body = BookingStatusRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Booking status updated", body = TeeTimeResponse),
        (status = 404, description = "Unknown booking", body = ErrorBody),
        (status = 409, description = "Slot was rebooked meanwhile", body = ErrorBody)
    )
)]
pub async fn booking_status(
    tee_time_service: web::Data<TeeTimeService>,
    path: web::Path<i32>,
    request: web::Json<BookingStatusRequest>,
) -> Result<HttpResponse> {
    match tee_time_service
        .update_booking_status(path.into_inner(), request.booking_status)
        .await
    {
        Ok(booking) => Ok(HttpResponse::Ok().json(booking)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/staff/courses/{id}/status",
    tag = "staff",
    params(("id" = i32, Path, description = "Course id")),
    request_body = CourseStatusRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Course opened or closed", body = CourseResponse),
        (status = 404, description = "Unknown course", body = ErrorBody)
    )
)]
pub async fn course_status(
    course_service: web::Data<CourseService>,
    path: web::Path<i32>,
    request: web::Json<CourseStatusRequest>,
) -> Result<HttpResponse> {
    match course_service
        .set_course_status(path.into_inner(), request.is_active)
        .await
    {
        Ok(course) => Ok(HttpResponse::Ok().json(course)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/staff/range/sessions/{id}/status",
    tag = "staff",
    params(("id" = i32, Path, description = "Range session id")),
    request_body = SessionStatusRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Session status updated", body = RangeSessionResponse),
        (status = 404, description = "Unknown session", body = ErrorBody)
    )
)]
pub async fn session_status(
    range_service: web::Data<RangeService>,
    path: web::Path<i32>,
    request: web::Json<SessionStatusRequest>,
) -> Result<HttpResponse> {
    match range_service
        .update_session_status(path.into_inner(), request.session_status)
        .await
    {
        Ok(session) => Ok(HttpResponse::Ok().json(session)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/staff/rentals/{id}/return",
    tag = "staff",
    params(("id" = i32, Path, description = "Rental id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Rental checked in", body = RentalResponse),
        (status = 400, description = "Already returned", body = ErrorBody),
        (status = 404, description = "Unknown rental", body = ErrorBody)
    )
)]
pub async fn return_rental(
    equipment_service: web::Data<EquipmentService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match equipment_service.return_rental(path.into_inner(), None).await {
        Ok(rental) => Ok(HttpResponse::Ok().json(rental)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/staff/bookings/today",
    tag = "staff",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Today's bookings in slot order", body = [TeeTimeResponse])
    )
)]
pub async fn todays_bookings(tee_time_service: web::Data<TeeTimeService>) -> Result<HttpResponse> {
    match tee_time_service.todays_bookings().await {
        Ok(bookings) => Ok(HttpResponse::Ok().json(bookings)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/staff/rentals/active",
    tag = "staff",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Rentals not yet returned, earliest due first", body = [RentalResponse])
    )
)]
pub async fn active_rentals(equipment_service: web::Data<EquipmentService>) -> Result<HttpResponse> {
    match equipment_service.active_rentals().await {
        Ok(rentals) => Ok(HttpResponse::Ok().json(rentals)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/staff/stats",
    tag = "staff",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Front-desk counters", body = StaffStats)
    )
)]
pub async fn stats(staff_service: web::Data<StaffService>) -> Result<HttpResponse> {
    match staff_service.stats().await {
        Ok(stats) => Ok(HttpResponse::Ok().json(stats)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn staff_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/staff")
            .route("/equipment/{id}/status", web::put().to(equipment_status))
            .route("/bookings/today", web::get().to(todays_bookings))
            .route("/bookings/{id}/status", web::put().to(booking_status))
            .route("/courses/{id}/status", web::put().to(course_status))
            .route("/range/sessions/{id}/status", web::put().to(session_status))
            .route("/rentals/active", web::get().to(active_rentals))
            .route("/rentals/{id}/return", web::put().to(return_rental))
            .route("/stats", web::get().to(stats)),
    );
}
