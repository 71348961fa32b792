use crate::models::*;
use crate::services::WeatherService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/weather/course/{id}",
    tag = "weather",
    params(("id" = i32, Path, description = "Course id"), WeatherQuery),
    responses(
        (status = 200, description = "Today's reading for the course", body = WeatherResponse),
        (status = 404, description = "Unknown course", body = ErrorBody),
        (status = 503, description = "Provider unavailable or not configured", body = ErrorBody)
    )
)]
pub async fn course_weather(
    weather_service: web::Data<WeatherService>,
    path: web::Path<i32>,
    query: web::Query<WeatherQuery>,
) -> Result<HttpResponse> {
    let force_refresh = query.force_refresh();
    match weather_service
        .course_weather(path.into_inner(), force_refresh)
        .await
    {
        Ok(reading) => Ok(HttpResponse::Ok().json(reading)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/weather/course/{id}/history",
    tag = "weather",
    params(("id" = i32, Path, description = "Course id"), WeatherHistoryQuery),
    responses(
        (status = 200, description = "Stored readings, newest first", body = [WeatherResponse]),
        (status = 404, description = "Unknown course", body = ErrorBody)
    )
)]
pub async fn history(
    weather_service: web::Data<WeatherService>,
    path: web::Path<i32>,
    query: web::Query<WeatherHistoryQuery>,
) -> Result<HttpResponse> {
    match weather_service.history(path.into_inner(), query.days()).await {
        Ok(readings) => Ok(HttpResponse::Ok().json(readings)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn weather_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/weather")
            .route("/course/{id}", web::get().to(course_weather))
            .route("/course/{id}/history", web::get().to(history)),
    );
}
