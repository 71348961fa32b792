use crate::models::*;
use crate::services::CourseService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/courses",
    tag = "courses",
    responses(
        (status = 200, description = "Active courses with their holes", body = [CourseResponse])
    )
)]
pub async fn list_courses(course_service: web::Data<CourseService>) -> Result<HttpResponse> {
    match course_service.list_courses().await {
        Ok(courses) => Ok(HttpResponse::Ok().json(courses)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/courses/{id}",
    tag = "courses",
    params(("id" = i32, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course with holes", body = CourseResponse),
        (status = 404, description = "Unknown course", body = ErrorBody)
    )
)]
pub async fn get_course(
    course_service: web::Data<CourseService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match course_service.get_course(path.into_inner()).await {
        Ok(course) => Ok(HttpResponse::Ok().json(course)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn course_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/courses")
            .route("", web::get().to(list_courses))
            .route("/{id}", web::get().to(get_course)),
    );
}
