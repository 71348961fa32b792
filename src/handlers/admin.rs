use crate::middlewares::current_user;
use crate::models::*;
use crate::services::{AdminService, CourseService, EquipmentService, TeeTimeService};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/admin/courses",
    tag = "admin",
    request_body = CreateCourseRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 400, description = "Invalid course layout", body = ErrorBody),
        (status = 403, description = "Admin access required", body = ErrorBody)
    )
)]
pub async fn create_course(
    course_service: web::Data<CourseService>,
    request: web::Json<CreateCourseRequest>,
) -> Result<HttpResponse> {
    match course_service.create_course(request.into_inner()).await {
        Ok(course) => Ok(HttpResponse::Created().json(course)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/courses/{id}",
    tag = "admin",
    params(("id" = i32, Path, description = "Course id")),
    request_body = UpdateCourseRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Course updated", body = CourseResponse),
        (status = 404, description = "Unknown course", body = ErrorBody)
    )
)]
pub async fn update_course(
    course_service: web::Data<CourseService>,
    path: web::Path<i32>,
    request: web::Json<UpdateCourseRequest>,
) -> Result<HttpResponse> {
    match course_service
        .update_course(path.into_inner(), request.into_inner())
        .await
    {
        Ok(course) => Ok(HttpResponse::Ok().json(course)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/courses/{id}",
    tag = "admin",
    params(("id" = i32, Path, description = "Course id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Course deleted", body = MessageResponse),
        (status = 404, description = "Unknown course", body = ErrorBody)
    )
)]
pub async fn delete_course(
    course_service: web::Data<CourseService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match course_service.delete_course(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(MessageResponse::new("Course deleted successfully"))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/equipment",
    tag = "admin",
    request_body = CreateEquipmentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Equipment created", body = EquipmentResponse),
        (status = 400, description = "Invalid equipment", body = ErrorBody)
    )
)]
pub async fn create_equipment(
    equipment_service: web::Data<EquipmentService>,
    request: web::Json<CreateEquipmentRequest>,
) -> Result<HttpResponse> {
    match equipment_service.create_equipment(request.into_inner()).await {
        Ok(item) => Ok(HttpResponse::Created().json(item)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/equipment/{id}",
    tag = "admin",
    params(("id" = i32, Path, description = "Equipment id")),
    request_body = UpdateEquipmentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Equipment updated", body = EquipmentResponse),
        (status = 404, description = "Unknown equipment", body = ErrorBody)
    )
)]
pub async fn update_equipment(
    equipment_service: web::Data<EquipmentService>,
    path: web::Path<i32>,
    request: web::Json<UpdateEquipmentRequest>,
) -> Result<HttpResponse> {
    match equipment_service
        .update_equipment(path.into_inner(), request.into_inner())
        .await
    {
        Ok(item) => Ok(HttpResponse::Ok().json(item)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/equipment/{id}",
    tag = "admin",
    params(("id" = i32, Path, description = "Equipment id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Equipment deleted", body = MessageResponse),
        (status = 404, description = "Unknown equipment", body = ErrorBody)
    )
)]
pub async fn delete_equipment(
    equipment_service: web::Data<EquipmentService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match equipment_service.delete_equipment(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(MessageResponse::new("Equipment deleted successfully"))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "admin",
    params(PaginationParams),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Page of accounts")
    )
)]
pub async fn list_users(
    admin_service: web::Data<AdminService>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    match admin_service.list_users(&query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(page)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/users/{id}",
    tag = "admin",
    params(("id" = i32, Path, description = "User id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Account", body = UserResponse),
        (status = 404, description = "Unknown user", body = ErrorBody)
    )
)]
pub async fn get_user(
    admin_service: web::Data<AdminService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match admin_service.get_user(path.into_inner()).await {
        Ok(user) => Ok(HttpResponse::Ok().json(user)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/users/{id}",
    tag = "admin",
    params(("id" = i32, Path, description = "User id")),
    request_body = AdminUpdateUserRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Account updated", body = UserResponse),
        (status = 404, description = "Unknown user", body = ErrorBody)
    )
)]
pub async fn update_user(
    admin_service: web::Data<AdminService>,
    path: web::Path<i32>,
    request: web::Json<AdminUpdateUserRequest>,
) -> Result<HttpResponse> {
    match admin_service
        .update_user(path.into_inner(), request.into_inner())
        .await
    {
        Ok(user) => Ok(HttpResponse::Ok().json(user)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/users/{id}",
    tag = "admin",
    params(("id" = i32, Path, description = "User id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Account deleted", body = MessageResponse),
        (status = 400, description = "Cannot delete own account", body = ErrorBody),
        (status = 404, description = "Unknown user", body = ErrorBody)
    )
)]
pub async fn delete_user(
    admin_service: web::Data<AdminService>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let admin = current_user(&req)?;
    match admin_service.delete_user(path.into_inner(), admin.user_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(MessageResponse::new("User deleted successfully"))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/bookings",
    tag = "admin",
    params(BookingListQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Page of tee time bookings with course and booker")
    )
)]
pub async fn list_bookings(
    tee_time_service: web::Data<TeeTimeService>,
    query: web::Query<BookingListQuery>,
) -> Result<HttpResponse> {
    match tee_time_service.list_bookings(&query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(page)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/rentals",
    tag = "admin",
    params(RentalListQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Page of rentals with equipment and renter")
    )
)]
pub async fn list_rentals(
    equipment_service: web::Data<EquipmentService>,
    query: web::Query<RentalListQuery>,
) -> Result<HttpResponse> {
    match equipment_service.list_rentals(&query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(page)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/stats",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Business totals", body = AdminStats)
    )
)]
pub async fn stats(admin_service: web::Data<AdminService>) -> Result<HttpResponse> {
    match admin_service.stats().await {
        Ok(stats) => Ok(HttpResponse::Ok().json(stats)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/settings",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All settings by key", body = [SettingResponse])
    )
)]
pub async fn list_settings(admin_service: web::Data<AdminService>) -> Result<HttpResponse> {
    match admin_service.list_settings().await {
        Ok(settings) => Ok(HttpResponse::Ok().json(settings)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/settings/{key}",
    tag = "admin",
    params(("key" = String, Path, description = "Setting key, e.g. small_bucket_price")),
    request_body = UpdateSettingRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Setting saved", body = SettingResponse),
        (status = 400, description = "Invalid value", body = ErrorBody)
    )
)]
pub async fn upsert_setting(
    admin_service: web::Data<AdminService>,
    path: web::Path<String>,
    request: web::Json<UpdateSettingRequest>,
) -> Result<HttpResponse> {
    match admin_service
        .upsert_setting(&path.into_inner(), request.into_inner())
        .await
    {
        Ok(setting) => Ok(HttpResponse::Ok().json(setting)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/courses", web::post().to(create_course))
            .route("/courses/{id}", web::put().to(update_course))
            .route("/courses/{id}", web::delete().to(delete_course))
            .route("/equipment", web::post().to(create_equipment))
            .route("/equipment/{id}", web::put().to(update_equipment))
            .route("/equipment/{id}", web::delete().to(delete_equipment))
            .route("/users", web::get().to(list_users))
            .route("/users/{id}", web::get().to(get_user))
            .route("/users/{id}", web::put().to(update_user))
            .route("/users/{id}", web::delete().to(delete_user))
            .route("/bookings", web::get().to(list_bookings))
            .route("/rentals", web::get().to(list_rentals))
            .route("/stats", web::get().to(stats))
            .route("/settings", web::get().to(list_settings))
            .route("/settings/{key}", web::put().to(upsert_setting)),
    );
}
