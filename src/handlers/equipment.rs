use crate::middlewares::current_user;
use crate::models::*;
use crate::services::EquipmentService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    params(EquipmentQuery),
    responses(
        (status = 200, description = "Equipment that can be rented now", body = [EquipmentResponse])
    )
)]
pub async fn list_equipment(
    equipment_service: web::Data<EquipmentService>,
    query: web::Query<EquipmentQuery>,
) -> Result<HttpResponse> {
    match equipment_service.list(query.category.as_deref()).await {
        Ok(items) => Ok(HttpResponse::Ok().json(items)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment id")),
    responses(
        (status = 200, description = "Equipment item", body = EquipmentResponse),
        (status = 404, description = "Unknown equipment", body = ErrorBody)
    )
)]
pub async fn get_equipment(
    equipment_service: web::Data<EquipmentService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match equipment_service.get(path.into_inner()).await {
        Ok(item) => Ok(HttpResponse::Ok().json(item)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/equipment/rentals",
    tag = "equipment",
    request_body = CreateRentalRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Rental created", body = RentalResponse),
        (status = 400, description = "Invalid dates, unavailable item or not enough stock", body = ErrorBody),
        (status = 404, description = "Unknown equipment", body = ErrorBody)
    )
)]
pub async fn rent(
    equipment_service: web::Data<EquipmentService>,
    req: HttpRequest,
    request: web::Json<CreateRentalRequest>,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    match equipment_service.rent(user.user_id, request.into_inner()).await {
        Ok(rental) => Ok(HttpResponse::Created().json(rental)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/equipment/rentals",
    tag = "equipment",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's rentals", body = [RentalResponse])
    )
)]
pub async fn list_rentals(
    equipment_service: web::Data<EquipmentService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    match equipment_service.list_rentals_for_user(user.user_id).await {
        Ok(rentals) => Ok(HttpResponse::Ok().json(rentals)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/equipment/rentals/{id}/return",
    tag = "equipment",
    params(("id" = i32, Path, description = "Rental id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Returned", body = RentalResponse),
        (status = 400, description = "Already returned", body = ErrorBody),
        (status = 404, description = "No such rental for the caller", body = ErrorBody)
    )
)]
pub async fn return_rental(
    equipment_service: web::Data<EquipmentService>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    match equipment_service
        .return_rental(path.into_inner(), Some(user.user_id))
        .await
    {
        Ok(rental) => Ok(HttpResponse::Ok().json(rental)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn equipment_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/equipment")
            .route("", web::get().to(list_equipment))
            .route("/rentals", web::post().to(rent))
            .route("/rentals", web::get().to(list_rentals))
            .route("/rentals/{id}/return", web::put().to(return_rental))
            .route("/{id}", web::get().to(get_equipment)),
    );
}
