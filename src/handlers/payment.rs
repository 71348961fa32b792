use crate::middlewares::current_user;
use crate::models::*;
use crate::services::PaymentService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/payments",
    tag = "payments",
    request_body = CreatePaymentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Payment recorded", body = PaymentResponse),
        (status = 404, description = "No such item for the caller", body = ErrorBody),
        (status = 409, description = "Already paid", body = ErrorBody)
    )
)]
pub async fn create(
    payment_service: web::Data<PaymentService>,
    req: HttpRequest,
    request: web::Json<CreatePaymentRequest>,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    match payment_service.create(user.user_id, request.into_inner()).await {
        Ok(payment) => Ok(HttpResponse::Created().json(payment)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/payments",
    tag = "payments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's payments, latest first", body = [PaymentResponse])
    )
)]
pub async fn list(
    payment_service: web::Data<PaymentService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    match payment_service.list_for_user(user.user_id).await {
        Ok(payments) => Ok(HttpResponse::Ok().json(payments)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn payment_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/payments")
            .route("", web::post().to(create))
            .route("", web::get().to(list)),
    );
}
