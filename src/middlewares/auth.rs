use crate::entities::UserRole;
use crate::error::{AppError, AppResult};
use crate::utils::JwtService;
use actix_web::body::EitherBody;
use actix_web::http::Method;
use actix_web::{
    Error, HttpMessage, HttpRequest, ResponseError,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};

/// Who may call a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessTier {
    Public,
    Authenticated,
    Staff,
    Admin,
}

impl UserRole {
    pub fn permits(&self, tier: AccessTier) -> bool {
        match tier {
            AccessTier::Public | AccessTier::Authenticated => true,
            AccessTier::Staff => matches!(self, UserRole::Staff | UserRole::Admin),
            AccessTier::Admin => matches!(self, UserRole::Admin),
        }
    }
}

/// Resolves the access tier of a request from its method and path.
///
/// Paths outside `/api/v1` (health, docs, unknown routes) are public; the
/// router answers unknown ones with 404.
pub fn resolve_tier(method: &Method, path: &str) -> AccessTier {
    if *method == Method::OPTIONS {
        return AccessTier::Public;
    }

    let Some(rest) = path.strip_prefix("/api/v1") else {
        return AccessTier::Public;
    };

    if rest == "/admin" || rest.starts_with("/admin/") {
        return AccessTier::Admin;
    }
    if rest == "/staff" || rest.starts_with("/staff/") {
        return AccessTier::Staff;
    }
    if rest == "/auth/signup" || rest == "/auth/login" {
        return AccessTier::Public;
    }

    if *method == Method::GET && is_public_read(rest) {
        return AccessTier::Public;
    }

    AccessTier::Authenticated
}

fn is_public_read(rest: &str) -> bool {
    if rest == "/courses" || rest.starts_with("/courses/") {
        return true;
    }
    if rest.starts_with("/weather/") {
        return true;
    }
    if rest == "/range/bucket-prices" || rest == "/tee-times/available" {
        return true;
    }
    if rest == "/equipment" {
        return true;
    }
    // /equipment/{id}, but not the rentals collection
    match rest.strip_prefix("/equipment/") {
        Some(segment) => !segment.is_empty() && !segment.contains('/') && segment != "rentals",
        None => false,
    }
}

/// Identity attached to authenticated requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i32,
    pub email: String,
    pub role: UserRole,
}

pub fn current_user(req: &HttpRequest) -> AppResult<AuthUser> {
    req.extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| AppError::AuthError("Authorization header required".to_string()))
}

pub struct AuthMiddleware {
    jwt_service: JwtService,
}

impl AuthMiddleware {
    pub fn new(jwt_service: JwtService) -> Self {
        Self { jwt_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            jwt_service: self.jwt_service.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    jwt_service: JwtService,
}

impl<S> AuthMiddlewareService<S> {
    fn authorize(&self, req: &ServiceRequest) -> AppResult<Option<AuthUser>> {
        let tier = resolve_tier(req.method(), req.path());
        if tier == AccessTier::Public {
            return Ok(None);
        }

        let token = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::AuthError("Authorization header required".to_string()))?;

        let claims = self.jwt_service.validate(token)?;
        let user = AuthUser {
            user_id: claims.user_id()?,
            email: claims.email,
            role: claims.role,
        };

        if !user.role.permits(tier) {
            let message = match tier {
                AccessTier::Admin => "Admin access required",
                _ => "Staff access required",
            };
            return Err(AppError::Forbidden(message.to_string()));
        }

        Ok(Some(user))
    }
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match self.authorize(&req) {
            Ok(Some(user)) => {
                req.extensions_mut().insert(user);
            }
            Ok(None) => {}
            Err(err) => {
                let response = req.into_response(err.error_response()).map_into_right_body();
                return Box::pin(async move { Ok(response) });
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}
