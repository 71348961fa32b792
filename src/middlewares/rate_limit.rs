use crate::config::RateLimitConfig;
use crate::error::AppError;
use crate::middlewares::auth::{AccessTier, resolve_tier};
use actix_web::body::EitherBody;
use actix_web::http::Method;
use actix_web::{
    Error, ResponseError,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use governor::clock::{Clock, DefaultClock};
use governor::state::keyed::DefaultKeyedStateStore;
use governor::{Quota, RateLimiter as Gcra};
use std::future::{Ready, ready};
use std::num::NonZeroU32;
use std::sync::Arc;

const AUTH_RETRY_SECS: u64 = 60;
const PRUNE_THRESHOLD: usize = 10_000;

type KeyedLimiter = Gcra<String, DefaultKeyedStateStore<String>, DefaultClock>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateClass {
    Auth,
    Public,
    General,
}

/// `None` means the request is not rate limited.
pub fn classify(method: &Method, path: &str) -> Option<RateClass> {
    let rest = path.strip_prefix("/api/v1")?;
    if *method == Method::OPTIONS {
        return None;
    }
    if rest == "/auth/signup" || rest == "/auth/login" {
        return Some(RateClass::Auth);
    }
    match resolve_tier(method, path) {
        AccessTier::Public => Some(RateClass::Public),
        _ => Some(RateClass::General),
    }
}

fn per_minute(requests: u32) -> Quota {
    Quota::per_minute(NonZeroU32::new(requests).unwrap_or(NonZeroU32::MIN))
}

/// One keyed GCRA limiter per class. Each client IP gets a burst of the
/// class's per-minute quota, refilled evenly across the minute.
#[derive(Clone)]
pub struct RateLimiter {
    auth: Arc<KeyedLimiter>,
    public: Arc<KeyedLimiter>,
    general: Arc<KeyedLimiter>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            auth: Arc::new(Gcra::keyed(per_minute(config.auth_per_minute))),
            public: Arc::new(Gcra::keyed(per_minute(config.public_per_minute))),
            general: Arc::new(Gcra::keyed(per_minute(config.general_per_minute))),
        }
    }

    fn limiter(&self, class: RateClass) -> &KeyedLimiter {
        match class {
            RateClass::Auth => &self.auth,
            RateClass::Public => &self.public,
            RateClass::General => &self.general,
        }
    }

    /// Counts one request. Returns the seconds until the next request would
    /// be admitted when the client's quota is spent.
    pub fn check(&self, class: RateClass, client: &str) -> Result<(), u64> {
        let limiter = self.limiter(class);
        if limiter.len() > PRUNE_THRESHOLD {
            limiter.retain_recent();
        }

        limiter.check_key(&client.to_string()).map_err(|not_until| {
            let wait = not_until.wait_time_from(DefaultClock::default().now());
            (wait.as_secs_f64().ceil() as u64).max(1)
        })
    }

    fn rejection(class: RateClass, retry_after: u64) -> AppError {
        match class {
            RateClass::Auth => AppError::RateLimited {
                message: "Too many login attempts. Please try again in 60 seconds.".to_string(),
                retry_after: AUTH_RETRY_SECS,
            },
            _ => AppError::RateLimited {
                message: "Too many requests. Please slow down.".to_string(),
                retry_after,
            },
        }
    }
}

/// Client key: the first `Forwarded`/`X-Forwarded-For` hop, else the peer IP.
fn client_key(req: &ServiceRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .map(str::to_string)
        .unwrap_or_else(|| "unknown".to_string())
}

pub struct RateLimitMiddleware {
    limiter: RateLimiter,
}

impl RateLimitMiddleware {
    /// The limiter is shared, so build it once outside the `HttpServer`
    /// factory.
    pub fn new(limiter: RateLimiter) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService {
            service,
            limiter: self.limiter.clone(),
        }))
    }
}

pub struct RateLimitMiddlewareService<S> {
    service: S,
    limiter: RateLimiter,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
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
        if let Some(class) = classify(req.method(), req.path()) {
            let client = client_key(&req);

            if let Err(retry_after) = self.limiter.check(class, &client) {
                log::warn!("Rate limit hit for {client} on {}", req.path());
                let err = RateLimiter::rejection(class, retry_after);
                let response = req.into_response(err.error_response()).map_into_right_body();
                return Box::pin(async move { Ok(response) });
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn limiter() -> RateLimiter {
        RateLimiter::new(RateLimitConfig {
            general_per_minute: 3,
            auth_per_minute: 2,
            public_per_minute: 4,
        })
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(&Method::GET, "/health"), None);
        assert_eq!(classify(&Method::GET, "/swagger-ui/"), None);
        assert_eq!(classify(&Method::OPTIONS, "/api/v1/auth/login"), None);
        assert_eq!(
            classify(&Method::POST, "/api/v1/auth/login"),
            Some(RateClass::Auth)
        );
        assert_eq!(
            classify(&Method::GET, "/api/v1/courses"),
            Some(RateClass::Public)
        );
        assert_eq!(
            classify(&Method::POST, "/api/v1/tee-times"),
            Some(RateClass::General)
        );
    }

    #[test]
    fn test_burst_is_capped_per_client() {
        let limiter = limiter();
        assert!(limiter.check(RateClass::Auth, "10.0.0.1").is_ok());
        assert!(limiter.check(RateClass::Auth, "10.0.0.1").is_ok());
        let retry = limiter.check(RateClass::Auth, "10.0.0.1").unwrap_err();
        // two per minute refill one every 30 seconds
        assert!((1..=30).contains(&retry), "retry after {retry}");

        // other clients and classes are counted separately
        assert!(limiter.check(RateClass::Auth, "10.0.0.2").is_ok());
        assert!(limiter.check(RateClass::General, "10.0.0.1").is_ok());
        assert!(limiter.check(RateClass::Auth, "10.0.0.1").is_err());
    }

    #[test]
    fn test_class_quotas_differ() {
        let limiter = limiter();
        for _ in 0..3 {
            assert!(limiter.check(RateClass::General, "ip").is_ok());
        }
        assert!(limiter.check(RateClass::General, "ip").is_err());

        for _ in 0..4 {
            assert!(limiter.check(RateClass::Public, "ip").is_ok());
        }
        assert!(limiter.check(RateClass::Public, "ip").is_err());
    }

    #[test]
    fn test_zero_quota_still_admits_one() {
        let limiter = RateLimiter::new(RateLimitConfig {
            general_per_minute: 0,
            auth_per_minute: 0,
            public_per_minute: 0,
        });
        assert!(limiter.check(RateClass::General, "ip").is_ok());
        assert!(limiter.check(RateClass::General, "ip").is_err());
    }

    #[test]
    fn test_client_key_prefers_forwarded_ip() {
        let forwarded = TestRequest::default()
            .insert_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.1"))
            .peer_addr("10.0.0.1:40000".parse().unwrap())
            .to_srv_request();
        assert_eq!(client_key(&forwarded), "203.0.113.7");

        let direct = TestRequest::default()
            .peer_addr("198.51.100.2:40000".parse().unwrap())
            .to_srv_request();
        assert_eq!(client_key(&direct), "198.51.100.2");
    }

    #[test]
    fn test_auth_rejection_body() {
        match RateLimiter::rejection(RateClass::Auth, 12) {
            AppError::RateLimited {
                message,
                retry_after,
            } => {
                assert_eq!(
                    message,
                    "Too many login attempts. Please try again in 60 seconds."
                );
                assert_eq!(retry_after, 60);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
