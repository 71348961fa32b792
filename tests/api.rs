use actix_web::{App, http::StatusCode, test};
use async_trait::async_trait;
use chrono::{Duration, Local};
use fairway_backend::{
    app::AppState,
    config::{DatabaseConfig, RateLimitConfig},
    database::{create_pool, run_migrations},
    external::{WeatherProvider, WeatherReading},
    middlewares::{AuthMiddleware, RateLimitMiddleware, RateLimiter},
    models::{CreateCourseRequest, HoleInput},
    utils::JwtService,
    AppError, AppResult,
};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;

struct OfflineWeather;

#[async_trait]
impl WeatherProvider for OfflineWeather {
    fn is_configured(&self) -> bool {
        false
    }

    async fn current(&self, _location: &str) -> AppResult<WeatherReading> {
        Err(AppError::ConfigError("offline".to_string()))
    }
}

fn peer() -> SocketAddr {
    "10.1.2.3:40000".parse().unwrap()
}

async fn state() -> (AppState, JwtService) {
    let pool = create_pool(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    })
    .await
    .unwrap();
    run_migrations(&pool).await.unwrap();

    let jwt = JwtService::new("integration-secret", 24);
    let state = AppState::new(pool, jwt.clone(), Arc::new(OfflineWeather), "Testville");
    (state, jwt)
}

fn limits(auth_per_minute: u32) -> RateLimiter {
    RateLimiter::new(RateLimitConfig {
        general_per_minute: 1_000,
        auth_per_minute,
        public_per_minute: 1_000,
    })
}

macro_rules! service {
    ($state:expr, $jwt:expr, $limiter:expr) => {
        test::init_service(
            App::new()
                .wrap(AuthMiddleware::new($jwt.clone()))
                .wrap(RateLimitMiddleware::new($limiter.clone()))
                .configure(|cfg| $state.configure(cfg)),
        )
        .await
    };
}

fn signup_body(email: &str) -> Value {
    json!({
        "email": email,
        "password": "birdie123",
        "first_name": "Sam",
        "last_name": "Snead",
    })
}

async fn create_course(state: &AppState) -> i32 {
    state
        .course_service
        .create_course(CreateCourseRequest {
            name: "Pinewoods".to_string(),
            description: None,
            address: None,
            phone: None,
            email: None,
            par: Some(72),
            total_holes: Some(18),
            course_rating: None,
            slope_rating: None,
            green_fee: 50.0,
            cart_fee: Some(20.0),
            is_active: None,
            holes: vec![HoleInput {
                hole_number: 1,
                par: 4,
                yardage: Some(400),
                handicap_index: None,
                description: None,
            }],
        })
        .await
        .unwrap()
        .id
}

#[actix_web::test]
async fn test_health_is_public() {
    let (state, jwt) = state().await;
    let limiter = limits(5);
    let app = service!(state, jwt, limiter);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["database"], "up");
}

#[actix_web::test]
async fn test_protected_route_requires_token() {
    let (state, jwt) = state().await;
    let limiter = limits(5);
    let app = service!(state, jwt, limiter);

    let req = test::TestRequest::get()
        .uri("/api/v1/tee-times")
        .peer_addr(peer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Authorization header required");

    let req = test::TestRequest::get()
        .uri("/api/v1/tee-times")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .peer_addr(peer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_signup_login_and_book() {
    let (state, jwt) = state().await;
    let limiter = limits(5);
    let course_id = create_course(&state).await;
    let app = service!(state, jwt, limiter);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .peer_addr(peer())
        .set_json(signup_body("golfer@example.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .peer_addr(peer())
        .set_json(json!({ "email": "golfer@example.com", "password": "birdie123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let token = body["token"].as_str().unwrap().to_string();
    assert_eq!(body["user"]["role"], "customer");

    let date = (Local::now().date_naive() + Duration::days(1))
        .format("%Y-%m-%d")
        .to_string();
    let booking = json!({
        "course_id": course_id,
        "booking_date": date,
        "tee_time": "08:30",
        "players_count": 2,
        "cart_required": true,
    });

    let req = test::TestRequest::post()
        .uri("/api/v1/tee-times")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .peer_addr(peer())
        .set_json(&booking)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total_amount"], 120.0);
    assert_eq!(body["booking_status"], "confirmed");
    assert_eq!(body["course"]["id"], course_id);
    assert_eq!(body["user"]["email"], "golfer@example.com");

    let req = test::TestRequest::post()
        .uri("/api/v1/tee-times")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .peer_addr(peer())
        .set_json(&booking)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Tee time slot is already booked");

    let req = test::TestRequest::get()
        .uri("/api/v1/tee-times")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .peer_addr(peer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["course"]["id"], course_id);
    assert_eq!(body[0]["user"]["email"], "golfer@example.com");
}

#[actix_web::test]
async fn test_admin_routes_check_role() {
    let (state, jwt) = state().await;
    let limiter = limits(10);
    state
        .auth_service
        .ensure_admin("admin@example.com", "admin-pass")
        .await
        .unwrap();
    let app = service!(state, jwt, limiter);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .peer_addr(peer())
        .set_json(signup_body("customer@example.com"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let customer_token = body["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/stats")
        .insert_header(("Authorization", format!("Bearer {customer_token}")))
        .peer_addr(peer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Admin access required");

    let req = test::TestRequest::get()
        .uri("/api/v1/staff/stats")
        .insert_header(("Authorization", format!("Bearer {customer_token}")))
        .peer_addr(peer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .peer_addr(peer())
        .set_json(json!({ "email": "admin@example.com", "password": "admin-pass" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let admin_token = body["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/stats")
        .insert_header(("Authorization", format!("Bearer {admin_token}")))
        .peer_addr(peer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total_users"], 2);
}

#[actix_web::test]
async fn test_auth_endpoints_are_rate_limited() {
    let (state, jwt) = state().await;
    let limiter = limits(5);
    let app = service!(state, jwt, limiter);

    for _ in 0..5 {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .peer_addr(peer())
            .set_json(json!({ "email": "nobody@example.com", "password": "wrong-pass" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .peer_addr(peer())
        .set_json(json!({ "email": "nobody@example.com", "password": "wrong-pass" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        resp.headers().get("Retry-After").and_then(|v| v.to_str().ok()),
        Some("60")
    );
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["error"],
        "Too many login attempts. Please try again in 60 seconds."
    );

    // another client still gets through
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .peer_addr("10.9.9.9:1".parse().unwrap())
        .set_json(json!({ "email": "nobody@example.com", "password": "wrong-pass" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_rate_limit_keys_on_forwarded_client() {
    let (state, jwt) = state().await;
    let limiter = limits(2);
    let app = service!(state, jwt, limiter);

    let login = |forwarded_for: &str| {
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .peer_addr(peer())
            .insert_header(("X-Forwarded-For", forwarded_for.to_string()))
            .set_json(json!({ "email": "nobody@example.com", "password": "wrong-pass" }))
            .to_request()
    };

    for _ in 0..2 {
        let resp = test::call_service(&app, login("203.0.113.7")).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
    let resp = test::call_service(&app, login("203.0.113.7")).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

    // same proxy peer, different client behind it
    let resp = test::call_service(&app, login("198.51.100.20")).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_malformed_body_is_bad_request() {
    let (state, jwt) = state().await;
    let limiter = limits(5);
    let app = service!(state, jwt, limiter);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .peer_addr(peer())
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
}
