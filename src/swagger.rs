use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{
    BookingStatus, BucketSize, ConditionStatus, PaymentStatus, ReferenceType, RentalStatus,
    SessionStatus, TransactionStatus, UserRole,
};
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::signup,
        handlers::auth::login,
        handlers::auth::profile,
        handlers::course::list_courses,
        handlers::course::get_course,
        handlers::tee_time::available,
        handlers::tee_time::create,
        handlers::tee_time::list_mine,
        handlers::range::book_session,
        handlers::range::list_sessions,
        handlers::range::bucket_prices,
        handlers::equipment::list_equipment,
        handlers::equipment::get_equipment,
        handlers::equipment::rent,
        handlers::equipment::list_rentals,
        handlers::equipment::return_rental,
        handlers::weather::course_weather,
        handlers::weather::history,
        handlers::dashboard::stats,
        handlers::dashboard::activity,
        handlers::scorecard::create,
        handlers::scorecard::list,
        handlers::scorecard::get,
        handlers::payment::create,
        handlers::payment::list,
        handlers::admin::create_course,
        handlers::admin::update_course,
        handlers::admin::delete_course,
        handlers::admin::create_equipment,
        handlers::admin::update_equipment,
        handlers::admin::delete_equipment,
        handlers::admin::list_users,
        handlers::admin::get_user,
        handlers::admin::update_user,
        handlers::admin::delete_user,
        handlers::admin::list_bookings,
        handlers::admin::list_rentals,
        handlers::admin::stats,
        handlers::admin::list_settings,
        handlers::admin::upsert_setting,
        handlers::staff::equipment_status,
        handlers::staff::booking_status,
        handlers::staff::course_status,
        handlers::staff::session_status,
        handlers::staff::return_rental,
        handlers::staff::todays_bookings,
        handlers::staff::active_rentals,
        handlers::staff::stats,
        handlers::health::health,
        handlers::health::ready,
        handlers::health::live,
    ),
    components(
        schemas(
            ErrorBody,
            MessageResponse,
            UserRole,
            SignupRequest,
            LoginRequest,
            UserResponse,
            UserSummary,
            AuthResponse,
            AdminUpdateUserRequest,
            HoleResponse,
            HoleInput,
            CourseResponse,
            CourseSummary,
            CreateCourseRequest,
            UpdateCourseRequest,
            CourseStatusRequest,
            BookingStatus,
            PaymentStatus,
            AvailableSlot,
            CreateTeeTimeRequest,
            TeeTimeResponse,
            BookingStatusRequest,
            BucketSize,
            SessionStatus,
            CreateRangeSessionRequest,
            RangeSessionResponse,
            BallCounts,
            BucketPricesResponse,
            SessionStatusRequest,
            ConditionStatus,
            RentalStatus,
            EquipmentResponse,
            CreateEquipmentRequest,
            UpdateEquipmentRequest,
            EquipmentStatusRequest,
            CreateRentalRequest,
            RentalResponse,
            WeatherResponse,
            ScorecardHoleInput,
            CreateScorecardRequest,
            ScorecardHoleResponse,
            ScorecardResponse,
            ReferenceType,
            TransactionStatus,
            CreatePaymentRequest,
            PaymentResponse,
            DashboardStats,
            ActivityItem,
            AdminStats,
            StaffStats,
            SettingResponse,
            UpdateSettingRequest,
            ServiceHealth,
            HealthResponse,
            ReadyResponse,
            LiveResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Sign-up, login and profile"),
        (name = "courses", description = "Course catalogue"),
        (name = "tee-times", description = "Tee time availability and booking"),
        (name = "range", description = "Driving range sessions"),
        (name = "equipment", description = "Equipment catalogue and rentals"),
        (name = "weather", description = "Cached course weather"),
        (name = "dashboard", description = "Customer dashboard"),
        (name = "scorecards", description = "Round scorecards"),
        (name = "payments", description = "Recorded payments"),
        (name = "admin", description = "Administration"),
        (name = "staff", description = "Front-desk operations"),
        (name = "health", description = "Liveness and readiness probes"),
    ),
    info(
        title = "Fairway Backend API",
        version = "1.0.0",
        description = "Golf course operations REST API"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
