use crate::database::DbPool;
use crate::error::AppError;
use crate::external::WeatherProvider;
use crate::handlers;
use crate::services::*;
use crate::utils::JwtService;
use actix_web::web;
use std::sync::Arc;

/// Every service the routes depend on, built once and cloned into each
/// worker.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub auth_service: AuthService,
    pub course_service: CourseService,
    pub tee_time_service: TeeTimeService,
    pub range_service: RangeService,
    pub equipment_service: EquipmentService,
    pub weather_service: WeatherService,
    pub dashboard_service: DashboardService,
    pub scorecard_service: ScorecardService,
    pub payment_service: PaymentService,
    pub admin_service: AdminService,
    pub staff_service: StaffService,
}

impl AppState {
    pub fn new(
        pool: DbPool,
        jwt_service: JwtService,
        weather_provider: Arc<dyn WeatherProvider>,
        default_location: &str,
    ) -> Self {
        Self {
            auth_service: AuthService::new(pool.clone(), jwt_service),
            course_service: CourseService::new(pool.clone()),
            tee_time_service: TeeTimeService::new(pool.clone()),
            range_service: RangeService::new(pool.clone()),
            equipment_service: EquipmentService::new(pool.clone()),
            weather_service: WeatherService::new(pool.clone(), weather_provider, default_location),
            dashboard_service: DashboardService::new(pool.clone()),
            scorecard_service: ScorecardService::new(pool.clone()),
            payment_service: PaymentService::new(pool.clone()),
            admin_service: AdminService::new(pool.clone()),
            staff_service: StaffService::new(pool.clone()),
            pool,
        }
    }

    /// Registers the services as app data plus every route.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.pool.clone()))
            .app_data(web::Data::new(self.auth_service.clone()))
            .app_data(web::Data::new(self.course_service.clone()))
            .app_data(web::Data::new(self.tee_time_service.clone()))
            .app_data(web::Data::new(self.range_service.clone()))
            .app_data(web::Data::new(self.equipment_service.clone()))
            .app_data(web::Data::new(self.weather_service.clone()))
            .app_data(web::Data::new(self.dashboard_service.clone()))
            .app_data(web::Data::new(self.scorecard_service.clone()))
            .app_data(web::Data::new(self.payment_service.clone()))
            .app_data(web::Data::new(self.admin_service.clone()))
            .app_data(web::Data::new(self.staff_service.clone()))
            .configure(configure_routes);
    }
}

/// Extractor error handlers plus the health and `/api/v1` routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .configure(handlers::health_config)
        .service(
            web::scope("/api/v1")
                .configure(handlers::auth_config)
                .configure(handlers::course_config)
                .configure(handlers::tee_time_config)
                .configure(handlers::range_config)
                .configure(handlers::equipment_config)
                .configure(handlers::weather_config)
                .configure(handlers::dashboard_config)
                .configure(handlers::scorecard_config)
                .configure(handlers::payment_config)
                .configure(handlers::admin_config)
                .configure(handlers::staff_config),
        );
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| AppError::ValidationError(format!("Invalid request body: {err}")).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(format!("Invalid query string: {err}")).into())
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(format!("Invalid path parameter: {err}")).into())
}
