use actix_web::{App, HttpServer, middleware::Logger};
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter
use chrono::Local;  // timestamp in log lines
use std::sync::Arc;

use fairway_backend::{
    app::AppState,
    config::Config,
    database::{create_pool, run_migrations},
    external::{WeatherApiClient, WeatherProvider},
    middlewares::{AuthMiddleware, RateLimitMiddleware, RateLimiter, create_cors, security_headers},
    swagger::swagger_config,
    utils::JwtService,
};

fn startup_error(context: &str, e: impl std::fmt::Display) -> std::io::Error {
    log::error!("{}: {}", context, e);
    std::io::Error::other(format!("{context}: {e}"))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml().map_err(|e| startup_error("Failed to load configuration", e))?;

    let pool = create_pool(&config.database)
        .await
        .map_err(|e| startup_error("Failed to create database connection pool", e))?;

    run_migrations(&pool)
        .await
        .map_err(|e| startup_error("Failed to run database migrations", e))?;

    let jwt_service = JwtService::new(&config.jwt.secret, config.jwt.expiry_hours);

    let weather_client = WeatherApiClient::new(config.weather.clone())
        .map_err(|e| startup_error("Failed to build weather client", e))?;
    if !weather_client.is_configured() {
        log::warn!("Weather API key is not configured; live weather lookups are disabled");
    }
    let weather_provider: Arc<dyn WeatherProvider> = Arc::new(weather_client);

    let state = AppState::new(
        pool,
        jwt_service.clone(),
        weather_provider,
        &config.weather.default_location,
    );

    if let (Some(email), Some(password)) = (&config.admin.email, &config.admin.password) {
        if let Err(e) = state.auth_service.ensure_admin(email, password).await {
            log::error!("Failed to bootstrap admin account {}: {}", email, e);
        }
    }

    let rate_limiter = RateLimiter::new(config.rate_limit.clone());

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    // The last wrap runs first: logging, CORS and headers, then rate
    // limiting, then authentication.
    HttpServer::new(move || {
        App::new()
            .wrap(AuthMiddleware::new(jwt_service.clone()))
            .wrap(RateLimitMiddleware::new(rate_limiter.clone()))
            .wrap(security_headers())
            .wrap(create_cors())
            .wrap(Logger::default())
            .configure(swagger_config)
            .configure(|cfg| state.configure(cfg))
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
