use crate::entities::{course_entity as courses, weather_log_entity as weather_logs};
use crate::error::{AppError, AppResult};
use crate::external::{WeatherProvider, WeatherReading};
use crate::models::WeatherResponse;
use crate::utils::today;
use chrono::{Duration, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use std::sync::Arc;

const COMPASS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

const DEFAULT_HISTORY_DAYS: i64 = 7;
const MAX_HISTORY_DAYS: i64 = 30;

/// Sixteen-point compass name for a bearing in degrees. Each point owns the
/// 22.5 degree sector centred on it.
pub fn wind_direction(degrees: f64) -> &'static str {
    let index = ((degrees.rem_euclid(360.0) + 11.25) / 22.5).floor() as usize;
    COMPASS[index % COMPASS.len()]
}

/// One provider reading per course per day, refetched only on request.
#[derive(Clone)]
pub struct WeatherService {
    pool: DatabaseConnection,
    provider: Arc<dyn WeatherProvider>,
    default_location: String,
}

impl WeatherService {
    pub fn new(
        pool: DatabaseConnection,
        provider: Arc<dyn WeatherProvider>,
        default_location: impl Into<String>,
    ) -> Self {
        Self {
            pool,
            provider,
            default_location: default_location.into(),
        }
    }

    pub async fn course_weather(&self, course_id: i32, force_refresh: bool) -> AppResult<WeatherResponse> {
        let course = self.find_course(course_id).await?;
        let date = today();

        if !force_refresh && let Some(cached) = self.reading_for(course_id, date).await? {
            log::debug!("Weather cache hit for course {} on {}", course_id, date);
            return Ok(WeatherResponse::from(cached).with_course(&course));
        }

        if !self.provider.is_configured() {
            return Err(AppError::ConfigError(
                "Weather API key is not configured".to_string(),
            ));
        }

        let location = if course.address.trim().is_empty() {
            self.default_location.clone()
        } else {
            course.address.clone()
        };
        let reading = self.provider.current(&location).await.inspect_err(|e| {
            log::error!("Weather fetch for course {} failed: {}", course_id, e);
        })?;

        Ok(self.store(course_id, date, reading).await?.with_course(&course))
    }

    /// Replaces the day's row. A concurrent writer that got there first wins
    /// and its row is returned instead.
    async fn store(
        &self,
        course_id: i32,
        date: NaiveDate,
        reading: WeatherReading,
    ) -> AppResult<WeatherResponse> {
        let txn = self.pool.begin().await?;

        weather_logs::Entity::delete_many()
            .filter(weather_logs::Column::CourseId.eq(course_id))
            .filter(weather_logs::Column::Date.eq(date))
            .exec(&txn)
            .await?;

        let inserted = weather_logs::ActiveModel {
            course_id: Set(course_id),
            date: Set(date),
            temperature: Set(reading.temperature_c),
            humidity: Set(reading.humidity),
            wind_speed: Set(reading.wind_kph),
            wind_direction: Set(reading
                .wind_degree
                .map(wind_direction)
                .unwrap_or_default()
                .to_string()),
            weather_condition: Set(reading.condition),
            precipitation: Set(reading.precip_mm),
            visibility: Set(reading.visibility_km),
            api_response: Set(reading.raw),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await;

        match inserted {
            Ok(row) => {
                txn.commit().await?;
                log::info!("Weather refreshed for course {} on {}", course_id, date);
                Ok(row.into())
            }
            Err(e) if AppError::is_unique_violation(&e) => {
                txn.rollback().await?;
                log::info!(
                    "Weather for course {} on {} stored concurrently, reusing it",
                    course_id,
                    date
                );
                self.reading_for(course_id, date)
                    .await?
                    .map(Into::into)
                    .ok_or_else(|| AppError::InternalError("Weather reading disappeared".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Readings from the last `days` days (default 7, clamped to 1..=30),
    /// newest first.
    pub async fn history(&self, course_id: i32, days: Option<i64>) -> AppResult<Vec<WeatherResponse>> {
        let course = self.find_course(course_id).await?;
        let days = days
            .unwrap_or(DEFAULT_HISTORY_DAYS)
            .clamp(1, MAX_HISTORY_DAYS);
        let until = today();
        let since = until - Duration::days(days);

        let rows = weather_logs::Entity::find()
            .filter(weather_logs::Column::CourseId.eq(course_id))
            .filter(weather_logs::Column::Date.between(since, until))
            .order_by_desc(weather_logs::Column::Date)
            .all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| WeatherResponse::from(row).with_course(&course))
            .collect())
    }

    async fn find_course(&self, course_id: i32) -> AppResult<courses::Model> {
        courses::Entity::find_by_id(course_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))
    }

    async fn reading_for(
        &self,
        course_id: i32,
        date: NaiveDate,
    ) -> AppResult<Option<weather_logs::Model>> {
        Ok(weather_logs::Entity::find()
            .filter(weather_logs::Column::CourseId.eq(course_id))
            .filter(weather_logs::Column::Date.eq(date))
            .one(&self.pool)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;
    use crate::services::CourseService;
    use crate::services::course_service::tests::course_request;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct FakeProvider {
        configured: bool,
        failing: AtomicBool,
        calls: AtomicUsize,
    }

    impl FakeProvider {
        fn new(configured: bool) -> Arc<Self> {
            Arc::new(Self {
                configured,
                failing: AtomicBool::new(false),
                calls: AtomicUsize::new(0),
            })
        }

        fn fail(&self) {
            self.failing.store(true, Ordering::SeqCst);
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl WeatherProvider for FakeProvider {
        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn current(&self, _location: &str) -> AppResult<WeatherReading> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.failing.load(Ordering::SeqCst) {
                return Err(AppError::ExternalApiError(
                    "Weather API returned 502 Bad Gateway".to_string(),
                ));
            }
            Ok(WeatherReading {
                temperature_c: Some(20.0 + n as f64),
                humidity: Some(55),
                wind_kph: Some(12.5),
                wind_degree: Some(100.0),
                condition: "Sunny".to_string(),
                precip_mm: Some(0.0),
                visibility_km: Some(10.0),
                raw: "{}".to_string(),
            })
        }
    }

    async fn setup(configured: bool) -> (WeatherService, Arc<FakeProvider>, i32) {
        let pool = test_pool().await;
        let course = CourseService::new(pool.clone())
            .create_course(course_request("Pinewoods", 50.0, 0.0))
            .await
            .unwrap();
        let provider = FakeProvider::new(configured);
        let svc = WeatherService::new(pool, provider.clone(), "Pebble Beach, CA");
        (svc, provider, course.id)
    }

    async fn insert_reading(svc: &WeatherService, course_id: i32, days_ago: i64) -> i32 {
        weather_logs::ActiveModel {
            course_id: Set(course_id),
            date: Set(today() - Duration::days(days_ago)),
            temperature: Set(Some(18.0)),
            humidity: Set(Some(60)),
            wind_speed: Set(Some(8.0)),
            wind_direction: Set("SW".to_string()),
            weather_condition: Set("Cloudy".to_string()),
            precipitation: Set(None),
            visibility: Set(None),
            api_response: Set("{}".to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&svc.pool)
        .await
        .unwrap()
        .id
    }

    #[test]
    fn test_wind_direction() {
        assert_eq!(wind_direction(0.0), "N");
        assert_eq!(wind_direction(5.0), "N");
        assert_eq!(wind_direction(10.0), "N");
        assert_eq!(wind_direction(11.25), "NNE");
        assert_eq!(wind_direction(30.0), "NNE");
        assert_eq!(wind_direction(90.0), "E");
        assert_eq!(wind_direction(100.0), "E");
        assert_eq!(wind_direction(112.5), "ESE");
        assert_eq!(wind_direction(270.0), "W");
        assert_eq!(wind_direction(348.75), "N");
        assert_eq!(wind_direction(350.0), "N");
        assert_eq!(wind_direction(360.0), "N");
        assert_eq!(wind_direction(-90.0), "W");
    }

    #[tokio::test]
    async fn test_same_day_reading_is_reused() {
        let (svc, provider, course_id) = setup(true).await;

        let first = svc.course_weather(course_id, false).await.unwrap();
        assert_eq!(first.wind_direction, "E");
        assert_eq!(first.temperature, Some(21.0));
        assert_eq!(provider.calls(), 1);

        let second = svc.course_weather(course_id, false).await.unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(provider.calls(), 1);

        let course = second.course.expect("course summary");
        assert_eq!(course.id, course_id);
        assert_eq!(course.name, "Pinewoods");
    }

    #[tokio::test]
    async fn test_force_refresh_replaces_reading() {
        let (svc, provider, course_id) = setup(true).await;
        svc.course_weather(course_id, false).await.unwrap();

        let refreshed = svc.course_weather(course_id, true).await.unwrap();
        assert_eq!(provider.calls(), 2);
        assert_eq!(refreshed.temperature, Some(22.0));

        let history = svc.history(course_id, None).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, refreshed.id);
    }

    #[tokio::test]
    async fn test_unconfigured_provider_and_missing_course() {
        let (svc, provider, course_id) = setup(false).await;
        let err = svc.course_weather(course_id, false).await.unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
        assert_eq!(provider.calls(), 0);

        let err = svc.course_weather(course_id + 1, false).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_service_unavailable() {
        let (svc, provider, course_id) = setup(true).await;
        provider.fail();

        let err = svc.course_weather(course_id, false).await.unwrap_err();
        assert!(matches!(err, AppError::ExternalApiError(_)));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(svc.history(course_id, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_cached_reading() {
        let (svc, provider, course_id) = setup(true).await;
        let cached = svc.course_weather(course_id, false).await.unwrap();

        provider.fail();
        let err = svc.course_weather(course_id, true).await.unwrap_err();
        assert!(matches!(err, AppError::ExternalApiError(_)));
        assert_eq!(provider.calls(), 2);

        let again = svc.course_weather(course_id, false).await.unwrap();
        assert_eq!(again.id, cached.id);
        assert_eq!(again.temperature, cached.temperature);
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_history_window_is_clamped() {
        let (svc, _, course_id) = setup(true).await;
        let today_id = insert_reading(&svc, course_id, 0).await;
        let yesterday_id = insert_reading(&svc, course_id, 1).await;
        insert_reading(&svc, course_id, 10).await;
        insert_reading(&svc, course_id, 29).await;
        insert_reading(&svc, course_id, 40).await;

        let ids = |rows: Vec<WeatherResponse>| rows.into_iter().map(|r| r.id).collect::<Vec<_>>();

        assert_eq!(
            ids(svc.history(course_id, Some(0)).await.unwrap()),
            vec![today_id, yesterday_id]
        );
        assert_eq!(
            ids(svc.history(course_id, Some(-5)).await.unwrap()),
            vec![today_id, yesterday_id]
        );
        assert_eq!(svc.history(course_id, None).await.unwrap().len(), 2);
        assert_eq!(svc.history(course_id, Some(14)).await.unwrap().len(), 3);
        assert_eq!(svc.history(course_id, Some(99)).await.unwrap().len(), 4);

        let newest = svc.history(course_id, Some(30)).await.unwrap();
        assert_eq!(newest.len(), 4);
        assert_eq!(newest[0].id, today_id);
        assert!(newest.iter().all(|r| r.course.is_some()));
    }
}
