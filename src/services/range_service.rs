use crate::entities::{
    BucketSize, PaymentStatus, SessionStatus, range_session_entity as sessions,
    system_setting_entity as settings,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{cents_to_dollars, format_clock, parse_clock, parse_date, parse_dollars, today};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};

const DEFAULT_DURATION_MINUTES: i32 = 60;
const MIN_DURATION_MINUTES: i32 = 15;
const MAX_DURATION_MINUTES: i32 = 240;

/// Price used when no `<size>_bucket_price` setting is stored.
pub fn default_bucket_price_cents(size: BucketSize) -> i64 {
    match size {
        BucketSize::Small => 800,
        BucketSize::Medium => 1200,
        BucketSize::Large => 1600,
        BucketSize::Jumbo => 2200,
    }
}

pub fn bucket_price_key(size: BucketSize) -> String {
    format!("{}_bucket_price", size.as_str())
}

#[derive(Clone)]
pub struct RangeService {
    pool: DatabaseConnection,
}

impl RangeService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn bucket_price(&self, size: BucketSize) -> AppResult<i64> {
        let key = bucket_price_key(size);
        let setting = settings::Entity::find()
            .filter(settings::Column::SettingKey.eq(key.as_str()))
            .filter(settings::Column::IsActive.eq(true))
            .one(&self.pool)
            .await?;

        let Some(setting) = setting else {
            return Ok(default_bucket_price_cents(size));
        };

        match parse_dollars(&setting.setting_value) {
            Some(cents) => Ok(cents),
            None => {
                log::warn!(
                    "Setting {} holds unparsable price '{}', using default",
                    key,
                    setting.setting_value
                );
                Ok(default_bucket_price_cents(size))
            }
        }
    }

    pub async fn bucket_prices(&self) -> AppResult<BucketPricesResponse> {
        Ok(BucketPricesResponse {
            small: cents_to_dollars(self.bucket_price(BucketSize::Small).await?),
            medium: cents_to_dollars(self.bucket_price(BucketSize::Medium).await?),
            large: cents_to_dollars(self.bucket_price(BucketSize::Large).await?),
            jumbo: cents_to_dollars(self.bucket_price(BucketSize::Jumbo).await?),
            balls: BallCounts {
                small: BucketSize::Small.ball_count(),
                medium: BucketSize::Medium.ball_count(),
                large: BucketSize::Large.ball_count(),
                jumbo: BucketSize::Jumbo.ball_count(),
            },
        })
    }

    pub async fn book_session(
        &self,
        user_id: i32,
        request: CreateRangeSessionRequest,
    ) -> AppResult<RangeSessionResponse> {
        let size: BucketSize = request
            .ball_bucket_size
            .parse()
            .map_err(AppError::ValidationError)?;

        let session_date = parse_date(&request.session_date)?;
        if session_date < today() {
            return Err(AppError::ValidationError(
                "Session date cannot be in the past".to_string(),
            ));
        }
        let start_time = format_clock(parse_clock(&request.start_time)?);

        let duration = request.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES);
        if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&duration) {
            return Err(AppError::ValidationError(format!(
                "Duration must be between {} and {} minutes",
                MIN_DURATION_MINUTES, MAX_DURATION_MINUTES
            )));
        }
        if let Some(bay) = request.bay_number
            && bay < 1
        {
            return Err(AppError::ValidationError(
                "Bay number must be positive".to_string(),
            ));
        }

        let price = self.bucket_price(size).await?;
        let now = Utc::now();
        let session = sessions::ActiveModel {
            user_id: Set(user_id),
            session_date: Set(session_date),
            start_time: Set(start_time),
            duration_minutes: Set(duration),
            ball_bucket_size: Set(size),
            bucket_price_cents: Set(price),
            bay_number: Set(request.bay_number),
            payment_status: Set(PaymentStatus::Pending),
            session_status: Set(SessionStatus::Booked),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!(
            "Range session {} booked by user {} for {} {}",
            session.id,
            user_id,
            session.session_date,
            session.start_time
        );
        Ok(session.into())
    }

    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<RangeSessionResponse>> {
        let rows = sessions::Entity::find()
            .filter(sessions::Column::UserId.eq(user_id))
            .order_by_desc(sessions::Column::SessionDate)
            .order_by_desc(sessions::Column::StartTime)
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn update_session_status(
        &self,
        session_id: i32,
        status: SessionStatus,
    ) -> AppResult<RangeSessionResponse> {
        let session = sessions::Entity::find_by_id(session_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Range session not found".to_string()))?;

        let mut active = session.into_active_model();
        active.session_status = Set(status);
        active.updated_at = Set(Utc::now());
        let session = active.update(&self.pool).await?;

        log::info!("Range session {} status set to {:?}", session_id, status);
        Ok(session.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;
    use crate::entities::UserRole;
    use crate::services::tee_time_service::tests::insert_user;
    use chrono::Duration;

    async fn insert_setting(pool: &DatabaseConnection, key: &str, value: &str) {
        let now = Utc::now();
        settings::ActiveModel {
            setting_key: Set(key.to_string()),
            setting_value: Set(value.to_string()),
            description: Set(String::new()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(pool)
        .await
        .unwrap();
    }

    fn request(size: &str, duration: Option<i32>) -> CreateRangeSessionRequest {
        CreateRangeSessionRequest {
            session_date: (today() + Duration::days(1)).format("%Y-%m-%d").to_string(),
            start_time: "17:30".to_string(),
            duration_minutes: duration,
            ball_bucket_size: size.to_string(),
            bay_number: Some(4),
        }
    }

    #[tokio::test]
    async fn test_bucket_prices_default_and_override() {
        let pool = test_pool().await;
        let svc = RangeService::new(pool.clone());

        let prices = svc.bucket_prices().await.unwrap();
        assert_eq!(prices.small, 8.0);
        assert_eq!(prices.jumbo, 22.0);
        assert_eq!(prices.balls.large, 100);

        insert_setting(&pool, "medium_bucket_price", "13.50").await;
        insert_setting(&pool, "large_bucket_price", "garbage").await;
        assert_eq!(svc.bucket_price(BucketSize::Medium).await.unwrap(), 1350);
        assert_eq!(svc.bucket_price(BucketSize::Large).await.unwrap(), 1600);
    }

    #[tokio::test]
    async fn test_book_session() {
        let pool = test_pool().await;
        let user_id = insert_user(&pool, "range@example.com", UserRole::Customer).await;
        let svc = RangeService::new(pool);

        let session = svc.book_session(user_id, request("Medium", None)).await.unwrap();
        assert_eq!(session.duration_minutes, 60);
        assert_eq!(session.ball_bucket_size, BucketSize::Medium);
        assert_eq!(session.bucket_price, 12.0);
        assert_eq!(session.session_status, SessionStatus::Booked);

        let listed = svc.list_for_user(user_id).await.unwrap();
        assert_eq!(listed.len(), 1);

        let updated = svc
            .update_session_status(session.id, SessionStatus::CheckedIn)
            .await
            .unwrap();
        assert_eq!(updated.session_status, SessionStatus::CheckedIn);
    }

    #[tokio::test]
    async fn test_book_session_validation() {
        let pool = test_pool().await;
        let user_id = insert_user(&pool, "range@example.com", UserRole::Customer).await;
        let svc = RangeService::new(pool);

        for req in [
            request("bottomless", None),
            request("small", Some(10)),
            request("small", Some(300)),
        ] {
            assert!(matches!(
                svc.book_session(user_id, req).await.unwrap_err(),
                AppError::ValidationError(_)
            ));
        }
    }
}
