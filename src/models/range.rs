use crate::entities::{BucketSize, PaymentStatus, SessionStatus, range_session_entity};
use crate::utils::cents_to_dollars;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateRangeSessionRequest {
    #[schema(example = "2025-07-04")]
    pub session_date: String,
    #[schema(example = "17:00")]
    pub start_time: String,
    /// Defaults to 60.
    pub duration_minutes: Option<i32>,
    #[schema(example = "medium")]
    pub ball_bucket_size: String,
    pub bay_number: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RangeSessionResponse {
    pub id: i32,
    pub user_id: i32,
    pub session_date: NaiveDate,
    pub start_time: String,
    pub duration_minutes: i32,
    pub ball_bucket_size: BucketSize,
    pub bucket_price: f64,
    pub bay_number: Option<i32>,
    pub payment_status: PaymentStatus,
    pub session_status: SessionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<range_session_entity::Model> for RangeSessionResponse {
    fn from(m: range_session_entity::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            session_date: m.session_date,
            start_time: m.start_time,
            duration_minutes: m.duration_minutes,
            ball_bucket_size: m.ball_bucket_size,
            bucket_price: cents_to_dollars(m.bucket_price_cents),
            bay_number: m.bay_number,
            payment_status: m.payment_status,
            session_status: m.session_status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct BallCounts {
    pub small: u32,
    pub medium: u32,
    pub large: u32,
    pub jumbo: u32,
}

/// Current price per bucket in dollars, plus the balls in each bucket.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct BucketPricesResponse {
    pub small: f64,
    pub medium: f64,
    pub large: f64,
    pub jumbo: f64,
    pub balls: BallCounts,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionStatusRequest {
    pub session_status: SessionStatus,
}
