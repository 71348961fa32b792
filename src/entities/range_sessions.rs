use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::tee_times::PaymentStatus;

#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    ToSchema,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(20))")]
#[serde(rename_all = "snake_case")]
pub enum BucketSize {
    #[sea_orm(string_value = "small")]
    Small,
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "large")]
    Large,
    #[sea_orm(string_value = "jumbo")]
    Jumbo,
}

impl BucketSize {
    pub const ALL: [BucketSize; 4] = [
        BucketSize::Small,
        BucketSize::Medium,
        BucketSize::Large,
        BucketSize::Jumbo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BucketSize::Small => "small",
            BucketSize::Medium => "medium",
            BucketSize::Large => "large",
            BucketSize::Jumbo => "jumbo",
        }
    }

    pub fn ball_count(&self) -> u32 {
        match self {
            BucketSize::Small => 50,
            BucketSize::Medium => 75,
            BucketSize::Large => 100,
            BucketSize::Jumbo => 150,
        }
    }
}

impl std::str::FromStr for BucketSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(BucketSize::Small),
            "medium" => Ok(BucketSize::Medium),
            "large" => Ok(BucketSize::Large),
            "jumbo" => Ok(BucketSize::Jumbo),
            other => Err(format!("Unknown bucket size: {other}")),
        }
    }
}

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(20))")]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[sea_orm(string_value = "booked")]
    Booked,
    #[sea_orm(string_value = "checked_in")]
    CheckedIn,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "range_sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub session_date: NaiveDate,
    pub start_time: String,
    pub duration_minutes: i32,
    pub ball_bucket_size: BucketSize,
    pub bucket_price_cents: i64,
    pub bay_number: Option<i32>,
    pub payment_status: PaymentStatus,
    pub session_status: SessionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
