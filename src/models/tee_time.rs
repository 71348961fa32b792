use crate::entities::{BookingStatus, PaymentStatus, course_entity, tee_time_entity, user_entity};
use crate::models::{CourseSummary, UserSummary};
use crate::utils::cents_to_dollars;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailableSlotsQuery {
    pub course_id: i32,
    /// YYYY-MM-DD
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AvailableSlot {
    /// Position among the open slots of the day, starting at 1.
    pub id: i32,
    pub course_id: i32,
    pub date: String,
    #[schema(example = "06:15")]
    pub time: String,
    pub available_spots: i32,
    /// Green fee per player, in dollars.
    pub price: f64,
    pub course_name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateTeeTimeRequest {
    pub course_id: i32,
    #[schema(example = "2025-07-04")]
    pub booking_date: String,
    #[schema(example = "08:30")]
    pub tee_time: String,
    #[schema(example = 2)]
    pub players_count: i32,
    #[serde(default)]
    pub cart_required: bool,
    pub special_requests: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeeTimeResponse {
    pub id: i32,
    pub course_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<CourseSummary>,
    pub user_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
    pub booking_date: NaiveDate,
    pub tee_time: String,
    pub players_count: i32,
    pub cart_required: bool,
    pub total_amount: f64,
    pub payment_status: PaymentStatus,
    pub booking_status: BookingStatus,
    pub special_requests: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TeeTimeResponse {
    pub fn with_course(mut self, course: Option<course_entity::Model>) -> Self {
        self.course_name = course.as_ref().map(|c| c.name.clone());
        self.course = course.map(Into::into);
        self
    }

    pub fn with_user(mut self, user: Option<user_entity::Model>) -> Self {
        self.user = user.map(Into::into);
        self
    }
}

impl From<tee_time_entity::Model> for TeeTimeResponse {
    fn from(m: tee_time_entity::Model) -> Self {
        Self {
            id: m.id,
            course_id: m.course_id,
            course_name: None,
            course: None,
            user_id: m.user_id,
            user: None,
            booking_date: m.booking_date,
            tee_time: m.tee_time,
            players_count: m.players_count,
            cart_required: m.cart_required,
            total_amount: cents_to_dollars(m.total_amount_cents),
            payment_status: m.payment_status,
            booking_status: m.booking_status,
            special_requests: m.special_requests,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingStatusRequest {
    pub booking_status: BookingStatus,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingListQuery {
    pub status: Option<BookingStatus>,
    /// YYYY-MM-DD
    pub date: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}
