use crate::entities::{UserRole, user_entity};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignupRequest {
    #[schema(example = "golfer@example.com")]
    pub email: String,
    #[schema(example = "birdie123")]
    pub password: String,
    #[schema(example = "Sam")]
    pub first_name: String,
    #[schema(example = "Snead")]
    pub last_name: String,
    pub phone: Option<String>,
    /// YYYY-MM-DD
    #[schema(example = "1990-05-27")]
    pub date_of_birth: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "golfer@example.com")]
    pub email: String,
    #[schema(example = "birdie123")]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub date_of_birth: Option<NaiveDate>,
    pub role: UserRole,
    pub membership_type: String,
    pub membership_expiry: Option<NaiveDate>,
    pub handicap: Option<f64>,
    pub is_active: bool,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<user_entity::Model> for UserResponse {
    fn from(m: user_entity::Model) -> Self {
        Self {
            id: m.id,
            email: m.email,
            first_name: m.first_name,
            last_name: m.last_name,
            phone: m.phone,
            date_of_birth: m.date_of_birth,
            role: m.role,
            membership_type: m.membership_type,
            membership_expiry: m.membership_expiry,
            handicap: m.handicap,
            is_active: m.is_active,
            email_verified: m.email_verified,
            created_at: m.created_at,
        }
    }
}

/// Short form embedded in booking and rental listings.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<user_entity::Model> for UserSummary {
    fn from(m: user_entity::Model) -> Self {
        Self {
            id: m.id,
            email: m.email,
            first_name: m.first_name,
            last_name: m.last_name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    /// Seconds until the token expires.
    pub expires_in: i64,
    pub user: UserResponse,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct AdminUpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<UserRole>,
    pub membership_type: Option<String>,
    pub membership_expiry: Option<NaiveDate>,
    pub handicap: Option<f64>,
    pub is_active: Option<bool>,
    pub email_verified: Option<bool>,
}
