use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DashboardStats {
    pub upcoming_tee_times: u64,
    pub range_sessions: u64,
    pub equipment_rentals: u64,
    pub total_spent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ActivityItem {
    pub id: i32,
    /// `tee_time`, `range_session` or `equipment_rental`.
    #[serde(rename = "type")]
    pub activity_type: String,
    pub title: String,
    pub description: String,
    pub amount: f64,
    /// Creation date, YYYY-MM-DD.
    pub date: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AdminStats {
    pub total_users: u64,
    pub total_courses: u64,
    pub total_equipment: u64,
    pub total_bookings: u64,
    pub total_rentals: u64,
    pub total_revenue: f64,
    pub monthly_revenue: f64,
    pub active_rentals: u64,
    pub upcoming_bookings: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct StaffStats {
    pub todays_bookings: u64,
    pub active_rentals: u64,
    pub equipment_issues: u64,
    pub course_closures: u64,
}
