use crate::entities::{course_entity, hole_entity};
use crate::utils::cents_to_dollars;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HoleResponse {
    pub id: i32,
    pub hole_number: i32,
    pub par: i32,
    pub yardage: i32,
    pub handicap_index: i32,
    pub description: String,
}

impl From<hole_entity::Model> for HoleResponse {
    fn from(m: hole_entity::Model) -> Self {
        Self {
            id: m.id,
            hole_number: m.hole_number,
            par: m.par,
            yardage: m.yardage,
            handicap_index: m.handicap_index,
            description: m.description,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub par: i32,
    pub total_holes: i32,
    pub course_rating: Option<f64>,
    pub slope_rating: Option<i32>,
    #[schema(example = 85.0)]
    pub green_fee: f64,
    #[schema(example = 25.0)]
    pub cart_fee: f64,
    pub is_active: bool,
    pub holes: Vec<HoleResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CourseResponse {
    pub fn with_holes(course: course_entity::Model, mut holes: Vec<hole_entity::Model>) -> Self {
        holes.sort_by_key(|h| h.hole_number);
        let mut resp = Self::from(course);
        resp.holes = holes.into_iter().map(Into::into).collect();
        resp
    }
}

impl From<course_entity::Model> for CourseResponse {
    fn from(m: course_entity::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            address: m.address,
            phone: m.phone,
            email: m.email,
            par: m.par,
            total_holes: m.total_holes,
            course_rating: m.course_rating,
            slope_rating: m.slope_rating,
            green_fee: cents_to_dollars(m.green_fee_cents),
            cart_fee: cents_to_dollars(m.cart_fee_cents),
            is_active: m.is_active,
            holes: Vec::new(),
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Course fields embedded in bookings and weather readings.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CourseSummary {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub par: i32,
    pub total_holes: i32,
}

impl From<course_entity::Model> for CourseSummary {
    fn from(m: course_entity::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            address: m.address,
            par: m.par,
            total_holes: m.total_holes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HoleInput {
    pub hole_number: i32,
    pub par: i32,
    pub yardage: Option<i32>,
    pub handicap_index: Option<i32>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateCourseRequest {
    #[schema(example = "Pinewoods Golf Club")]
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub par: Option<i32>,
    pub total_holes: Option<i32>,
    pub course_rating: Option<f64>,
    pub slope_rating: Option<i32>,
    #[schema(example = 85.0)]
    pub green_fee: f64,
    pub cart_fee: Option<f64>,
    pub is_active: Option<bool>,
    #[serde(default)]
    pub holes: Vec<HoleInput>,
}

/// Absent fields are left unchanged. When `holes` is present it replaces the
/// course's hole list.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCourseRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub par: Option<i32>,
    pub total_holes: Option<i32>,
    pub course_rating: Option<f64>,
    pub slope_rating: Option<i32>,
    pub green_fee: Option<f64>,
    pub cart_fee: Option<f64>,
    pub is_active: Option<bool>,
    pub holes: Option<Vec<HoleInput>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CourseStatusRequest {
    pub is_active: bool,
}
