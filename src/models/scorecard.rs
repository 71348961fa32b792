use crate::entities::{scorecard_entity, scorecard_hole_entity};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScorecardHoleInput {
    /// Hole number on the scorecard's course.
    pub hole_number: i32,
    pub strokes: i32,
    #[serde(default)]
    pub putts: i32,
    #[serde(default)]
    pub fairway_hit: bool,
    #[serde(default)]
    pub green_in_regulation: bool,
    #[serde(default)]
    pub sand_saves: i32,
    #[serde(default)]
    pub penalties: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateScorecardRequest {
    pub course_id: i32,
    pub tee_time_id: Option<i32>,
    #[schema(example = "2025-07-04")]
    pub played_date: String,
    pub handicap_used: Option<f64>,
    pub weather_conditions: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub is_tournament_round: bool,
    #[serde(default)]
    pub holes: Vec<ScorecardHoleInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScorecardHoleResponse {
    pub id: i32,
    pub hole_id: i32,
    pub hole_number: Option<i32>,
    pub strokes: i32,
    pub putts: i32,
    pub fairway_hit: bool,
    pub green_in_regulation: bool,
    pub sand_saves: i32,
    pub penalties: i32,
}

impl From<scorecard_hole_entity::Model> for ScorecardHoleResponse {
    fn from(m: scorecard_hole_entity::Model) -> Self {
        Self {
            id: m.id,
            hole_id: m.hole_id,
            hole_number: None,
            strokes: m.strokes,
            putts: m.putts,
            fairway_hit: m.fairway_hit,
            green_in_regulation: m.green_in_regulation,
            sand_saves: m.sand_saves,
            penalties: m.penalties,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScorecardResponse {
    pub id: i32,
    pub user_id: i32,
    pub course_id: i32,
    pub tee_time_id: Option<i32>,
    pub played_date: NaiveDate,
    pub total_score: Option<i32>,
    pub total_putts: Option<i32>,
    pub fairways_hit: Option<i32>,
    pub greens_in_regulation: Option<i32>,
    pub handicap_used: Option<f64>,
    pub weather_conditions: String,
    pub notes: String,
    pub is_tournament_round: bool,
    pub holes: Vec<ScorecardHoleResponse>,
    pub created_at: DateTime<Utc>,
}

impl From<scorecard_entity::Model> for ScorecardResponse {
    fn from(m: scorecard_entity::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            course_id: m.course_id,
            tee_time_id: m.tee_time_id,
            played_date: m.played_date,
            total_score: m.total_score,
            total_putts: m.total_putts,
            fairways_hit: m.fairways_hit,
            greens_in_regulation: m.greens_in_regulation,
            handicap_used: m.handicap_used,
            weather_conditions: m.weather_conditions,
            notes: m.notes,
            is_tournament_round: m.is_tournament_round,
            holes: Vec::new(),
            created_at: m.created_at,
        }
    }
}
