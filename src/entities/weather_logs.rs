use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;

/// One cached provider reading. At most one row per course and calendar day.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "weather_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub course_id: i32,
    pub date: NaiveDate,
    pub temperature: Option<f64>,
    pub humidity: Option<i32>,
    pub wind_speed: Option<f64>,
    pub wind_direction: String,
    pub weather_condition: String,
    pub precipitation: Option<f64>,
    pub visibility: Option<f64>,
    /// Raw provider payload.
    pub api_response: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id",
        on_delete = "Cascade"
    )]
    Course,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
