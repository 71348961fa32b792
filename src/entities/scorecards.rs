use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "scorecards")]
pub struct Model {
    #[sea_orm(primary_key)]
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
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::scorecard_holes::Entity")]
    ScorecardHoles,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::scorecard_holes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScorecardHoles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
