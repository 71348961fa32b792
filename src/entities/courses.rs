use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
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
    pub green_fee_cents: i64,
    pub cart_fee_cents: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::holes::Entity")]
    Holes,
    #[sea_orm(has_many = "super::tee_times::Entity")]
    TeeTimes,
}

impl Related<super::holes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Holes.def()
    }
}

impl Related<super::tee_times::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeeTimes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
