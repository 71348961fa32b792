use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "scorecard_holes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub scorecard_id: i32,
    pub hole_id: i32,
    pub strokes: i32,
    pub putts: i32,
    pub fairway_hit: bool,
    pub green_in_regulation: bool,
    pub sand_saves: i32,
    pub penalties: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::scorecards::Entity",
        from = "Column::ScorecardId",
        to = "super::scorecards::Column::Id",
        on_delete = "Cascade"
    )]
    Scorecard,
    #[sea_orm(
        belongs_to = "super::holes::Entity",
        from = "Column::HoleId",
        to = "super::holes::Column::Id",
        on_delete = "Cascade"
    )]
    Hole,
}

impl Related<super::scorecards::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Scorecard.def()
    }
}

impl Related<super::holes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hole.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
