use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "departments")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub name: String,
  #[sea_orm(unique)]
  pub code: String,
  pub branch_id: Option<i32>,
  pub is_active: bool,
  pub created_at: NaiveDateTime,
  pub updated_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "super::branch::Entity",
    from = "Column::BranchId",
    to = "super::branch::Column::Id"
  )]
  Branch,
  #[sea_orm(has_many = "super::allocation::Entity")]
  Allocations,
}

impl Related<super::branch::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Branch.def()
  }
}

impl Related<super::allocation::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Allocations.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
