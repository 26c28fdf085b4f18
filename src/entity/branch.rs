use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "branches")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub name: String,
  #[sea_orm(unique)]
  pub code: String,
  pub address: Option<String>,
  pub is_active: bool,
  pub created_at: NaiveDateTime,
  pub updated_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(has_many = "super::department::Entity")]
  Departments,
}

impl Related<super::department::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Departments.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
