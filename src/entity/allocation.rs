//! Allocation entity - one row per license seat handed out

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "allocations")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub software_asset_id: i32,
  pub department_id: i32,
  pub user_id: Option<i32>,
  pub allocated_on: NaiveDateTime,
  pub returned_on: Option<NaiveDateTime>,
  pub active_flag: bool,
  pub notes: Option<String>,
  pub created_at: NaiveDateTime,
  pub updated_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "super::asset::Entity",
    from = "Column::SoftwareAssetId",
    to = "super::asset::Column::Id",
    on_delete = "Cascade"
  )]
  Asset,
  #[sea_orm(
    belongs_to = "super::department::Entity",
    from = "Column::DepartmentId",
    to = "super::department::Column::Id",
    on_delete = "Cascade"
  )]
  Department,
  #[sea_orm(
    belongs_to = "super::user::Entity",
    from = "Column::UserId",
    to = "super::user::Column::Id"
  )]
  User,
}

impl Related<super::asset::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Asset.def()
  }
}

impl Related<super::department::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Department.def()
  }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
  /// A returned seat can never stay active, whatever the caller set.
  async fn before_save<C>(mut self, _db: &C, _insert: bool) -> Result<Self, DbErr>
  where
    C: ConnectionTrait,
  {
    if let ActiveValue::Set(Some(_)) = &self.returned_on {
      self.active_flag = Set(false);
    }
    Ok(self)
  }
}
