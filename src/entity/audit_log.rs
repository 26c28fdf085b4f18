//! AuditLog entity - append-only change trail

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
  Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
  #[sea_orm(string_value = "create")]
  Create,
  #[sea_orm(string_value = "update")]
  Update,
  #[sea_orm(string_value = "delete")]
  Delete,
  #[sea_orm(string_value = "soft_delete")]
  SoftDelete,
  #[sea_orm(string_value = "login")]
  Login,
  #[sea_orm(string_value = "logout")]
  Logout,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub entity: String,
  pub object_id: Option<i32>,
  pub change_type: ChangeType,
  pub old_value: Option<Json>,
  pub new_value: Option<Json>,
  pub user_id: Option<i32>,
  pub ip_address: Option<String>,
  pub user_agent: Option<String>,
  pub timestamp: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "super::user::Entity",
    from = "Column::UserId",
    to = "super::user::Column::Id"
  )]
  User,
}

impl Related<super::user::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::User.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
