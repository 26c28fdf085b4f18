//! User entity with role-based capabilities

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Closed set of roles. Capabilities derive from the variant, never from
/// string comparison at call sites.
#[derive(
  Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum Role {
  #[sea_orm(string_value = "super_admin")]
  SuperAdmin,
  #[sea_orm(string_value = "it_manager")]
  ItManager,
  #[sea_orm(string_value = "it_staff")]
  ItStaff,
  #[sea_orm(string_value = "finance_manager")]
  FinanceManager,
  #[sea_orm(string_value = "accounts_officer")]
  AccountsOfficer,
  #[sea_orm(string_value = "department_head")]
  DepartmentHead,
  #[sea_orm(string_value = "auditor")]
  Auditor,
}

/// Static capability record for a role.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Capabilities {
  pub can_edit_assets: bool,
  pub can_edit_finance: bool,
  pub can_approve: bool,
  pub can_view_all: bool,
  pub is_auditor: bool,
}

impl Role {
  pub const MANAGERS: [Role; 3] =
    [Role::ItManager, Role::FinanceManager, Role::SuperAdmin];

  pub fn caps(self) -> Capabilities {
    use Role::*;
    Capabilities {
      can_edit_assets: matches!(self, SuperAdmin | ItManager | ItStaff),
      can_edit_finance: matches!(
        self,
        SuperAdmin | FinanceManager | AccountsOfficer
      ),
      can_approve: matches!(
        self,
        SuperAdmin | ItManager | FinanceManager | DepartmentHead
      ),
      can_view_all: matches!(
        self,
        SuperAdmin | ItManager | FinanceManager | Auditor
      ),
      is_auditor: matches!(self, Auditor),
    }
  }
}

impl Default for Role {
  fn default() -> Self {
    Self::ItStaff
  }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  #[sea_orm(unique)]
  pub email: String,
  pub first_name: String,
  pub last_name: String,
  pub role: Role,
  pub department_id: Option<i32>,
  pub branch_id: Option<i32>,
  pub phone: Option<String>,
  pub is_active: bool,
  pub created_at: NaiveDateTime,
  pub updated_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "super::department::Entity",
    from = "Column::DepartmentId",
    to = "super::department::Column::Id"
  )]
  Department,
  #[sea_orm(
    belongs_to = "super::branch::Entity",
    from = "Column::BranchId",
    to = "super::branch::Column::Id"
  )]
  Branch,
  #[sea_orm(has_many = "super::notification::Entity")]
  Notifications,
}

impl Related<super::department::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Department.def()
  }
}

impl Related<super::notification::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Notifications.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
