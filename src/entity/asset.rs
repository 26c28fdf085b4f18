//! SoftwareAsset entity - the license seat registry

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
  Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum LicenseType {
  #[sea_orm(string_value = "perpetual")]
  Perpetual,
  #[sea_orm(string_value = "subscription")]
  Subscription,
  #[sea_orm(string_value = "concurrent")]
  Concurrent,
  #[sea_orm(string_value = "device")]
  Device,
  #[sea_orm(string_value = "user")]
  User,
}

impl Default for LicenseType {
  fn default() -> Self {
    Self::Subscription
  }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "software_assets")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub name: String,
  pub category: Option<String>,
  pub version: Option<String>,
  pub license_type: LicenseType,
  /// Seat cap; active allocations must never exceed it.
  pub total_licenses: i32,
  pub description: Option<String>,
  /// Comma-separated tags
  pub tags: Option<String>,
  pub is_deleted: bool,
  pub created_by: Option<i32>,
  pub created_at: NaiveDateTime,
  pub updated_at: NaiveDateTime,
}

impl Model {
  pub fn tag_list(&self) -> Vec<String> {
    self
      .tags
      .as_deref()
      .unwrap_or_default()
      .split(',')
      .map(str::trim)
      .filter(|t| !t.is_empty())
      .map(str::to_string)
      .collect()
  }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(has_many = "super::contract::Entity")]
  Contracts,
  #[sea_orm(has_many = "super::allocation::Entity")]
  Allocations,
}

impl Related<super::contract::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Contracts.def()
  }
}

impl Related<super::allocation::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Allocations.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
