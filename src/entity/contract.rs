//! LicenseContract entity and its status machine

use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Contract status. Batch jobs drive active -> pending_renewal -> expired;
/// renew returns any state to active; cancelled is set only by direct edit.
#[derive(
  Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
  #[sea_orm(string_value = "active")]
  Active,
  #[sea_orm(string_value = "expired")]
  Expired,
  #[sea_orm(string_value = "pending_renewal")]
  PendingRenewal,
  #[sea_orm(string_value = "cancelled")]
  Cancelled,
}

impl Default for ContractStatus {
  fn default() -> Self {
    Self::Active
  }
}

#[derive(
  Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum SupportLevel {
  #[sea_orm(string_value = "standard")]
  Standard,
  #[sea_orm(string_value = "premium")]
  Premium,
  #[sea_orm(string_value = "enterprise")]
  Enterprise,
  #[sea_orm(string_value = "none")]
  None,
}

impl Default for SupportLevel {
  fn default() -> Self {
    Self::Standard
  }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "license_contracts")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub software_asset_id: i32,
  pub vendor_id: Option<i32>,
  pub purchase_date: NaiveDate,
  pub duration_months: i32,
  pub expiry_date: Option<NaiveDate>,
  pub renewal_due_date: Option<NaiveDate>,
  pub status: ContractStatus,
  pub support_level: SupportLevel,
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
    belongs_to = "super::vendor::Entity",
    from = "Column::VendorId",
    to = "super::vendor::Column::Id"
  )]
  Vendor,
  #[sea_orm(has_many = "super::renewal_history::Entity")]
  RenewalHistory,
}

impl Related<super::asset::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Asset.def()
  }
}

impl Related<super::vendor::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Vendor.def()
  }
}

impl Related<super::renewal_history::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::RenewalHistory.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
