//! RenewalHistory entity - append-only record of contract renewals

use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "renewal_history")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub contract_id: i32,
  pub previous_expiry: Option<NaiveDate>,
  pub new_expiry: NaiveDate,
  pub invoice_id: Option<i32>,
  pub renewed_by: Option<i32>,
  pub notes: Option<String>,
  pub timestamp: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "super::contract::Entity",
    from = "Column::ContractId",
    to = "super::contract::Column::Id",
    on_delete = "Cascade"
  )]
  Contract,
  #[sea_orm(
    belongs_to = "super::invoice::Entity",
    from = "Column::InvoiceId",
    to = "super::invoice::Column::Id"
  )]
  Invoice,
}

impl Related<super::contract::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Contract.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
