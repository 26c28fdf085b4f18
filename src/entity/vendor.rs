use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vendors")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub company_name: String,
  pub contact_person: Option<String>,
  pub email: Option<String>,
  pub phone: Option<String>,
  /// 1.00 to 5.00
  pub rating: Option<Decimal>,
  pub address: Option<String>,
  pub is_active: bool,
  pub created_at: NaiveDateTime,
  pub updated_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(has_many = "super::contract::Entity")]
  Contracts,
  #[sea_orm(has_many = "super::invoice::Entity")]
  Invoices,
}

impl Related<super::contract::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Contracts.def()
  }
}

impl Related<super::invoice::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Invoices.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
