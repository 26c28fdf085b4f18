use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
  Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
  #[sea_orm(string_value = "bank_transfer")]
  BankTransfer,
  #[sea_orm(string_value = "cheque")]
  Cheque,
  #[sea_orm(string_value = "card")]
  Card,
  #[sea_orm(string_value = "upi")]
  Upi,
  #[sea_orm(string_value = "other")]
  Other,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub invoice_id: i32,
  pub payment_mode: PaymentMode,
  pub transaction_reference: Option<String>,
  pub bank_name: Option<String>,
  pub amount: Decimal,
  pub paid_on: NaiveDate,
  pub notes: Option<String>,
  pub created_by: Option<i32>,
  pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "super::invoice::Entity",
    from = "Column::InvoiceId",
    to = "super::invoice::Column::Id",
    on_delete = "Cascade"
  )]
  Invoice,
}

impl Related<super::invoice::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Invoice.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
