//! Invoice entity - vendor-billed amounts

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

#[derive(
  Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Currency {
  #[sea_orm(string_value = "USD")]
  Usd,
  #[sea_orm(string_value = "EUR")]
  Eur,
  #[sea_orm(string_value = "GBP")]
  Gbp,
  #[sea_orm(string_value = "INR")]
  Inr,
  #[sea_orm(string_value = "OTHER")]
  Other,
}

impl Default for Currency {
  fn default() -> Self {
    Self::Usd
  }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub invoice_number: String,
  pub invoice_date: NaiveDate,
  pub vendor_id: Option<i32>,
  pub contract_id: Option<i32>,
  pub subtotal: Decimal,
  pub tax: Decimal,
  pub currency: Currency,
  /// Always subtotal + tax; recomputed on save.
  pub total: Decimal,
  pub notes: Option<String>,
  pub created_by: Option<i32>,
  pub created_at: NaiveDateTime,
  pub updated_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "super::vendor::Entity",
    from = "Column::VendorId",
    to = "super::vendor::Column::Id"
  )]
  Vendor,
  #[sea_orm(
    belongs_to = "super::contract::Entity",
    from = "Column::ContractId",
    to = "super::contract::Column::Id"
  )]
  Contract,
  #[sea_orm(has_many = "super::payment::Entity")]
  Payments,
}

impl Related<super::vendor::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Vendor.def()
  }
}

impl Related<super::payment::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Payments.def()
  }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
  /// The stored total is never independently settable.
  async fn before_save<C>(mut self, _db: &C, _insert: bool) -> Result<Self, DbErr>
  where
    C: ConnectionTrait,
  {
    if let (ActiveValue::Set(subtotal), ActiveValue::Set(tax)) =
      (&self.subtotal, &self.tax)
    {
      self.total = Set(*subtotal + *tax);
    }
    Ok(self)
  }
}
