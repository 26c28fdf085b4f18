use sea_orm_migration::prelude::*;

use super::m20260815_000001_create_org::Users;
use super::m20260815_000002_create_vendors::Vendors;
use super::m20260815_000004_create_contracts::LicenseContracts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Invoices::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Invoices::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Invoices::InvoiceNumber).string().not_null())
          .col(ColumnDef::new(Invoices::InvoiceDate).date().not_null())
          .col(ColumnDef::new(Invoices::VendorId).integer().null())
          .col(ColumnDef::new(Invoices::ContractId).integer().null())
          .col(
            ColumnDef::new(Invoices::Subtotal).decimal_len(14, 2).not_null().default(0),
          )
          .col(ColumnDef::new(Invoices::Tax).decimal_len(14, 2).not_null().default(0))
          .col(ColumnDef::new(Invoices::Currency).string().not_null().default("USD"))
          .col(
            ColumnDef::new(Invoices::Total).decimal_len(14, 2).not_null().default(0),
          )
          .col(ColumnDef::new(Invoices::Notes).string().null())
          .col(ColumnDef::new(Invoices::CreatedBy).integer().null())
          .col(ColumnDef::new(Invoices::CreatedAt).date_time().not_null())
          .col(ColumnDef::new(Invoices::UpdatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_invoices_vendor")
              .from(Invoices::Table, Invoices::VendorId)
              .to(Vendors::Table, Vendors::Id)
              .on_delete(ForeignKeyAction::SetNull),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_invoices_contract")
              .from(Invoices::Table, Invoices::ContractId)
              .to(LicenseContracts::Table, LicenseContracts::Id)
              .on_delete(ForeignKeyAction::SetNull),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_invoices_created_by")
              .from(Invoices::Table, Invoices::CreatedBy)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::SetNull),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_invoices_number")
          .table(Invoices::Table)
          .col(Invoices::InvoiceNumber)
          .to_owned(),
      )
      .await?;

    manager
      .create_table(
        Table::create()
          .table(Payments::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Payments::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Payments::InvoiceId).integer().not_null())
          .col(ColumnDef::new(Payments::PaymentMode).string().not_null())
          .col(ColumnDef::new(Payments::TransactionReference).string().null())
          .col(ColumnDef::new(Payments::BankName).string().null())
          .col(ColumnDef::new(Payments::Amount).decimal_len(14, 2).not_null())
          .col(ColumnDef::new(Payments::PaidOn).date().not_null())
          .col(ColumnDef::new(Payments::Notes).string().null())
          .col(ColumnDef::new(Payments::CreatedBy).integer().null())
          .col(ColumnDef::new(Payments::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_payments_invoice")
              .from(Payments::Table, Payments::InvoiceId)
              .to(Invoices::Table, Invoices::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Payments::Table).to_owned()).await?;
    manager.drop_table(Table::drop().table(Invoices::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Invoices {
  Table,
  Id,
  InvoiceNumber,
  InvoiceDate,
  VendorId,
  ContractId,
  Subtotal,
  Tax,
  Currency,
  Total,
  Notes,
  CreatedBy,
  CreatedAt,
  UpdatedAt,
}

#[derive(DeriveIden)]
pub enum Payments {
  Table,
  Id,
  InvoiceId,
  PaymentMode,
  TransactionReference,
  BankName,
  Amount,
  PaidOn,
  Notes,
  CreatedBy,
  CreatedAt,
}
