use sea_orm_migration::prelude::*;

use super::m20260815_000001_create_org::Users;
use super::m20260815_000002_create_vendors::Vendors;
use super::m20260815_000003_create_assets::SoftwareAssets;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(LicenseContracts::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(LicenseContracts::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(
            ColumnDef::new(LicenseContracts::SoftwareAssetId).integer().not_null(),
          )
          .col(ColumnDef::new(LicenseContracts::VendorId).integer().null())
          .col(ColumnDef::new(LicenseContracts::PurchaseDate).date().not_null())
          .col(
            ColumnDef::new(LicenseContracts::DurationMonths)
              .integer()
              .not_null()
              .default(12),
          )
          .col(ColumnDef::new(LicenseContracts::ExpiryDate).date().null())
          .col(ColumnDef::new(LicenseContracts::RenewalDueDate).date().null())
          .col(
            ColumnDef::new(LicenseContracts::Status)
              .string()
              .not_null()
              .default("active"),
          )
          .col(
            ColumnDef::new(LicenseContracts::SupportLevel)
              .string()
              .not_null()
              .default("standard"),
          )
          .col(ColumnDef::new(LicenseContracts::Notes).string().null())
          .col(ColumnDef::new(LicenseContracts::CreatedAt).date_time().not_null())
          .col(ColumnDef::new(LicenseContracts::UpdatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_license_contracts_asset")
              .from(LicenseContracts::Table, LicenseContracts::SoftwareAssetId)
              .to(SoftwareAssets::Table, SoftwareAssets::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_license_contracts_vendor")
              .from(LicenseContracts::Table, LicenseContracts::VendorId)
              .to(Vendors::Table, Vendors::Id)
              .on_delete(ForeignKeyAction::SetNull),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_license_contracts_status")
          .table(LicenseContracts::Table)
          .col(LicenseContracts::Status)
          .to_owned(),
      )
      .await?;

    manager
      .create_table(
        Table::create()
          .table(RenewalHistory::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(RenewalHistory::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(RenewalHistory::ContractId).integer().not_null())
          .col(ColumnDef::new(RenewalHistory::PreviousExpiry).date().null())
          .col(ColumnDef::new(RenewalHistory::NewExpiry).date().not_null())
          .col(ColumnDef::new(RenewalHistory::InvoiceId).integer().null())
          .col(ColumnDef::new(RenewalHistory::RenewedBy).integer().null())
          .col(ColumnDef::new(RenewalHistory::Notes).string().null())
          .col(ColumnDef::new(RenewalHistory::Timestamp).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_renewal_history_contract")
              .from(RenewalHistory::Table, RenewalHistory::ContractId)
              .to(LicenseContracts::Table, LicenseContracts::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_renewal_history_renewed_by")
              .from(RenewalHistory::Table, RenewalHistory::RenewedBy)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::SetNull),
          )
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(RenewalHistory::Table).to_owned()).await?;
    manager
      .drop_table(Table::drop().table(LicenseContracts::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum LicenseContracts {
  Table,
  Id,
  SoftwareAssetId,
  VendorId,
  PurchaseDate,
  DurationMonths,
  ExpiryDate,
  RenewalDueDate,
  Status,
  SupportLevel,
  Notes,
  CreatedAt,
  UpdatedAt,
}

#[derive(DeriveIden)]
pub enum RenewalHistory {
  Table,
  Id,
  ContractId,
  PreviousExpiry,
  NewExpiry,
  InvoiceId,
  RenewedBy,
  Notes,
  Timestamp,
}
