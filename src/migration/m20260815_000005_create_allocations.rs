use sea_orm_migration::prelude::*;

use super::m20260815_000001_create_org::{Departments, Users};
use super::m20260815_000003_create_assets::SoftwareAssets;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Allocations::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Allocations::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Allocations::SoftwareAssetId).integer().not_null())
          .col(ColumnDef::new(Allocations::DepartmentId).integer().not_null())
          .col(ColumnDef::new(Allocations::UserId).integer().null())
          .col(ColumnDef::new(Allocations::AllocatedOn).date_time().not_null())
          .col(ColumnDef::new(Allocations::ReturnedOn).date_time().null())
          .col(
            ColumnDef::new(Allocations::ActiveFlag).boolean().not_null().default(true),
          )
          .col(ColumnDef::new(Allocations::Notes).string().null())
          .col(ColumnDef::new(Allocations::CreatedAt).date_time().not_null())
          .col(ColumnDef::new(Allocations::UpdatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_allocations_asset")
              .from(Allocations::Table, Allocations::SoftwareAssetId)
              .to(SoftwareAssets::Table, SoftwareAssets::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_allocations_department")
              .from(Allocations::Table, Allocations::DepartmentId)
              .to(Departments::Table, Departments::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_allocations_user")
              .from(Allocations::Table, Allocations::UserId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::SetNull),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_allocations_asset_active")
          .table(Allocations::Table)
          .col(Allocations::SoftwareAssetId)
          .col(Allocations::ActiveFlag)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Allocations::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Allocations {
  Table,
  Id,
  SoftwareAssetId,
  DepartmentId,
  UserId,
  AllocatedOn,
  ReturnedOn,
  ActiveFlag,
  Notes,
  CreatedAt,
  UpdatedAt,
}
