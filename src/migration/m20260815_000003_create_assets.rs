use sea_orm_migration::prelude::*;

use super::m20260815_000001_create_org::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(SoftwareAssets::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(SoftwareAssets::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(SoftwareAssets::Name).string().not_null())
          .col(ColumnDef::new(SoftwareAssets::Category).string().null())
          .col(ColumnDef::new(SoftwareAssets::Version).string().null())
          .col(
            ColumnDef::new(SoftwareAssets::LicenseType)
              .string()
              .not_null()
              .default("subscription"),
          )
          .col(
            ColumnDef::new(SoftwareAssets::TotalLicenses)
              .integer()
              .not_null()
              .default(0),
          )
          .col(ColumnDef::new(SoftwareAssets::Description).string().null())
          .col(ColumnDef::new(SoftwareAssets::Tags).string().null())
          .col(
            ColumnDef::new(SoftwareAssets::IsDeleted)
              .boolean()
              .not_null()
              .default(false),
          )
          .col(ColumnDef::new(SoftwareAssets::CreatedBy).integer().null())
          .col(ColumnDef::new(SoftwareAssets::CreatedAt).date_time().not_null())
          .col(ColumnDef::new(SoftwareAssets::UpdatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_software_assets_created_by")
              .from(SoftwareAssets::Table, SoftwareAssets::CreatedBy)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::SetNull),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_software_assets_category")
          .table(SoftwareAssets::Table)
          .col(SoftwareAssets::Category)
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_software_assets_is_deleted")
          .table(SoftwareAssets::Table)
          .col(SoftwareAssets::IsDeleted)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(SoftwareAssets::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum SoftwareAssets {
  Table,
  Id,
  Name,
  Category,
  Version,
  LicenseType,
  TotalLicenses,
  Description,
  Tags,
  IsDeleted,
  CreatedBy,
  CreatedAt,
  UpdatedAt,
}
