use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Vendors::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Vendors::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Vendors::CompanyName).string().not_null())
          .col(ColumnDef::new(Vendors::ContactPerson).string().null())
          .col(ColumnDef::new(Vendors::Email).string().null())
          .col(ColumnDef::new(Vendors::Phone).string().null())
          .col(ColumnDef::new(Vendors::Rating).decimal_len(3, 2).null())
          .col(ColumnDef::new(Vendors::Address).string().null())
          .col(ColumnDef::new(Vendors::IsActive).boolean().not_null().default(true))
          .col(ColumnDef::new(Vendors::CreatedAt).date_time().not_null())
          .col(ColumnDef::new(Vendors::UpdatedAt).date_time().not_null())
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Vendors::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Vendors {
  Table,
  Id,
  CompanyName,
  ContactPerson,
  Email,
  Phone,
  Rating,
  Address,
  IsActive,
  CreatedAt,
  UpdatedAt,
}
