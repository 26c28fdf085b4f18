use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Branches::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Branches::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Branches::Name).string().not_null())
          .col(ColumnDef::new(Branches::Code).string().not_null().unique_key())
          .col(ColumnDef::new(Branches::Address).string().null())
          .col(ColumnDef::new(Branches::IsActive).boolean().not_null().default(true))
          .col(ColumnDef::new(Branches::CreatedAt).date_time().not_null())
          .col(ColumnDef::new(Branches::UpdatedAt).date_time().not_null())
          .to_owned(),
      )
      .await?;

    manager
      .create_table(
        Table::create()
          .table(Departments::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Departments::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Departments::Name).string().not_null())
          .col(ColumnDef::new(Departments::Code).string().not_null().unique_key())
          .col(ColumnDef::new(Departments::BranchId).integer().null())
          .col(
            ColumnDef::new(Departments::IsActive).boolean().not_null().default(true),
          )
          .col(ColumnDef::new(Departments::CreatedAt).date_time().not_null())
          .col(ColumnDef::new(Departments::UpdatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_departments_branch")
              .from(Departments::Table, Departments::BranchId)
              .to(Branches::Table, Branches::Id)
              .on_delete(ForeignKeyAction::SetNull),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_table(
        Table::create()
          .table(Users::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Users::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
          .col(ColumnDef::new(Users::FirstName).string().not_null())
          .col(ColumnDef::new(Users::LastName).string().not_null())
          .col(ColumnDef::new(Users::Role).string().not_null().default("it_staff"))
          .col(ColumnDef::new(Users::DepartmentId).integer().null())
          .col(ColumnDef::new(Users::BranchId).integer().null())
          .col(ColumnDef::new(Users::Phone).string().null())
          .col(ColumnDef::new(Users::IsActive).boolean().not_null().default(true))
          .col(ColumnDef::new(Users::CreatedAt).date_time().not_null())
          .col(ColumnDef::new(Users::UpdatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_users_department")
              .from(Users::Table, Users::DepartmentId)
              .to(Departments::Table, Departments::Id)
              .on_delete(ForeignKeyAction::SetNull),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_users_branch")
              .from(Users::Table, Users::BranchId)
              .to(Branches::Table, Branches::Id)
              .on_delete(ForeignKeyAction::SetNull),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_users_role")
          .table(Users::Table)
          .col(Users::Role)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Users::Table).to_owned()).await?;
    manager.drop_table(Table::drop().table(Departments::Table).to_owned()).await?;
    manager.drop_table(Table::drop().table(Branches::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Branches {
  Table,
  Id,
  Name,
  Code,
  Address,
  IsActive,
  CreatedAt,
  UpdatedAt,
}

#[derive(DeriveIden)]
pub enum Departments {
  Table,
  Id,
  Name,
  Code,
  BranchId,
  IsActive,
  CreatedAt,
  UpdatedAt,
}

#[derive(DeriveIden)]
pub enum Users {
  Table,
  Id,
  Email,
  FirstName,
  LastName,
  Role,
  DepartmentId,
  BranchId,
  Phone,
  IsActive,
  CreatedAt,
  UpdatedAt,
}
