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
          .table(Notifications::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Notifications::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Notifications::UserId).integer().not_null())
          .col(ColumnDef::new(Notifications::Title).string().not_null())
          .col(ColumnDef::new(Notifications::Message).string().not_null())
          .col(ColumnDef::new(Notifications::Link).string().null())
          .col(
            ColumnDef::new(Notifications::IsRead).boolean().not_null().default(false),
          )
          .col(ColumnDef::new(Notifications::NotificationType).string().null())
          .col(ColumnDef::new(Notifications::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_notifications_user")
              .from(Notifications::Table, Notifications::UserId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_notifications_user")
          .table(Notifications::Table)
          .col(Notifications::UserId)
          .to_owned(),
      )
      .await?;

    manager
      .create_table(
        Table::create()
          .table(ReminderSchedules::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(ReminderSchedules::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(ReminderSchedules::Name).string().not_null())
          .col(
            ColumnDef::new(ReminderSchedules::DaysBeforeDue)
              .integer()
              .not_null()
              .default(30),
          )
          .col(
            ColumnDef::new(ReminderSchedules::IsActive)
              .boolean()
              .not_null()
              .default(true),
          )
          .col(ColumnDef::new(ReminderSchedules::CreatedAt).date_time().not_null())
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(ReminderSchedules::Table).to_owned())
      .await?;
    manager.drop_table(Table::drop().table(Notifications::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Notifications {
  Table,
  Id,
  UserId,
  Title,
  Message,
  Link,
  IsRead,
  NotificationType,
  CreatedAt,
}

#[derive(DeriveIden)]
pub enum ReminderSchedules {
  Table,
  Id,
  Name,
  DaysBeforeDue,
  IsActive,
  CreatedAt,
}
