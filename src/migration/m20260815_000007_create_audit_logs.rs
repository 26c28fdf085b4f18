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
          .table(AuditLogs::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(AuditLogs::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(AuditLogs::Entity).string().not_null())
          .col(ColumnDef::new(AuditLogs::ObjectId).integer().null())
          .col(ColumnDef::new(AuditLogs::ChangeType).string().not_null())
          .col(ColumnDef::new(AuditLogs::OldValue).json().null())
          .col(ColumnDef::new(AuditLogs::NewValue).json().null())
          .col(ColumnDef::new(AuditLogs::UserId).integer().null())
          .col(ColumnDef::new(AuditLogs::IpAddress).string().null())
          .col(ColumnDef::new(AuditLogs::UserAgent).string().null())
          .col(ColumnDef::new(AuditLogs::Timestamp).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_audit_logs_user")
              .from(AuditLogs::Table, AuditLogs::UserId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::SetNull),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_audit_logs_entity")
          .table(AuditLogs::Table)
          .col(AuditLogs::Entity)
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_audit_logs_timestamp")
          .table(AuditLogs::Table)
          .col(AuditLogs::Timestamp)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(AuditLogs::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum AuditLogs {
  Table,
  Id,
  Entity,
  ObjectId,
  ChangeType,
  OldValue,
  NewValue,
  UserId,
  IpAddress,
  UserAgent,
  Timestamp,
}
