//! Database migrations using SeaORM

use sea_orm_migration::prelude::*;

mod m20260815_000001_create_org;
mod m20260815_000002_create_vendors;
mod m20260815_000003_create_assets;
mod m20260815_000004_create_contracts;
mod m20260815_000005_create_allocations;
mod m20260815_000006_create_finance;
mod m20260815_000007_create_audit_logs;
mod m20260815_000008_create_notifications;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
  fn migrations() -> Vec<Box<dyn MigrationTrait>> {
    vec![
      Box::new(m20260815_000001_create_org::Migration),
      Box::new(m20260815_000002_create_vendors::Migration),
      Box::new(m20260815_000003_create_assets::Migration),
      Box::new(m20260815_000004_create_contracts::Migration),
      Box::new(m20260815_000005_create_allocations::Migration),
      Box::new(m20260815_000006_create_finance::Migration),
      Box::new(m20260815_000007_create_audit_logs::Migration),
      Box::new(m20260815_000008_create_notifications::Migration),
    ]
  }
}
