//! Service layer: one struct per aggregate, borrowing the shared connection.

pub mod allocation;
pub mod asset;
pub mod audit;
pub mod contract;
pub mod invoice;
pub mod notification;
pub mod report;
pub mod vendor;

pub use allocation::Allocation;
pub use asset::Asset;
pub use audit::Audit;
pub use contract::Contract;
pub use invoice::Invoice;
pub use notification::Notification;
pub use report::Report;
pub use vendor::Vendor;

#[cfg(test)]
pub(crate) mod tests {
  use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbBackend, Schema};

  use crate::entity::*;

  pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();

    let schema = Schema::new(DbBackend::Sqlite);

    macro_rules! create {
      ($($entity:path),* $(,)?) => {
        $(
          let stmt = schema.create_table_from_entity($entity);
          db.execute(db.get_database_backend().build(&stmt)).await.unwrap();
        )*
      };
    }

    create!(
      branch::Entity,
      department::Entity,
      user::Entity,
      vendor::Entity,
      asset::Entity,
      contract::Entity,
      invoice::Entity,
      renewal_history::Entity,
      allocation::Entity,
      payment::Entity,
      audit_log::Entity,
      notification::Entity,
      reminder_schedule::Entity,
    );

    db
  }
}
