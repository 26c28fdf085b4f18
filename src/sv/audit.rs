//! Append-only audit trail. Rows are written after successful mutations and
//! never edited or pruned.

use serde::Deserialize;

use crate::entity::audit_log::{self, ChangeType};
use crate::prelude::*;

pub struct Change<'a> {
  pub entity: &'a str,
  pub object_id: Option<i32>,
  pub change_type: ChangeType,
  pub old_value: Option<json::Value>,
  pub new_value: Option<json::Value>,
  pub user_id: Option<i32>,
  pub ip_address: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AuditFilter {
  pub entity: Option<String>,
  pub change_type: Option<ChangeType>,
  pub user_id: Option<i32>,
}

pub struct Audit<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Audit<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn record(&self, change: Change<'_>) -> Result<audit_log::Model> {
    let log = audit_log::ActiveModel {
      entity: Set(change.entity.to_string()),
      object_id: Set(change.object_id),
      change_type: Set(change.change_type),
      old_value: Set(change.old_value),
      new_value: Set(change.new_value),
      user_id: Set(change.user_id),
      ip_address: Set(change.ip_address),
      user_agent: Set(None),
      timestamp: Set(Utc::now().naive_utc()),
      ..Default::default()
    };

    Ok(log.insert(self.db).await?)
  }

  pub async fn list(&self, filter: AuditFilter) -> Result<Vec<audit_log::Model>> {
    let mut query = audit_log::Entity::find();

    if let Some(entity) = filter.entity {
      query = query.filter(audit_log::Column::Entity.eq(entity));
    }
    if let Some(change_type) = filter.change_type {
      query = query.filter(audit_log::Column::ChangeType.eq(change_type));
    }
    if let Some(user_id) = filter.user_id {
      query = query.filter(audit_log::Column::UserId.eq(user_id));
    }

    Ok(
      query
        .order_by_desc(audit_log::Column::Timestamp)
        .order_by_desc(audit_log::Column::Id)
        .all(self.db)
        .await?,
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::tests::setup_test_db;

  #[tokio::test]
  async fn records_snapshots() {
    let db = setup_test_db().await;
    let sv = Audit::new(&db);

    sv.record(Change {
      entity: "SoftwareAsset",
      object_id: Some(1),
      change_type: ChangeType::Update,
      old_value: Some(json::json!({"total_licenses": 5})),
      new_value: Some(json::json!({"total_licenses": 8})),
      user_id: None,
      ip_address: Some("10.0.0.1".into()),
    })
    .await
    .unwrap();

    let logs = sv
      .list(AuditFilter { entity: Some("SoftwareAsset".into()), ..Default::default() })
      .await
      .unwrap();

    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].change_type, ChangeType::Update);
    assert_eq!(logs[0].new_value, Some(json::json!({"total_licenses": 8})));
  }
}
