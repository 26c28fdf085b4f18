//! Contract lifecycle: date derivation, renewal, status transitions.

use serde::Deserialize;

use crate::entity::{
  asset,
  contract::{self, ContractStatus, SupportLevel},
  renewal_history,
};
use crate::prelude::*;

/// Calendar-month addition, not a fixed day count.
pub fn derive_expiry(purchase: NaiveDate, duration_months: i32) -> NaiveDate {
  purchase + Months::new(duration_months.max(0) as u32)
}

/// Contracts should be renewed 30 days before they expire.
pub fn derive_renewal_due(expiry: NaiveDate) -> NaiveDate {
  expiry - Days::new(30)
}

fn default_duration() -> i32 {
  12
}

#[derive(Debug, Deserialize)]
pub struct NewContract {
  pub software_asset_id: i32,
  pub vendor_id: Option<i32>,
  pub purchase_date: NaiveDate,
  #[serde(default = "default_duration")]
  pub duration_months: i32,
  pub expiry_date: Option<NaiveDate>,
  pub renewal_due_date: Option<NaiveDate>,
  #[serde(default)]
  pub support_level: SupportLevel,
  pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContractPatch {
  pub vendor_id: Option<i32>,
  pub purchase_date: Option<NaiveDate>,
  pub duration_months: Option<i32>,
  pub expiry_date: Option<NaiveDate>,
  pub renewal_due_date: Option<NaiveDate>,
  pub status: Option<ContractStatus>,
  pub support_level: Option<SupportLevel>,
  pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContractFilter {
  pub status: Option<ContractStatus>,
  pub support_level: Option<SupportLevel>,
  pub software_asset_id: Option<i32>,
}

pub struct Contract<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Contract<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn create(&self, new: NewContract) -> Result<contract::Model> {
    if new.duration_months < 0 {
      return Err(Error::validation("duration_months must not be negative"));
    }

    asset::Entity::find_by_id(new.software_asset_id)
      .filter(asset::Column::IsDeleted.eq(false))
      .one(self.db)
      .await?
      .ok_or(Error::NotFound("Software asset"))?;

    let expiry = new
      .expiry_date
      .unwrap_or_else(|| derive_expiry(new.purchase_date, new.duration_months));
    let renewal_due =
      new.renewal_due_date.unwrap_or_else(|| derive_renewal_due(expiry));

    let now = Utc::now().naive_utc();
    let contract = contract::ActiveModel {
      software_asset_id: Set(new.software_asset_id),
      vendor_id: Set(new.vendor_id),
      purchase_date: Set(new.purchase_date),
      duration_months: Set(new.duration_months),
      expiry_date: Set(Some(expiry)),
      renewal_due_date: Set(Some(renewal_due)),
      status: Set(ContractStatus::Active),
      support_level: Set(new.support_level),
      notes: Set(new.notes),
      created_at: Set(now),
      updated_at: Set(now),
      ..Default::default()
    };

    Ok(contract.insert(self.db).await?)
  }

  pub async fn by_id(&self, id: i32) -> Result<contract::Model> {
    contract::Entity::find_by_id(id)
      .one(self.db)
      .await?
      .ok_or(Error::NotFound("Contract"))
  }

  pub async fn list(
    &self,
    filter: ContractFilter,
  ) -> Result<Vec<contract::Model>> {
    let mut query = contract::Entity::find();

    if let Some(status) = filter.status {
      query = query.filter(contract::Column::Status.eq(status));
    }
    if let Some(level) = filter.support_level {
      query = query.filter(contract::Column::SupportLevel.eq(level));
    }
    if let Some(asset_id) = filter.software_asset_id {
      query = query.filter(contract::Column::SoftwareAssetId.eq(asset_id));
    }

    Ok(query.order_by_desc(contract::Column::ExpiryDate).all(self.db).await?)
  }

  pub async fn update(
    &self,
    id: i32,
    patch: ContractPatch,
  ) -> Result<contract::Model> {
    let contract = self.by_id(id).await?;

    let mut active: contract::ActiveModel = contract.into();
    if let Some(vendor_id) = patch.vendor_id {
      active.vendor_id = Set(Some(vendor_id));
    }
    if let Some(purchase_date) = patch.purchase_date {
      active.purchase_date = Set(purchase_date);
    }
    if let Some(duration_months) = patch.duration_months {
      active.duration_months = Set(duration_months);
    }
    if let Some(expiry_date) = patch.expiry_date {
      active.expiry_date = Set(Some(expiry_date));
    }
    if let Some(renewal_due_date) = patch.renewal_due_date {
      active.renewal_due_date = Set(Some(renewal_due_date));
    }
    if let Some(status) = patch.status {
      active.status = Set(status);
    }
    if let Some(support_level) = patch.support_level {
      active.support_level = Set(support_level);
    }
    if let Some(notes) = patch.notes {
      active.notes = Set(Some(notes));
    }
    active.updated_at = Set(Utc::now().naive_utc());

    Ok(active.update(self.db).await?)
  }

  /// Renews a contract: records the previous expiry into history and resets
  /// the lifecycle to active. Both writes happen in one transaction.
  pub async fn renew(
    &self,
    id: i32,
    new_expiry: Option<NaiveDate>,
    invoice_id: Option<i32>,
    renewed_by: Option<i32>,
  ) -> Result<contract::Model> {
    let new_expiry =
      new_expiry.ok_or_else(|| Error::validation("new_expiry required"))?;

    let txn = self.db.begin().await?;

    let contract = contract::Entity::find_by_id(id)
      .one(&txn)
      .await?
      .ok_or(Error::NotFound("Contract"))?;

    let now = Utc::now().naive_utc();
    renewal_history::ActiveModel {
      contract_id: Set(contract.id),
      previous_expiry: Set(contract.expiry_date),
      new_expiry: Set(new_expiry),
      invoice_id: Set(invoice_id),
      renewed_by: Set(renewed_by),
      notes: Set(None),
      timestamp: Set(now),
      ..Default::default()
    }
    .insert(&txn)
    .await?;

    let updated = contract::ActiveModel {
      expiry_date: Set(Some(new_expiry)),
      renewal_due_date: Set(Some(derive_renewal_due(new_expiry))),
      status: Set(ContractStatus::Active),
      updated_at: Set(now),
      ..contract.into()
    }
    .update(&txn)
    .await?;

    txn.commit().await?;
    Ok(updated)
  }

  pub async fn history(
    &self,
    contract_id: i32,
  ) -> Result<Vec<renewal_history::Model>> {
    Ok(
      renewal_history::Entity::find()
        .filter(renewal_history::Column::ContractId.eq(contract_id))
        .order_by_desc(renewal_history::Column::Timestamp)
        .all(self.db)
        .await?,
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::{self, tests::setup_test_db};

  async fn seed_asset(db: &DatabaseConnection) -> asset::Model {
    sv::Asset::new(db)
      .create(
        sv::asset::NewAsset {
          name: "Design Suite".into(),
          total_licenses: 10,
          ..Default::default()
        },
        None,
      )
      .await
      .unwrap()
  }

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn derives_calendar_month_expiry() {
    assert_eq!(derive_expiry(date(2024, 1, 1), 12), date(2025, 1, 1));
    assert_eq!(derive_expiry(date(2024, 1, 31), 1), date(2024, 2, 29));
    assert_eq!(derive_renewal_due(date(2025, 1, 1)), date(2024, 12, 2));
  }

  #[tokio::test]
  async fn create_derives_missing_dates() {
    let db = setup_test_db().await;
    let asset = seed_asset(&db).await;

    let contract = Contract::new(&db)
      .create(NewContract {
        software_asset_id: asset.id,
        vendor_id: None,
        purchase_date: date(2024, 1, 1),
        duration_months: 12,
        expiry_date: None,
        renewal_due_date: None,
        support_level: SupportLevel::Standard,
        notes: None,
      })
      .await
      .unwrap();

    assert_eq!(contract.expiry_date, Some(date(2025, 1, 1)));
    assert_eq!(contract.renewal_due_date, Some(date(2024, 12, 2)));
    assert_eq!(contract.status, ContractStatus::Active);
  }

  #[tokio::test]
  async fn create_keeps_explicit_dates() {
    let db = setup_test_db().await;
    let asset = seed_asset(&db).await;

    let contract = Contract::new(&db)
      .create(NewContract {
        software_asset_id: asset.id,
        vendor_id: None,
        purchase_date: date(2024, 1, 1),
        duration_months: 12,
        expiry_date: Some(date(2024, 6, 30)),
        renewal_due_date: None,
        support_level: SupportLevel::Standard,
        notes: None,
      })
      .await
      .unwrap();

    assert_eq!(contract.expiry_date, Some(date(2024, 6, 30)));
    assert_eq!(contract.renewal_due_date, Some(date(2024, 5, 31)));
  }

  #[tokio::test]
  async fn renew_requires_new_expiry() {
    let db = setup_test_db().await;
    let asset = seed_asset(&db).await;
    let sv = Contract::new(&db);

    let contract = sv
      .create(NewContract {
        software_asset_id: asset.id,
        vendor_id: None,
        purchase_date: date(2024, 1, 1),
        duration_months: 12,
        expiry_date: None,
        renewal_due_date: None,
        support_level: SupportLevel::Standard,
        notes: None,
      })
      .await
      .unwrap();

    let err = sv.renew(contract.id, None, None, None).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    // nothing changed, no history row appeared
    let unchanged = sv.by_id(contract.id).await.unwrap();
    assert_eq!(unchanged.expiry_date, contract.expiry_date);
    assert!(sv.history(contract.id).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn renew_records_history_and_reactivates() {
    let db = setup_test_db().await;
    let asset = seed_asset(&db).await;
    let sv = Contract::new(&db);

    let contract = sv
      .create(NewContract {
        software_asset_id: asset.id,
        vendor_id: None,
        purchase_date: date(2024, 1, 1),
        duration_months: 12,
        expiry_date: None,
        renewal_due_date: None,
        support_level: SupportLevel::Standard,
        notes: None,
      })
      .await
      .unwrap();

    // pretend the batch job already flagged it
    sv.update(
      contract.id,
      ContractPatch {
        status: Some(ContractStatus::PendingRenewal),
        ..Default::default()
      },
    )
    .await
    .unwrap();

    let renewed = sv
      .renew(contract.id, Some(date(2026, 1, 1)), None, None)
      .await
      .unwrap();

    assert_eq!(renewed.status, ContractStatus::Active);
    assert_eq!(renewed.expiry_date, Some(date(2026, 1, 1)));
    assert_eq!(renewed.renewal_due_date, Some(date(2025, 12, 2)));

    let history = sv.history(contract.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].previous_expiry, Some(date(2025, 1, 1)));
    assert_eq!(history[0].new_expiry, date(2026, 1, 1));
  }
}
