//! Dashboard stats and report projections (plain JSON, no export pipeline).

use std::collections::HashMap;

use serde::Serialize;

use crate::entity::{
  allocation, asset,
  contract::{self, ContractStatus},
  invoice, user, vendor,
};
use crate::entity::{asset::LicenseType, audit_log};
use crate::prelude::*;

#[derive(Debug, Serialize)]
pub struct DashboardStats {
  pub total_assets: u64,
  pub active_contracts: u64,
  pub expiring_in_30_days: u64,
  pub expiring_in_90_days: u64,
  pub expired_pending: u64,
  pub total_spend: String,
  pub total_vendors: u64,
}

#[derive(Debug, Serialize)]
pub struct InventoryRow {
  pub id: i32,
  pub name: String,
  pub category: Option<String>,
  pub version: Option<String>,
  pub license_type: LicenseType,
  pub total_licenses: i32,
  pub used: u64,
  pub available: u64,
}

#[derive(Debug, Serialize)]
pub struct RenewalCalendarRow {
  pub id: i32,
  pub software_asset: String,
  pub vendor: Option<String>,
  pub expiry_date: Option<NaiveDate>,
  pub renewal_due_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct VendorSpendRow {
  pub vendor_id: Option<i32>,
  pub vendor_name: String,
  pub total: String,
}

#[derive(Debug, Serialize)]
pub struct AuditTrailRow {
  pub id: i32,
  pub entity: String,
  pub change_type: audit_log::ChangeType,
  pub user_email: Option<String>,
  pub ip_address: Option<String>,
  pub timestamp: DateTime,
}

pub struct Report<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Report<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn stats(&self) -> Result<DashboardStats> {
    let today = today();
    let next_30 = today + Days::new(30);
    let next_90 = today + Days::new(90);

    let total_assets = asset::Entity::find()
      .filter(asset::Column::IsDeleted.eq(false))
      .count(self.db)
      .await?;

    let active = contract::Entity::find()
      .filter(contract::Column::Status.eq(ContractStatus::Active));

    let active_contracts = active.clone().count(self.db).await?;

    let expiring_in_30_days = active
      .clone()
      .filter(contract::Column::ExpiryDate.between(today, next_30))
      .count(self.db)
      .await?;

    let expiring_in_90_days = active
      .clone()
      .filter(contract::Column::ExpiryDate.gt(next_30))
      .filter(contract::Column::ExpiryDate.lte(next_90))
      .count(self.db)
      .await?;

    // past expiry but the batch job has not flipped them yet
    let expired_pending = active
      .filter(contract::Column::ExpiryDate.lt(today))
      .count(self.db)
      .await?;

    let total_spend: Decimal = invoice::Entity::find()
      .all(self.db)
      .await?
      .iter()
      .map(|i| i.total)
      .sum();

    let total_vendors = vendor::Entity::find()
      .filter(vendor::Column::IsActive.eq(true))
      .count(self.db)
      .await?;

    Ok(DashboardStats {
      total_assets,
      active_contracts,
      expiring_in_30_days,
      expiring_in_90_days,
      expired_pending,
      total_spend: total_spend.to_string(),
      total_vendors,
    })
  }

  pub async fn inventory(&self) -> Result<Vec<InventoryRow>> {
    let assets = asset::Entity::find()
      .filter(asset::Column::IsDeleted.eq(false))
      .order_by_asc(asset::Column::Name)
      .all(self.db)
      .await?;

    let mut rows = Vec::with_capacity(assets.len());
    for asset in assets {
      let used = allocation::Entity::find()
        .filter(allocation::Column::SoftwareAssetId.eq(asset.id))
        .filter(allocation::Column::ActiveFlag.eq(true))
        .count(self.db)
        .await?;

      rows.push(InventoryRow {
        id: asset.id,
        name: asset.name,
        category: asset.category,
        version: asset.version,
        license_type: asset.license_type,
        total_licenses: asset.total_licenses,
        used,
        available: (asset.total_licenses.max(0) as u64).saturating_sub(used),
      });
    }

    Ok(rows)
  }

  /// Active contracts expiring within the next year, soonest first.
  pub async fn renewal_calendar(&self) -> Result<Vec<RenewalCalendarRow>> {
    let today = today();
    let horizon = today + Days::new(365);

    let contracts = contract::Entity::find()
      .filter(contract::Column::Status.eq(ContractStatus::Active))
      .filter(contract::Column::ExpiryDate.between(today, horizon))
      .order_by_asc(contract::Column::ExpiryDate)
      .find_also_related(asset::Entity)
      .all(self.db)
      .await?;

    let vendors = self.vendor_names().await?;

    Ok(
      contracts
        .into_iter()
        .map(|(contract, asset)| RenewalCalendarRow {
          id: contract.id,
          software_asset: asset.map(|a| a.name).unwrap_or_default(),
          vendor: contract.vendor_id.and_then(|id| vendors.get(&id).cloned()),
          expiry_date: contract.expiry_date,
          renewal_due_date: contract.renewal_due_date,
        })
        .collect(),
    )
  }

  pub async fn vendor_spend(&self) -> Result<Vec<VendorSpendRow>> {
    let invoices = invoice::Entity::find().all(self.db).await?;

    let mut spend: HashMap<Option<i32>, Decimal> = HashMap::new();
    for invoice in invoices {
      *spend.entry(invoice.vendor_id).or_default() += invoice.total;
    }

    let vendors = self.vendor_names().await?;

    let mut totals: Vec<(Option<i32>, Decimal)> = spend.into_iter().collect();
    totals.sort_by(|a, b| b.1.cmp(&a.1));

    Ok(
      totals
        .into_iter()
        .map(|(vendor_id, total)| VendorSpendRow {
          vendor_id,
          vendor_name: vendor_id
            .and_then(|id| vendors.get(&id).cloned())
            .unwrap_or_else(|| String::from("N/A")),
          total: total.to_string(),
        })
        .collect(),
    )
  }

  /// Latest 500 audit rows with actor emails resolved.
  pub async fn audit_trail(&self) -> Result<Vec<AuditTrailRow>> {
    let logs = audit_log::Entity::find()
      .order_by_desc(audit_log::Column::Timestamp)
      .order_by_desc(audit_log::Column::Id)
      .limit(500)
      .all(self.db)
      .await?;

    let users: HashMap<i32, String> = user::Entity::find()
      .all(self.db)
      .await?
      .into_iter()
      .map(|u| (u.id, u.email))
      .collect();

    Ok(
      logs
        .into_iter()
        .map(|log| AuditTrailRow {
          id: log.id,
          entity: log.entity,
          change_type: log.change_type,
          user_email: log.user_id.and_then(|id| users.get(&id).cloned()),
          ip_address: log.ip_address,
          timestamp: log.timestamp,
        })
        .collect(),
    )
  }

  async fn vendor_names(&self) -> Result<HashMap<i32, String>> {
    Ok(
      vendor::Entity::find()
        .all(self.db)
        .await?
        .into_iter()
        .map(|v| (v.id, v.company_name))
        .collect(),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::{self, tests::setup_test_db};

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[tokio::test]
  async fn stats_count_expiry_windows() {
    let db = setup_test_db().await;
    let assets = sv::Asset::new(&db);
    let contracts = sv::Contract::new(&db);

    let asset = assets
      .create(
        sv::asset::NewAsset {
          name: "CAD".into(),
          total_licenses: 1,
          ..Default::default()
        },
        None,
      )
      .await
      .unwrap();

    let today = today();
    for (expiry, label) in [
      (today + Days::new(10), "soon"),
      (today + Days::new(60), "later"),
      (today - Days::new(1), "past"),
    ] {
      contracts
        .create(sv::contract::NewContract {
          software_asset_id: asset.id,
          vendor_id: None,
          purchase_date: date(2026, 1, 1),
          duration_months: 12,
          expiry_date: Some(expiry),
          renewal_due_date: None,
          support_level: Default::default(),
          notes: Some(label.into()),
        })
        .await
        .unwrap();
    }

    let stats = Report::new(&db).stats().await.unwrap();
    assert_eq!(stats.total_assets, 1);
    assert_eq!(stats.active_contracts, 3);
    assert_eq!(stats.expiring_in_30_days, 1);
    assert_eq!(stats.expiring_in_90_days, 1);
    assert_eq!(stats.expired_pending, 1);
  }

  #[tokio::test]
  async fn inventory_reports_usage() {
    let db = setup_test_db().await;

    let asset = sv::Asset::new(&db)
      .create(
        sv::asset::NewAsset {
          name: "DB Tool".into(),
          total_licenses: 4,
          ..Default::default()
        },
        None,
      )
      .await
      .unwrap();

    let now = Utc::now().naive_utc();
    let dept = crate::entity::department::ActiveModel {
      name: Set("Ops".into()),
      code: Set("OPS".into()),
      branch_id: Set(None),
      is_active: Set(true),
      created_at: Set(now),
      updated_at: Set(now),
      ..Default::default()
    }
    .insert(&db)
    .await
    .unwrap();

    sv::Allocation::new(&db)
      .allocate(sv::allocation::NewAllocation {
        software_asset_id: asset.id,
        department_id: dept.id,
        user_id: None,
        notes: None,
      })
      .await
      .unwrap();

    let inventory = Report::new(&db).inventory().await.unwrap();
    assert_eq!(inventory.len(), 1);
    assert_eq!(inventory[0].used, 1);
    assert_eq!(inventory[0].available, 3);
  }
}
