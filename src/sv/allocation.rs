//! Seat allocation with capacity enforcement.
//!
//! The capacity check runs inside a transaction holding an exclusive lock on
//! the asset row, so two concurrent requests for the last seat cannot both
//! pass the count. SQLite ignores the lock clause but serializes writers
//! anyway; on other backends this becomes SELECT ... FOR UPDATE.

use serde::Deserialize;

use crate::entity::{allocation, asset};
use crate::prelude::*;

#[derive(Debug, Deserialize)]
pub struct NewAllocation {
  pub software_asset_id: i32,
  pub department_id: i32,
  pub user_id: Option<i32>,
  pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AllocationFilter {
  pub software_asset_id: Option<i32>,
  pub department_id: Option<i32>,
  pub active_flag: Option<bool>,
}

pub struct Allocation<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Allocation<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn allocate(&self, new: NewAllocation) -> Result<allocation::Model> {
    let txn = self.db.begin().await?;

    let asset = asset::Entity::find_by_id(new.software_asset_id)
      .filter(asset::Column::IsDeleted.eq(false))
      .lock_exclusive()
      .one(&txn)
      .await?
      .ok_or(Error::NotFound("Software asset"))?;

    let used = allocation::Entity::find()
      .filter(allocation::Column::SoftwareAssetId.eq(asset.id))
      .filter(allocation::Column::ActiveFlag.eq(true))
      .count(&txn)
      .await?;

    if used >= asset.total_licenses.max(0) as u64 {
      return Err(Error::OverAllocation);
    }

    let now = Utc::now().naive_utc();
    let allocation = allocation::ActiveModel {
      software_asset_id: Set(asset.id),
      department_id: Set(new.department_id),
      user_id: Set(new.user_id),
      allocated_on: Set(now),
      returned_on: Set(None),
      active_flag: Set(true),
      notes: Set(new.notes),
      created_at: Set(now),
      updated_at: Set(now),
      ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    Ok(allocation)
  }

  pub async fn by_id(&self, id: i32) -> Result<allocation::Model> {
    allocation::Entity::find_by_id(id)
      .one(self.db)
      .await?
      .ok_or(Error::NotFound("Allocation"))
  }

  pub async fn list(
    &self,
    filter: AllocationFilter,
  ) -> Result<Vec<allocation::Model>> {
    let mut query = allocation::Entity::find();

    if let Some(asset_id) = filter.software_asset_id {
      query = query.filter(allocation::Column::SoftwareAssetId.eq(asset_id));
    }
    if let Some(department_id) = filter.department_id {
      query = query.filter(allocation::Column::DepartmentId.eq(department_id));
    }
    if let Some(active) = filter.active_flag {
      query = query.filter(allocation::Column::ActiveFlag.eq(active));
    }

    Ok(query.order_by_desc(allocation::Column::AllocatedOn).all(self.db).await?)
  }

  /// Returning a seat. The entity's `before_save` guarantees the row can
  /// never stay active once `returned_on` is set; rows are kept for history,
  /// never hard-deleted.
  pub async fn deactivate(
    &self,
    id: i32,
    returned_on: Option<DateTime>,
  ) -> Result<allocation::Model> {
    let allocation = self.by_id(id).await?;

    let now = Utc::now().naive_utc();
    let updated = allocation::ActiveModel {
      returned_on: Set(Some(returned_on.unwrap_or(now))),
      updated_at: Set(now),
      ..allocation.into()
    }
    .update(self.db)
    .await?;

    Ok(updated)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::{self, tests::setup_test_db};

  async fn seed(db: &DatabaseConnection, seats: i32) -> (i32, i32) {
    let asset = sv::Asset::new(db)
      .create(
        sv::asset::NewAsset {
          name: "Office Suite".into(),
          total_licenses: seats,
          ..Default::default()
        },
        None,
      )
      .await
      .unwrap();

    let now = Utc::now().naive_utc();
    let department = crate::entity::department::ActiveModel {
      name: Set("Engineering".into()),
      code: Set("ENG".into()),
      branch_id: Set(None),
      is_active: Set(true),
      created_at: Set(now),
      updated_at: Set(now),
      ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    (asset.id, department.id)
  }

  #[tokio::test]
  async fn allocates_until_seats_run_out() {
    let db = setup_test_db().await;
    let (asset_id, dept_id) = seed(&db, 2).await;
    let sv = Allocation::new(&db);

    for _ in 0..2 {
      sv.allocate(NewAllocation {
        software_asset_id: asset_id,
        department_id: dept_id,
        user_id: None,
        notes: None,
      })
      .await
      .unwrap();
    }

    let err = sv
      .allocate(NewAllocation {
        software_asset_id: asset_id,
        department_id: dept_id,
        user_id: None,
        notes: None,
      })
      .await
      .unwrap_err();

    assert!(matches!(err, Error::OverAllocation));
  }

  #[tokio::test]
  async fn usage_tracks_active_allocations() {
    let db = setup_test_db().await;
    let (asset_id, dept_id) = seed(&db, 5).await;

    let assets = sv::Asset::new(&db);
    let asset = assets.by_id(asset_id).await.unwrap();
    assert_eq!(assets.usage(&asset).await.unwrap(), (0, 5));

    Allocation::new(&db)
      .allocate(NewAllocation {
        software_asset_id: asset_id,
        department_id: dept_id,
        user_id: None,
        notes: None,
      })
      .await
      .unwrap();

    assert_eq!(assets.usage(&asset).await.unwrap(), (1, 4));
  }

  #[tokio::test]
  async fn returning_forces_inactive() {
    let db = setup_test_db().await;
    let (asset_id, dept_id) = seed(&db, 1).await;
    let sv = Allocation::new(&db);

    let allocation = sv
      .allocate(NewAllocation {
        software_asset_id: asset_id,
        department_id: dept_id,
        user_id: None,
        notes: None,
      })
      .await
      .unwrap();
    assert!(allocation.active_flag);

    let returned = sv.deactivate(allocation.id, None).await.unwrap();
    assert!(!returned.active_flag);
    assert!(returned.returned_on.is_some());

    // seat is free again
    sv.allocate(NewAllocation {
      software_asset_id: asset_id,
      department_id: dept_id,
      user_id: None,
      notes: None,
    })
    .await
    .unwrap();
  }

  #[tokio::test]
  async fn returned_on_wins_over_caller_intent() {
    let db = setup_test_db().await;
    let (asset_id, dept_id) = seed(&db, 1).await;

    let allocation = Allocation::new(&db)
      .allocate(NewAllocation {
        software_asset_id: asset_id,
        department_id: dept_id,
        user_id: None,
        notes: None,
      })
      .await
      .unwrap();

    // try to keep the flag on while setting returned_on
    let now = Utc::now().naive_utc();
    let updated = allocation::ActiveModel {
      returned_on: Set(Some(now)),
      active_flag: Set(true),
      ..allocation.into()
    }
    .update(&db)
    .await
    .unwrap();

    assert!(!updated.active_flag);
  }
}
