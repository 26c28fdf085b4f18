//! Software asset registry and seat accounting.

use serde::Deserialize;

use crate::entity::{
  allocation,
  asset::{self, LicenseType},
};
use crate::prelude::*;

#[derive(Debug, Default, Deserialize)]
pub struct NewAsset {
  pub name: String,
  pub category: Option<String>,
  pub version: Option<String>,
  #[serde(default)]
  pub license_type: LicenseType,
  #[serde(default)]
  pub total_licenses: i32,
  pub description: Option<String>,
  pub tags: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AssetPatch {
  pub name: Option<String>,
  pub category: Option<String>,
  pub version: Option<String>,
  pub license_type: Option<LicenseType>,
  pub total_licenses: Option<i32>,
  pub description: Option<String>,
  pub tags: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AssetFilter {
  pub category: Option<String>,
  pub license_type: Option<LicenseType>,
  /// Substring match over name, description, tags and version.
  pub search: Option<String>,
}

pub struct Asset<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Asset<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn create(
    &self,
    new: NewAsset,
    created_by: Option<i32>,
  ) -> Result<asset::Model> {
    if new.name.trim().is_empty() {
      return Err(Error::validation("name required"));
    }
    if new.total_licenses < 0 {
      return Err(Error::validation("total_licenses must not be negative"));
    }

    let now = Utc::now().naive_utc();
    let asset = asset::ActiveModel {
      name: Set(new.name),
      category: Set(new.category),
      version: Set(new.version),
      license_type: Set(new.license_type),
      total_licenses: Set(new.total_licenses),
      description: Set(new.description),
      tags: Set(new.tags),
      is_deleted: Set(false),
      created_by: Set(created_by),
      created_at: Set(now),
      updated_at: Set(now),
      ..Default::default()
    };

    Ok(asset.insert(self.db).await?)
  }

  /// Soft-deleted assets are invisible to every read path.
  pub async fn by_id(&self, id: i32) -> Result<asset::Model> {
    asset::Entity::find_by_id(id)
      .filter(asset::Column::IsDeleted.eq(false))
      .one(self.db)
      .await?
      .ok_or(Error::NotFound("Software asset"))
  }

  pub async fn list(&self, filter: AssetFilter) -> Result<Vec<asset::Model>> {
    let mut query =
      asset::Entity::find().filter(asset::Column::IsDeleted.eq(false));

    if let Some(category) = filter.category {
      query = query.filter(asset::Column::Category.eq(category));
    }
    if let Some(license_type) = filter.license_type {
      query = query.filter(asset::Column::LicenseType.eq(license_type));
    }
    if let Some(search) = filter.search {
      let pattern = format!("%{search}%");
      query = query.filter(
        Condition::any()
          .add(asset::Column::Name.like(&pattern))
          .add(asset::Column::Description.like(&pattern))
          .add(asset::Column::Tags.like(&pattern))
          .add(asset::Column::Version.like(&pattern)),
      );
    }

    Ok(query.order_by_asc(asset::Column::Name).all(self.db).await?)
  }

  pub async fn update(&self, id: i32, patch: AssetPatch) -> Result<asset::Model> {
    let asset = self.by_id(id).await?;

    if matches!(patch.total_licenses, Some(n) if n < 0) {
      return Err(Error::validation("total_licenses must not be negative"));
    }

    let mut active: asset::ActiveModel = asset.into();
    if let Some(name) = patch.name {
      active.name = Set(name);
    }
    if let Some(category) = patch.category {
      active.category = Set(Some(category));
    }
    if let Some(version) = patch.version {
      active.version = Set(Some(version));
    }
    if let Some(license_type) = patch.license_type {
      active.license_type = Set(license_type);
    }
    if let Some(total_licenses) = patch.total_licenses {
      active.total_licenses = Set(total_licenses);
    }
    if let Some(description) = patch.description {
      active.description = Set(Some(description));
    }
    if let Some(tags) = patch.tags {
      active.tags = Set(Some(tags));
    }
    active.updated_at = Set(Utc::now().naive_utc());

    Ok(active.update(self.db).await?)
  }

  /// Soft delete: the row stays, listings and lookups hide it.
  pub async fn soft_delete(&self, id: i32) -> Result<asset::Model> {
    let asset = self.by_id(id).await?;

    let updated = asset::ActiveModel {
      is_deleted: Set(true),
      updated_at: Set(Utc::now().naive_utc()),
      ..asset.into()
    }
    .update(self.db)
    .await?;

    Ok(updated)
  }

  pub async fn used_licenses(&self, asset_id: i32) -> Result<u64> {
    Ok(
      allocation::Entity::find()
        .filter(allocation::Column::SoftwareAssetId.eq(asset_id))
        .filter(allocation::Column::ActiveFlag.eq(true))
        .count(self.db)
        .await?,
    )
  }

  /// (used, available); available is clamped at zero.
  pub async fn usage(&self, asset: &asset::Model) -> Result<(u64, u64)> {
    let used = self.used_licenses(asset.id).await?;
    let available = (asset.total_licenses.max(0) as u64).saturating_sub(used);
    Ok((used, available))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::tests::setup_test_db;

  #[tokio::test]
  async fn soft_delete_hides_asset() {
    let db = setup_test_db().await;
    let sv = Asset::new(&db);

    let asset = sv
      .create(
        NewAsset { name: "IDE Pro".into(), total_licenses: 3, ..Default::default() },
        None,
      )
      .await
      .unwrap();

    sv.soft_delete(asset.id).await.unwrap();

    assert!(matches!(sv.by_id(asset.id).await, Err(Error::NotFound(_))));
    assert!(sv.list(AssetFilter::default()).await.unwrap().is_empty());

    // the row itself survives
    let raw = asset::Entity::find_by_id(asset.id).one(&db).await.unwrap();
    assert!(raw.unwrap().is_deleted);
  }

  #[tokio::test]
  async fn rejects_negative_seat_cap() {
    let db = setup_test_db().await;
    let sv = Asset::new(&db);

    let err = sv
      .create(
        NewAsset {
          name: "Broken".into(),
          total_licenses: -1,
          ..Default::default()
        },
        None,
      )
      .await
      .unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
  }

  #[tokio::test]
  async fn search_matches_tags() {
    let db = setup_test_db().await;
    let sv = Asset::new(&db);

    sv.create(
      NewAsset {
        name: "Render Farm".into(),
        tags: Some("gpu, graphics".into()),
        ..Default::default()
      },
      None,
    )
    .await
    .unwrap();

    let hits = sv
      .list(AssetFilter { search: Some("gpu".into()), ..Default::default() })
      .await
      .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].tag_list(), vec!["gpu", "graphics"]);
  }
}
