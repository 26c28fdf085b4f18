use serde::Deserialize;

use crate::entity::vendor;
use crate::prelude::*;

#[derive(Debug, Default, Deserialize)]
pub struct NewVendor {
  pub company_name: String,
  pub contact_person: Option<String>,
  pub email: Option<String>,
  pub phone: Option<String>,
  pub rating: Option<Decimal>,
  pub address: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct VendorPatch {
  pub company_name: Option<String>,
  pub contact_person: Option<String>,
  pub email: Option<String>,
  pub phone: Option<String>,
  pub rating: Option<Decimal>,
  pub address: Option<String>,
  pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct VendorFilter {
  /// Substring match over company name, contact person and email.
  pub search: Option<String>,
}

pub struct Vendor<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Vendor<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn create(&self, new: NewVendor) -> Result<vendor::Model> {
    if new.company_name.trim().is_empty() {
      return Err(Error::validation("company_name required"));
    }
    if let Some(rating) = new.rating {
      validate_rating(rating)?;
    }

    let now = Utc::now().naive_utc();
    let vendor = vendor::ActiveModel {
      company_name: Set(new.company_name),
      contact_person: Set(new.contact_person),
      email: Set(new.email),
      phone: Set(new.phone),
      rating: Set(new.rating),
      address: Set(new.address),
      is_active: Set(true),
      created_at: Set(now),
      updated_at: Set(now),
      ..Default::default()
    };

    Ok(vendor.insert(self.db).await?)
  }

  pub async fn by_id(&self, id: i32) -> Result<vendor::Model> {
    vendor::Entity::find_by_id(id)
      .one(self.db)
      .await?
      .ok_or(Error::NotFound("Vendor"))
  }

  pub async fn list(&self, filter: VendorFilter) -> Result<Vec<vendor::Model>> {
    let mut query = vendor::Entity::find();

    if let Some(search) = filter.search {
      let pattern = format!("%{search}%");
      query = query.filter(
        Condition::any()
          .add(vendor::Column::CompanyName.like(&pattern))
          .add(vendor::Column::ContactPerson.like(&pattern))
          .add(vendor::Column::Email.like(&pattern)),
      );
    }

    Ok(query.order_by_asc(vendor::Column::CompanyName).all(self.db).await?)
  }

  /// Vendors are deactivated, never removed; contracts and invoices keep
  /// referencing them.
  pub async fn update(&self, id: i32, patch: VendorPatch) -> Result<vendor::Model> {
    let vendor = self.by_id(id).await?;

    if let Some(rating) = patch.rating {
      validate_rating(rating)?;
    }

    let mut active: vendor::ActiveModel = vendor.into();
    if let Some(company_name) = patch.company_name {
      active.company_name = Set(company_name);
    }
    if let Some(contact_person) = patch.contact_person {
      active.contact_person = Set(Some(contact_person));
    }
    if let Some(email) = patch.email {
      active.email = Set(Some(email));
    }
    if let Some(phone) = patch.phone {
      active.phone = Set(Some(phone));
    }
    if let Some(rating) = patch.rating {
      active.rating = Set(Some(rating));
    }
    if let Some(address) = patch.address {
      active.address = Set(Some(address));
    }
    if let Some(is_active) = patch.is_active {
      active.is_active = Set(is_active);
    }
    active.updated_at = Set(Utc::now().naive_utc());

    Ok(active.update(self.db).await?)
  }
}

fn validate_rating(rating: Decimal) -> Result<()> {
  if rating < Decimal::ONE || rating > Decimal::from(5) {
    return Err(Error::validation("rating must be between 1 and 5"));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::tests::setup_test_db;

  #[tokio::test]
  async fn rejects_out_of_range_rating() {
    let db = setup_test_db().await;
    let sv = Vendor::new(&db);

    let err = sv
      .create(NewVendor {
        company_name: "Acme Corp".into(),
        rating: Some(Decimal::from(6)),
        ..Default::default()
      })
      .await
      .unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
  }

  #[tokio::test]
  async fn deactivation_keeps_vendor_readable() {
    let db = setup_test_db().await;
    let sv = Vendor::new(&db);

    let vendor = sv
      .create(NewVendor { company_name: "Acme Corp".into(), ..Default::default() })
      .await
      .unwrap();

    let updated = sv
      .update(
        vendor.id,
        VendorPatch { is_active: Some(false), ..Default::default() },
      )
      .await
      .unwrap();
    assert!(!updated.is_active);

    // still referenceable
    assert_eq!(sv.by_id(vendor.id).await.unwrap().id, vendor.id);
  }
}
