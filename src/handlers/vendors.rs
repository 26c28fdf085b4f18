use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};

use crate::auth::Actor;
use crate::entity::{audit_log::ChangeType, vendor};
use crate::prelude::*;
use crate::state::AppState;
use crate::sv::audit::Change;
use crate::sv::vendor::{NewVendor, VendorFilter, VendorPatch};

pub async fn list(
  State(app): State<Arc<AppState>>,
  _actor: Actor,
  Query(filter): Query<VendorFilter>,
) -> Result<Json<Vec<vendor::Model>>> {
  Ok(Json(app.sv().vendor.list(filter).await?))
}

pub async fn get(
  State(app): State<Arc<AppState>>,
  _actor: Actor,
  Path(id): Path<i32>,
) -> Result<Json<vendor::Model>> {
  Ok(Json(app.sv().vendor.by_id(id).await?))
}

pub async fn create(
  State(app): State<Arc<AppState>>,
  actor: Actor,
  Json(new): Json<NewVendor>,
) -> Result<Json<vendor::Model>> {
  actor.require_edit_finance()?;

  let sv = app.sv();
  let vendor = sv.vendor.create(new).await?;

  sv.audit
    .record(Change {
      entity: "Vendor",
      object_id: Some(vendor.id),
      change_type: ChangeType::Create,
      old_value: None,
      new_value: json::to_value(&vendor).ok(),
      user_id: Some(actor.user.id),
      ip_address: actor.ip,
    })
    .await?;

  Ok(Json(vendor))
}

pub async fn update(
  State(app): State<Arc<AppState>>,
  actor: Actor,
  Path(id): Path<i32>,
  Json(patch): Json<VendorPatch>,
) -> Result<Json<vendor::Model>> {
  actor.require_edit_finance()?;

  let sv = app.sv();
  let old = sv.vendor.by_id(id).await?;
  let vendor = sv.vendor.update(id, patch).await?;

  sv.audit
    .record(Change {
      entity: "Vendor",
      object_id: Some(vendor.id),
      change_type: ChangeType::Update,
      old_value: json::to_value(&old).ok(),
      new_value: json::to_value(&vendor).ok(),
      user_id: Some(actor.user.id),
      ip_address: actor.ip,
    })
    .await?;

  Ok(Json(vendor))
}
