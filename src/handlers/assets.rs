use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Serialize;

use crate::auth::Actor;
use crate::entity::{asset, audit_log::ChangeType};
use crate::prelude::*;
use crate::state::AppState;
use crate::sv::asset::{AssetFilter, AssetPatch, NewAsset};
use crate::sv::audit::Change;

/// Asset representation with derived seat counts.
#[derive(Debug, Serialize)]
pub struct AssetOut {
  #[serde(flatten)]
  pub asset: asset::Model,
  pub used_licenses: u64,
  pub available_licenses: u64,
}

async fn with_usage(app: &AppState, asset: asset::Model) -> Result<AssetOut> {
  let (used_licenses, available_licenses) =
    app.sv().asset.usage(&asset).await?;
  Ok(AssetOut { asset, used_licenses, available_licenses })
}

pub async fn list(
  State(app): State<Arc<AppState>>,
  _actor: Actor,
  Query(filter): Query<AssetFilter>,
) -> Result<Json<Vec<AssetOut>>> {
  let assets = app.sv().asset.list(filter).await?;

  let mut out = Vec::with_capacity(assets.len());
  for asset in assets {
    out.push(with_usage(&app, asset).await?);
  }
  Ok(Json(out))
}

pub async fn get(
  State(app): State<Arc<AppState>>,
  _actor: Actor,
  Path(id): Path<i32>,
) -> Result<Json<AssetOut>> {
  let asset = app.sv().asset.by_id(id).await?;
  Ok(Json(with_usage(&app, asset).await?))
}

pub async fn create(
  State(app): State<Arc<AppState>>,
  actor: Actor,
  Json(new): Json<NewAsset>,
) -> Result<Json<AssetOut>> {
  actor.require_edit_assets()?;

  let sv = app.sv();
  let asset = sv.asset.create(new, Some(actor.user.id)).await?;

  sv.audit
    .record(Change {
      entity: "SoftwareAsset",
      object_id: Some(asset.id),
      change_type: ChangeType::Create,
      old_value: None,
      new_value: json::to_value(&asset).ok(),
      user_id: Some(actor.user.id),
      ip_address: actor.ip.clone(),
    })
    .await?;

  Ok(Json(with_usage(&app, asset).await?))
}

pub async fn update(
  State(app): State<Arc<AppState>>,
  actor: Actor,
  Path(id): Path<i32>,
  Json(patch): Json<AssetPatch>,
) -> Result<Json<AssetOut>> {
  actor.require_edit_assets()?;

  let sv = app.sv();
  let old = sv.asset.by_id(id).await?;
  let asset = sv.asset.update(id, patch).await?;

  sv.audit
    .record(Change {
      entity: "SoftwareAsset",
      object_id: Some(asset.id),
      change_type: ChangeType::Update,
      old_value: json::to_value(&old).ok(),
      new_value: json::to_value(&asset).ok(),
      user_id: Some(actor.user.id),
      ip_address: actor.ip.clone(),
    })
    .await?;

  Ok(Json(with_usage(&app, asset).await?))
}

/// DELETE is a soft delete; the row is hidden, never removed.
pub async fn delete(
  State(app): State<Arc<AppState>>,
  actor: Actor,
  Path(id): Path<i32>,
) -> Result<Json<json::Value>> {
  actor.require_edit_assets()?;

  let sv = app.sv();
  let old = sv.asset.by_id(id).await?;
  let asset = sv.asset.soft_delete(id).await?;

  sv.audit
    .record(Change {
      entity: "SoftwareAsset",
      object_id: Some(asset.id),
      change_type: ChangeType::SoftDelete,
      old_value: json::to_value(&old).ok(),
      new_value: json::to_value(&asset).ok(),
      user_id: Some(actor.user.id),
      ip_address: actor.ip,
    })
    .await?;

  Ok(Json(json::json!({ "success": true })))
}
