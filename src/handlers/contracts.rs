use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use crate::auth::Actor;
use crate::entity::{audit_log::ChangeType, contract, renewal_history};
use crate::prelude::*;
use crate::state::AppState;
use crate::sv::audit::Change;
use crate::sv::contract::{ContractFilter, ContractPatch, NewContract};

pub async fn list(
  State(app): State<Arc<AppState>>,
  _actor: Actor,
  Query(filter): Query<ContractFilter>,
) -> Result<Json<Vec<contract::Model>>> {
  Ok(Json(app.sv().contract.list(filter).await?))
}

pub async fn get(
  State(app): State<Arc<AppState>>,
  _actor: Actor,
  Path(id): Path<i32>,
) -> Result<Json<contract::Model>> {
  Ok(Json(app.sv().contract.by_id(id).await?))
}

pub async fn history(
  State(app): State<Arc<AppState>>,
  _actor: Actor,
  Path(id): Path<i32>,
) -> Result<Json<Vec<renewal_history::Model>>> {
  app.sv().contract.by_id(id).await?;
  Ok(Json(app.sv().contract.history(id).await?))
}

pub async fn create(
  State(app): State<Arc<AppState>>,
  actor: Actor,
  Json(new): Json<NewContract>,
) -> Result<Json<contract::Model>> {
  actor.require_edit_assets()?;

  let sv = app.sv();
  let contract = sv.contract.create(new).await?;

  sv.audit
    .record(Change {
      entity: "LicenseContract",
      object_id: Some(contract.id),
      change_type: ChangeType::Create,
      old_value: None,
      new_value: json::to_value(&contract).ok(),
      user_id: Some(actor.user.id),
      ip_address: actor.ip,
    })
    .await?;

  Ok(Json(contract))
}

pub async fn update(
  State(app): State<Arc<AppState>>,
  actor: Actor,
  Path(id): Path<i32>,
  Json(patch): Json<ContractPatch>,
) -> Result<Json<contract::Model>> {
  actor.require_edit_assets()?;

  let sv = app.sv();
  let old = sv.contract.by_id(id).await?;
  let contract = sv.contract.update(id, patch).await?;

  sv.audit
    .record(Change {
      entity: "LicenseContract",
      object_id: Some(contract.id),
      change_type: ChangeType::Update,
      old_value: json::to_value(&old).ok(),
      new_value: json::to_value(&contract).ok(),
      user_id: Some(actor.user.id),
      ip_address: actor.ip,
    })
    .await?;

  Ok(Json(contract))
}

#[derive(Debug, Deserialize)]
pub struct RenewReq {
  pub new_expiry: Option<NaiveDate>,
  pub invoice_id: Option<i32>,
}

/// Dedicated renew action: history insert + contract update, atomically.
pub async fn renew(
  State(app): State<Arc<AppState>>,
  actor: Actor,
  Path(id): Path<i32>,
  Json(req): Json<RenewReq>,
) -> Result<Json<contract::Model>> {
  actor.require_edit_assets()?;

  let sv = app.sv();
  let old = sv.contract.by_id(id).await?;
  let contract = sv
    .contract
    .renew(id, req.new_expiry, req.invoice_id, Some(actor.user.id))
    .await?;

  sv.audit
    .record(Change {
      entity: "LicenseContract",
      object_id: Some(contract.id),
      change_type: ChangeType::Update,
      old_value: json::to_value(&old).ok(),
      new_value: json::to_value(&contract).ok(),
      user_id: Some(actor.user.id),
      ip_address: actor.ip,
    })
    .await?;

  Ok(Json(contract))
}
