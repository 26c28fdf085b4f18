use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use crate::auth::Actor;
use crate::entity::{allocation, audit_log::ChangeType};
use crate::prelude::*;
use crate::state::AppState;
use crate::sv::allocation::{AllocationFilter, NewAllocation};
use crate::sv::audit::Change;

pub async fn list(
  State(app): State<Arc<AppState>>,
  _actor: Actor,
  Query(filter): Query<AllocationFilter>,
) -> Result<Json<Vec<allocation::Model>>> {
  Ok(Json(app.sv().allocation.list(filter).await?))
}

pub async fn get(
  State(app): State<Arc<AppState>>,
  _actor: Actor,
  Path(id): Path<i32>,
) -> Result<Json<allocation::Model>> {
  Ok(Json(app.sv().allocation.by_id(id).await?))
}

pub async fn create(
  State(app): State<Arc<AppState>>,
  actor: Actor,
  Json(new): Json<NewAllocation>,
) -> Result<Json<allocation::Model>> {
  actor.require_edit_assets()?;

  let sv = app.sv();
  let allocation = sv.allocation.allocate(new).await?;

  sv.audit
    .record(Change {
      entity: "Allocation",
      object_id: Some(allocation.id),
      change_type: ChangeType::Create,
      old_value: None,
      new_value: json::to_value(&allocation).ok(),
      user_id: Some(actor.user.id),
      ip_address: actor.ip,
    })
    .await?;

  Ok(Json(allocation))
}

#[derive(Debug, Default, Deserialize)]
pub struct ReturnReq {
  pub returned_on: Option<DateTime>,
}

pub async fn return_seat(
  State(app): State<Arc<AppState>>,
  actor: Actor,
  Path(id): Path<i32>,
  Json(req): Json<ReturnReq>,
) -> Result<Json<allocation::Model>> {
  deactivate(app, actor, id, req.returned_on).await
}

/// DELETE deactivates; allocation rows are kept for history.
pub async fn delete(
  State(app): State<Arc<AppState>>,
  actor: Actor,
  Path(id): Path<i32>,
) -> Result<Json<allocation::Model>> {
  deactivate(app, actor, id, None).await
}

async fn deactivate(
  app: Arc<AppState>,
  actor: Actor,
  id: i32,
  returned_on: Option<DateTime>,
) -> Result<Json<allocation::Model>> {
  actor.require_edit_assets()?;

  let sv = app.sv();
  let old = sv.allocation.by_id(id).await?;
  let allocation = sv.allocation.deactivate(id, returned_on).await?;

  sv.audit
    .record(Change {
      entity: "Allocation",
      object_id: Some(allocation.id),
      change_type: ChangeType::SoftDelete,
      old_value: json::to_value(&old).ok(),
      new_value: json::to_value(&allocation).ok(),
      user_id: Some(actor.user.id),
      ip_address: actor.ip,
    })
    .await?;

  Ok(Json(allocation))
}
