use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};

use crate::auth::Actor;
use crate::entity::notification;
use crate::prelude::*;
use crate::state::AppState;

pub async fn list(
  State(app): State<Arc<AppState>>,
  actor: Actor,
) -> Result<Json<Vec<notification::Model>>> {
  Ok(Json(app.sv().notification.for_user(actor.user.id).await?))
}

/// Fetching a notification marks it read.
pub async fn get(
  State(app): State<Arc<AppState>>,
  actor: Actor,
  Path(id): Path<i32>,
) -> Result<Json<notification::Model>> {
  Ok(Json(app.sv().notification.read(id, actor.user.id).await?))
}

pub async fn mark_all_read(
  State(app): State<Arc<AppState>>,
  actor: Actor,
) -> Result<Json<json::Value>> {
  let updated = app.sv().notification.mark_all_read(actor.user.id).await?;
  Ok(Json(json::json!({ "status": "ok", "updated": updated })))
}
