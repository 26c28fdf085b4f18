use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};

use crate::auth::Actor;
use crate::entity::audit_log;
use crate::prelude::*;
use crate::state::AppState;
use crate::sv::audit::AuditFilter;

/// Read-only; there is deliberately no write surface for audit rows.
pub async fn list(
  State(app): State<Arc<AppState>>,
  _actor: Actor,
  Query(filter): Query<AuditFilter>,
) -> Result<Json<Vec<audit_log::Model>>> {
  Ok(Json(app.sv().audit.list(filter).await?))
}
