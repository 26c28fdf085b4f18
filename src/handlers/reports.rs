use std::sync::Arc;

use axum::Json;
use axum::extract::State;

use crate::auth::Actor;
use crate::prelude::*;
use crate::state::AppState;
use crate::sv::report::{
  AuditTrailRow, DashboardStats, InventoryRow, RenewalCalendarRow, VendorSpendRow,
};

pub async fn stats(
  State(app): State<Arc<AppState>>,
  _actor: Actor,
) -> Result<Json<DashboardStats>> {
  Ok(Json(app.sv().report.stats().await?))
}

pub async fn inventory(
  State(app): State<Arc<AppState>>,
  _actor: Actor,
) -> Result<Json<json::Value>> {
  let assets: Vec<InventoryRow> = app.sv().report.inventory().await?;
  Ok(Json(json::json!({ "assets": assets })))
}

pub async fn renewal_calendar(
  State(app): State<Arc<AppState>>,
  _actor: Actor,
) -> Result<Json<json::Value>> {
  let contracts: Vec<RenewalCalendarRow> =
    app.sv().report.renewal_calendar().await?;
  Ok(Json(json::json!({ "contracts": contracts })))
}

pub async fn vendor_spend(
  State(app): State<Arc<AppState>>,
  _actor: Actor,
) -> Result<Json<json::Value>> {
  let vendor_spend: Vec<VendorSpendRow> = app.sv().report.vendor_spend().await?;
  Ok(Json(json::json!({ "vendor_spend": vendor_spend })))
}

pub async fn audit_trail(
  State(app): State<Arc<AppState>>,
  _actor: Actor,
) -> Result<Json<json::Value>> {
  let audit_logs: Vec<AuditTrailRow> = app.sv().report.audit_trail().await?;
  Ok(Json(json::json!({ "audit_logs": audit_logs })))
}
