use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};

use crate::auth::Actor;
use crate::entity::{audit_log::ChangeType, invoice, payment};
use crate::prelude::*;
use crate::state::AppState;
use crate::sv::audit::Change;
use crate::sv::invoice::{InvoiceFilter, InvoicePatch, NewInvoice, NewPayment};

pub async fn list(
  State(app): State<Arc<AppState>>,
  _actor: Actor,
  Query(filter): Query<InvoiceFilter>,
) -> Result<Json<Vec<invoice::Model>>> {
  Ok(Json(app.sv().invoice.list(filter).await?))
}

pub async fn get(
  State(app): State<Arc<AppState>>,
  _actor: Actor,
  Path(id): Path<i32>,
) -> Result<Json<invoice::Model>> {
  Ok(Json(app.sv().invoice.by_id(id).await?))
}

pub async fn create(
  State(app): State<Arc<AppState>>,
  actor: Actor,
  Json(new): Json<NewInvoice>,
) -> Result<Json<invoice::Model>> {
  actor.require_edit_finance()?;

  let sv = app.sv();
  let invoice = sv.invoice.create(new, Some(actor.user.id)).await?;

  sv.audit
    .record(Change {
      entity: "Invoice",
      object_id: Some(invoice.id),
      change_type: ChangeType::Create,
      old_value: None,
      new_value: json::to_value(&invoice).ok(),
      user_id: Some(actor.user.id),
      ip_address: actor.ip,
    })
    .await?;

  Ok(Json(invoice))
}

pub async fn update(
  State(app): State<Arc<AppState>>,
  actor: Actor,
  Path(id): Path<i32>,
  Json(patch): Json<InvoicePatch>,
) -> Result<Json<invoice::Model>> {
  actor.require_edit_finance()?;

  let sv = app.sv();
  let old = sv.invoice.by_id(id).await?;
  let invoice = sv.invoice.update(id, patch).await?;

  sv.audit
    .record(Change {
      entity: "Invoice",
      object_id: Some(invoice.id),
      change_type: ChangeType::Update,
      old_value: json::to_value(&old).ok(),
      new_value: json::to_value(&invoice).ok(),
      user_id: Some(actor.user.id),
      ip_address: actor.ip,
    })
    .await?;

  Ok(Json(invoice))
}

pub async fn payments(
  State(app): State<Arc<AppState>>,
  _actor: Actor,
  Path(id): Path<i32>,
) -> Result<Json<Vec<payment::Model>>> {
  app.sv().invoice.by_id(id).await?;
  Ok(Json(app.sv().invoice.payments(id).await?))
}

pub async fn add_payment(
  State(app): State<Arc<AppState>>,
  actor: Actor,
  Path(id): Path<i32>,
  Json(new): Json<NewPayment>,
) -> Result<Json<payment::Model>> {
  actor.require_edit_finance()?;

  let sv = app.sv();
  let payment = sv.invoice.add_payment(id, new, Some(actor.user.id)).await?;

  sv.audit
    .record(Change {
      entity: "Payment",
      object_id: Some(payment.id),
      change_type: ChangeType::Create,
      old_value: None,
      new_value: json::to_value(&payment).ok(),
      user_id: Some(actor.user.id),
      ip_address: actor.ip,
    })
    .await?;

  Ok(Json(payment))
}
