//! Axum handlers, one module per resource. Routing lives in `main`.

pub mod allocations;
pub mod assets;
pub mod audit;
pub mod contracts;
pub mod invoices;
pub mod notifications;
pub mod reports;
pub mod vendors;

pub async fn health() -> &'static str {
  "OK"
}
