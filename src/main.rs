//! SLM - software license and vendor contract management server
//!
//! Architecture:
//! - SeaORM for database access (SQLite)
//! - Axum for the JSON API with rate limiting
//! - Tokio interval loops for the daily renewal batch jobs
//! - Outbound mail handed to an HTTP relay, best-effort

mod auth;
mod entity;
mod error;
mod handlers;
mod jobs;
mod mailer;
mod migration;
mod prelude;
mod state;
mod sv;

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_governor::GovernorLayer;
use tower_governor::governor::GovernorConfigBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::prelude::*;
use crate::state::{AppState, Config};

#[tokio::main]
async fn main() {
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
      "slm=debug,tower_http=debug,sea_orm=warn".into()
    }))
    .with(tracing_subscriber::fmt::layer())
    .init();

  let db_url =
    env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:slm.db?mode=rwc".into());

  let config = Config {
    mail_relay_url: env::var("MAIL_RELAY_URL").ok(),
    mail_from: env::var("MAIL_FROM")
      .unwrap_or_else(|_| "slm@localhost".into()),
    job_interval_hours: env::var("JOB_INTERVAL_HOURS")
      .ok()
      .and_then(|v| v.parse().ok())
      .unwrap_or(24),
  };

  info!("Starting SLM server v{}", env!("CARGO_PKG_VERSION"));

  let app_state = Arc::new(AppState::new(&db_url, config).await);

  // Spawn the daily batch loop (renewal flagging, expiry, reminders)
  let jobs_app = app_state.clone();
  tokio::spawn(async move {
    let hours = jobs_app.config.job_interval_hours;
    let mut interval = tokio::time::interval(Duration::from_secs(hours * 3600));
    loop {
      interval.tick().await;
      jobs::run_all(&jobs_app.db, &jobs_app.mailer).await;
    }
  });

  // Rate limiting per client IP
  let governor_conf = Arc::new(
    GovernorConfigBuilder::default()
      .per_second(2)
      .burst_size(100)
      .finish()
      .expect("Failed to build rate limiter config"),
  );

  let governor_limiter = governor_conf.limiter().clone();
  tokio::spawn(async move {
    loop {
      tokio::time::sleep(Duration::from_secs(60)).await;
      governor_limiter.retain_recent();
    }
  });

  let app = Router::new()
    .route("/health", get(handlers::health))
    // assets
    .route("/api/assets", get(handlers::assets::list).post(handlers::assets::create))
    .route(
      "/api/assets/{id}",
      get(handlers::assets::get)
        .put(handlers::assets::update)
        .delete(handlers::assets::delete),
    )
    // contracts
    .route(
      "/api/contracts",
      get(handlers::contracts::list).post(handlers::contracts::create),
    )
    .route(
      "/api/contracts/{id}",
      get(handlers::contracts::get).put(handlers::contracts::update),
    )
    .route("/api/contracts/{id}/renew", post(handlers::contracts::renew))
    .route("/api/contracts/{id}/history", get(handlers::contracts::history))
    // allocations
    .route(
      "/api/allocations",
      get(handlers::allocations::list).post(handlers::allocations::create),
    )
    .route(
      "/api/allocations/{id}",
      get(handlers::allocations::get).delete(handlers::allocations::delete),
    )
    .route(
      "/api/allocations/{id}/return",
      post(handlers::allocations::return_seat),
    )
    // vendors
    .route(
      "/api/vendors",
      get(handlers::vendors::list).post(handlers::vendors::create),
    )
    .route(
      "/api/vendors/{id}",
      get(handlers::vendors::get).put(handlers::vendors::update),
    )
    // invoices and payments
    .route(
      "/api/invoices",
      get(handlers::invoices::list).post(handlers::invoices::create),
    )
    .route(
      "/api/invoices/{id}",
      get(handlers::invoices::get).put(handlers::invoices::update),
    )
    .route(
      "/api/invoices/{id}/payments",
      get(handlers::invoices::payments).post(handlers::invoices::add_payment),
    )
    // audit and notifications
    .route("/api/audit", get(handlers::audit::list))
    .route("/api/notifications", get(handlers::notifications::list))
    .route("/api/notifications/{id}", get(handlers::notifications::get))
    .route(
      "/api/notifications/mark-all-read",
      post(handlers::notifications::mark_all_read),
    )
    // dashboard and reports
    .route("/api/dashboard/stats", get(handlers::reports::stats))
    .route("/api/reports/inventory", get(handlers::reports::inventory))
    .route(
      "/api/reports/renewal-calendar",
      get(handlers::reports::renewal_calendar),
    )
    .route("/api/reports/vendor-spend", get(handlers::reports::vendor_spend))
    .route("/api/reports/audit-trail", get(handlers::reports::audit_trail))
    .layer(
      ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(GovernorLayer::new(governor_conf))
        .layer(
          CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        ),
    )
    .with_state(app_state)
    .into_make_service_with_connect_info::<SocketAddr>();

  let port: u16 = env::var("PORT")
    .ok()
    .and_then(|p| p.parse().ok())
    .unwrap_or(3000);
  let addr = SocketAddr::from(([0, 0, 0, 0], port));

  info!("HTTP server listening on {}", addr);

  let listener =
    tokio::net::TcpListener::bind(addr).await.expect("Failed to bind");
  axum::serve(listener, app).await.expect("Server error");
}
