//! Error types for the SLM server

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("Database error: {0}")]
  Database(#[from] sea_orm::DbErr),

  #[error("{0} not found")]
  NotFound(&'static str),

  #[error("{0}")]
  Validation(String),

  #[error("No available licenses. Over-allocation not allowed.")]
  OverAllocation,

  #[error("Authentication required")]
  Unauthorized,

  #[error("Insufficient permissions")]
  Forbidden,
}

impl Error {
  pub fn validation(message: impl Into<String>) -> Self {
    Self::Validation(message.into())
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      Error::Database(err) => {
        tracing::error!("database error: {err}");
        (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
      }
      Error::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
      Error::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
      Error::OverAllocation => (StatusCode::BAD_REQUEST, self.to_string()),
      Error::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
      Error::Forbidden => (StatusCode::FORBIDDEN, self.to_string()),
    };

    let body = json::json!({
      "success": false,
      "error": message
    });

    (status, axum::Json(body)).into_response()
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
