//! Request actor resolution and role gates
//!
//! Authentication itself lives in front of this service (gateway / SSO);
//! requests arrive with a trusted `x-user-id` header. The extractor loads
//! the user and the handlers gate writes on the role's capability record.
//! Auditors pass every read and fail every write.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::entity::user;
use crate::prelude::*;
use crate::state::AppState;

#[derive(Debug)]
pub struct Actor {
  pub user: user::Model,
  pub ip: Option<String>,
}

impl Actor {
  pub fn caps(&self) -> user::Capabilities {
    self.user.role.caps()
  }

  fn require(&self, allowed: bool) -> Result<()> {
    if self.caps().is_auditor || !allowed {
      return Err(Error::Forbidden);
    }
    Ok(())
  }

  /// Write gate for assets, contracts and allocations.
  pub fn require_edit_assets(&self) -> Result<()> {
    self.require(self.caps().can_edit_assets)
  }

  /// Write gate for vendors, invoices and payments.
  pub fn require_edit_finance(&self) -> Result<()> {
    self.require(self.caps().can_edit_finance)
  }

  /// Write gate for everything that is not asset- or finance-scoped.
  pub fn require_write(&self) -> Result<()> {
    self.require(true)
  }
}

impl FromRequestParts<Arc<AppState>> for Actor {
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &Arc<AppState>,
  ) -> Result<Self> {
    let id: i32 = parts
      .headers
      .get("x-user-id")
      .and_then(|v| v.to_str().ok())
      .and_then(|v| v.parse().ok())
      .ok_or(Error::Unauthorized)?;

    let user = user::Entity::find_by_id(id)
      .one(&state.db)
      .await?
      .filter(|u| u.is_active)
      .ok_or(Error::Unauthorized)?;

    let ip = parts
      .headers
      .get("x-forwarded-for")
      .and_then(|v| v.to_str().ok())
      .map(|v| v.split(',').next().unwrap_or(v).trim().to_string());

    Ok(Actor { user, ip })
  }
}

#[cfg(test)]
mod tests {
  use axum::http::Request;

  use super::*;
  use crate::entity::user::Role;
  use crate::mailer::Mailer;
  use crate::state::Config;
  use crate::sv::tests::setup_test_db;

  fn actor(role: Role) -> Actor {
    let now = Utc::now().naive_utc();
    Actor {
      user: user::Model {
        id: 1,
        email: "someone@example.com".into(),
        first_name: "Sam".into(),
        last_name: "Doe".into(),
        role,
        department_id: None,
        branch_id: None,
        phone: None,
        is_active: true,
        created_at: now,
        updated_at: now,
      },
      ip: None,
    }
  }

  #[test]
  fn auditor_fails_every_write() {
    let auditor = actor(Role::Auditor);
    assert!(auditor.require_edit_assets().is_err());
    assert!(auditor.require_edit_finance().is_err());
    assert!(auditor.require_write().is_err());
    assert!(auditor.caps().can_view_all);
  }

  #[test]
  fn capability_matrix() {
    assert!(actor(Role::ItStaff).require_edit_assets().is_ok());
    assert!(actor(Role::ItStaff).require_edit_finance().is_err());

    assert!(actor(Role::AccountsOfficer).require_edit_finance().is_ok());
    assert!(actor(Role::AccountsOfficer).require_edit_assets().is_err());

    assert!(actor(Role::SuperAdmin).require_edit_assets().is_ok());
    assert!(actor(Role::SuperAdmin).require_edit_finance().is_ok());

    assert!(actor(Role::DepartmentHead).caps().can_approve);
    assert!(!actor(Role::DepartmentHead).caps().can_edit_assets);
  }

  async fn test_state() -> Arc<AppState> {
    Arc::new(AppState {
      db: setup_test_db().await,
      mailer: Mailer::disabled(),
      config: Config::default(),
    })
  }

  fn parts(user_id: Option<&str>) -> Parts {
    let mut request = Request::builder().uri("/api/assets");
    if let Some(id) = user_id {
      request = request.header("x-user-id", id);
    }
    request.body(()).unwrap().into_parts().0
  }

  async fn seed_user(state: &AppState, active: bool) -> i32 {
    let now = Utc::now().naive_utc();
    user::ActiveModel {
      email: Set(format!("u-{active}@example.com")),
      first_name: Set("Kim".into()),
      last_name: Set("Ray".into()),
      role: Set(Role::ItStaff),
      department_id: Set(None),
      branch_id: Set(None),
      phone: Set(None),
      is_active: Set(active),
      created_at: Set(now),
      updated_at: Set(now),
      ..Default::default()
    }
    .insert(&state.db)
    .await
    .unwrap()
    .id
  }

  #[tokio::test]
  async fn rejects_requests_without_a_valid_actor() {
    let state = test_state().await;

    // no header, garbled header, unknown id
    for header in [None, Some("not-a-number"), Some("42")] {
      let mut parts = parts(header);
      let err = Actor::from_request_parts(&mut parts, &state).await.unwrap_err();
      assert!(matches!(err, Error::Unauthorized));
    }
  }

  #[tokio::test]
  async fn rejects_inactive_users() {
    let state = test_state().await;

    let inactive = seed_user(&state, false).await;
    let mut inactive_parts = parts(Some(&inactive.to_string()));
    let err =
      Actor::from_request_parts(&mut inactive_parts, &state).await.unwrap_err();
    assert!(matches!(err, Error::Unauthorized));

    let active = seed_user(&state, true).await;
    let mut parts = parts(Some(&active.to_string()));
    let actor = Actor::from_request_parts(&mut parts, &state).await.unwrap();
    assert_eq!(actor.user.id, active);
  }
}
