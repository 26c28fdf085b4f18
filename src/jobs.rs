//! Periodic batch procedures for renewal bookkeeping and reminders.
//!
//! The two status-transition jobs are bulk filter+update statements and can
//! run any number of times a day without changing the outcome. The reminder
//! job has no dedup key: a second run on the same day creates a second set
//! of notifications. That matches the historical behavior and is deliberate
//! until a dedup scheme is decided.

use sea_orm::sea_query::Expr;

use crate::entity::{
  asset,
  contract::{self, ContractStatus},
  reminder_schedule,
  user::{self, Role},
};
use crate::mailer::Mailer;
use crate::prelude::*;
use crate::sv;

/// active contracts whose renewal_due_date falls within the next 30 days
/// (inclusive, not past) become pending_renewal.
pub async fn check_renewals_due(db: &DatabaseConnection) -> Result<u64> {
  let today = today();
  let due_soon = today + Days::new(30);

  let result = contract::Entity::update_many()
    .col_expr(
      contract::Column::Status,
      Expr::value(ContractStatus::PendingRenewal),
    )
    .filter(contract::Column::Status.eq(ContractStatus::Active))
    .filter(contract::Column::RenewalDueDate.between(today, due_soon))
    .exec(db)
    .await?;

  Ok(result.rows_affected)
}

/// active or pending_renewal contracts past their expiry date become expired.
pub async fn update_expired_contracts(db: &DatabaseConnection) -> Result<u64> {
  let today = today();

  let result = contract::Entity::update_many()
    .col_expr(contract::Column::Status, Expr::value(ContractStatus::Expired))
    .filter(
      contract::Column::Status
        .is_in([ContractStatus::Active, ContractStatus::PendingRenewal]),
    )
    .filter(contract::Column::ExpiryDate.lt(today))
    .exec(db)
    .await?;

  Ok(result.rows_affected)
}

/// For each active reminder schedule, finds active contracts whose
/// renewal_due_date is exactly `today + days_before_due`, creates one in-app
/// notification per manager and sends one batched mail per contract.
/// Mail delivery is best-effort; returns the number of notifications created.
pub async fn send_renewal_reminders(
  db: &DatabaseConnection,
  mailer: &Mailer,
) -> Result<u64> {
  let today = today();

  let schedules = reminder_schedule::Entity::find()
    .filter(reminder_schedule::Column::IsActive.eq(true))
    .all(db)
    .await?;

  let managers = user::Entity::find()
    .filter(user::Column::Role.is_in(Role::MANAGERS))
    .filter(user::Column::IsActive.eq(true))
    .all(db)
    .await?;

  let notifications = sv::Notification::new(db);
  let mut created = 0u64;

  for schedule in schedules {
    let target_date = today + Days::new(schedule.days_before_due.max(0) as u64);

    let contracts = contract::Entity::find()
      .filter(contract::Column::Status.eq(ContractStatus::Active))
      .filter(contract::Column::RenewalDueDate.eq(target_date))
      .find_also_related(asset::Entity)
      .all(db)
      .await?;

    for (contract, asset) in contracts {
      let asset_name = asset.map(|a| a.name).unwrap_or_default();
      let title = format!("Renewal due: {asset_name}");
      let message = format!(
        "License for {asset_name} is due for renewal on {}.",
        target_date
      );

      for manager in &managers {
        notifications
          .create(sv::notification::NewNotification {
            user_id: manager.id,
            title: title.clone(),
            message: message.clone(),
            link: Some(format!("/contracts/?id={}", contract.id)),
            notification_type: Some(String::from("renewal_due")),
          })
          .await?;
        created += 1;
      }

      let recipients: Vec<String> =
        managers.iter().map(|m| m.email.clone()).collect();
      if let Err(err) =
        mailer.send(&recipients, &format!("[SLM] {title}"), &message).await
      {
        warn!("renewal reminder mail failed: {err}");
      }
    }
  }

  Ok(created)
}

/// Daily driver invoked from the interval loop in `main`.
pub async fn run_all(db: &DatabaseConnection, mailer: &Mailer) {
  match check_renewals_due(db).await {
    Ok(n) => info!("check_renewals_due: {n} contracts flagged"),
    Err(err) => error!("check_renewals_due failed: {err}"),
  }
  match update_expired_contracts(db).await {
    Ok(n) => info!("update_expired_contracts: {n} contracts expired"),
    Err(err) => error!("update_expired_contracts failed: {err}"),
  }
  match send_renewal_reminders(db, mailer).await {
    Ok(n) => info!("send_renewal_reminders: {n} notifications created"),
    Err(err) => error!("send_renewal_reminders failed: {err}"),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::{self, tests::setup_test_db};

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  async fn seed_contract(
    db: &DatabaseConnection,
    expiry: NaiveDate,
    renewal_due: NaiveDate,
  ) -> contract::Model {
    let asset = sv::Asset::new(db)
      .create(
        sv::asset::NewAsset {
          name: "Monitoring".into(),
          total_licenses: 1,
          ..Default::default()
        },
        None,
      )
      .await
      .unwrap();

    sv::Contract::new(db)
      .create(sv::contract::NewContract {
        software_asset_id: asset.id,
        vendor_id: None,
        purchase_date: date(2025, 1, 1),
        duration_months: 12,
        expiry_date: Some(expiry),
        renewal_due_date: Some(renewal_due),
        support_level: Default::default(),
        notes: None,
      })
      .await
      .unwrap()
  }

  async fn seed_manager(db: &DatabaseConnection, email: &str, role: Role) -> i32 {
    let now = Utc::now().naive_utc();
    user::ActiveModel {
      email: Set(email.into()),
      first_name: Set("Pat".into()),
      last_name: Set("Lee".into()),
      role: Set(role),
      department_id: Set(None),
      branch_id: Set(None),
      phone: Set(None),
      is_active: Set(true),
      created_at: Set(now),
      updated_at: Set(now),
      ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
  }

  async fn seed_schedule(db: &DatabaseConnection, days: i32, active: bool) {
    reminder_schedule::ActiveModel {
      name: Set(format!("{days} days before")),
      days_before_due: Set(days),
      is_active: Set(active),
      created_at: Set(Utc::now().naive_utc()),
      ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
  }

  #[tokio::test]
  async fn flags_contracts_due_within_window() {
    let db = setup_test_db().await;
    let today = today();

    let due = seed_contract(&db, today + Days::new(40), today + Days::new(10)).await;
    let far =
      seed_contract(&db, today + Days::new(200), today + Days::new(170)).await;
    let past = seed_contract(&db, today + Days::new(5), today - Days::new(3)).await;

    assert_eq!(check_renewals_due(&db).await.unwrap(), 1);

    let sv = sv::Contract::new(&db);
    assert_eq!(
      sv.by_id(due.id).await.unwrap().status,
      ContractStatus::PendingRenewal
    );
    assert_eq!(sv.by_id(far.id).await.unwrap().status, ContractStatus::Active);
    // already-past due dates are not flagged
    assert_eq!(sv.by_id(past.id).await.unwrap().status, ContractStatus::Active);
  }

  #[tokio::test]
  async fn renewal_check_is_idempotent() {
    let db = setup_test_db().await;
    let today = today();

    seed_contract(&db, today + Days::new(40), today + Days::new(10)).await;

    assert_eq!(check_renewals_due(&db).await.unwrap(), 1);
    // second run finds nothing left to flag
    assert_eq!(check_renewals_due(&db).await.unwrap(), 0);
  }

  #[tokio::test]
  async fn expires_past_contracts() {
    let db = setup_test_db().await;
    let today = today();

    let gone = seed_contract(&db, today - Days::new(1), today - Days::new(31)).await;
    let pending =
      seed_contract(&db, today - Days::new(2), today - Days::new(32)).await;
    sv::Contract::new(&db)
      .update(
        pending.id,
        sv::contract::ContractPatch {
          status: Some(ContractStatus::PendingRenewal),
          ..Default::default()
        },
      )
      .await
      .unwrap();
    let cancelled =
      seed_contract(&db, today - Days::new(3), today - Days::new(33)).await;
    sv::Contract::new(&db)
      .update(
        cancelled.id,
        sv::contract::ContractPatch {
          status: Some(ContractStatus::Cancelled),
          ..Default::default()
        },
      )
      .await
      .unwrap();

    assert_eq!(update_expired_contracts(&db).await.unwrap(), 2);

    let sv = sv::Contract::new(&db);
    assert_eq!(sv.by_id(gone.id).await.unwrap().status, ContractStatus::Expired);
    assert_eq!(
      sv.by_id(pending.id).await.unwrap().status,
      ContractStatus::Expired
    );
    // cancelled is terminal for batch logic
    assert_eq!(
      sv.by_id(cancelled.id).await.unwrap().status,
      ContractStatus::Cancelled
    );
  }

  #[tokio::test]
  async fn reminders_fan_out_to_managers() {
    let db = setup_test_db().await;
    let today = today();

    seed_schedule(&db, 30, true).await;
    seed_schedule(&db, 7, false).await;

    let it = seed_manager(&db, "it@example.com", Role::ItManager).await;
    let fin = seed_manager(&db, "fin@example.com", Role::FinanceManager).await;
    // staff are not notified
    seed_manager(&db, "staff@example.com", Role::ItStaff).await;

    seed_contract(&db, today + Days::new(60), today + Days::new(30)).await;
    // off-target due date, exact-day match only
    seed_contract(&db, today + Days::new(61), today + Days::new(31)).await;

    let mailer = Mailer::disabled();
    let created = send_renewal_reminders(&db, &mailer).await.unwrap();
    assert_eq!(created, 2);

    let sv = sv::Notification::new(&db);
    assert_eq!(sv.for_user(it).await.unwrap().len(), 1);
    assert_eq!(sv.for_user(fin).await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn reminder_job_duplicates_on_rerun() {
    let db = setup_test_db().await;
    let today = today();

    seed_schedule(&db, 30, true).await;
    let manager = seed_manager(&db, "mgr@example.com", Role::SuperAdmin).await;
    seed_contract(&db, today + Days::new(60), today + Days::new(30)).await;

    let mailer = Mailer::disabled();
    assert_eq!(send_renewal_reminders(&db, &mailer).await.unwrap(), 1);
    assert_eq!(send_renewal_reminders(&db, &mailer).await.unwrap(), 1);

    // known gap: no dedup key, same-day reruns duplicate
    let inbox = sv::Notification::new(&db).for_user(manager).await.unwrap();
    assert_eq!(inbox.len(), 2);
  }
}
