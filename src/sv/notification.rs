use crate::entity::notification;
use crate::prelude::*;

pub struct NewNotification {
  pub user_id: i32,
  pub title: String,
  pub message: String,
  pub link: Option<String>,
  pub notification_type: Option<String>,
}

pub struct Notification<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Notification<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn create(&self, new: NewNotification) -> Result<notification::Model> {
    let notification = notification::ActiveModel {
      user_id: Set(new.user_id),
      title: Set(new.title),
      message: Set(new.message),
      link: Set(new.link),
      is_read: Set(false),
      notification_type: Set(new.notification_type),
      created_at: Set(Utc::now().naive_utc()),
      ..Default::default()
    };

    Ok(notification.insert(self.db).await?)
  }

  pub async fn for_user(&self, user_id: i32) -> Result<Vec<notification::Model>> {
    Ok(
      notification::Entity::find()
        .filter(notification::Column::UserId.eq(user_id))
        .order_by_desc(notification::Column::CreatedAt)
        .order_by_desc(notification::Column::Id)
        .all(self.db)
        .await?,
    )
  }

  /// Fetching a notification marks it read.
  pub async fn read(&self, id: i32, user_id: i32) -> Result<notification::Model> {
    let notification = notification::Entity::find_by_id(id)
      .filter(notification::Column::UserId.eq(user_id))
      .one(self.db)
      .await?
      .ok_or(Error::NotFound("Notification"))?;

    if notification.is_read {
      return Ok(notification);
    }

    Ok(
      notification::ActiveModel { is_read: Set(true), ..notification.into() }
        .update(self.db)
        .await?,
    )
  }

  pub async fn mark_all_read(&self, user_id: i32) -> Result<u64> {
    let result = notification::Entity::update_many()
      .col_expr(notification::Column::IsRead, sea_orm::sea_query::Expr::value(true))
      .filter(notification::Column::UserId.eq(user_id))
      .filter(notification::Column::IsRead.eq(false))
      .exec(self.db)
      .await?;

    Ok(result.rows_affected)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::tests::setup_test_db;

  async fn seed_user(db: &DatabaseConnection) -> i32 {
    let now = Utc::now().naive_utc();
    crate::entity::user::ActiveModel {
      email: Set("manager@example.com".into()),
      first_name: Set("Max".into()),
      last_name: Set("Mann".into()),
      role: Set(crate::entity::user::Role::ItManager),
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

  #[tokio::test]
  async fn read_marks_notification() {
    let db = setup_test_db().await;
    let user_id = seed_user(&db).await;
    let sv = Notification::new(&db);

    let n = sv
      .create(NewNotification {
        user_id,
        title: "Renewal due".into(),
        message: "Contract expiring".into(),
        link: None,
        notification_type: Some("renewal_due".into()),
      })
      .await
      .unwrap();
    assert!(!n.is_read);

    let read = sv.read(n.id, user_id).await.unwrap();
    assert!(read.is_read);

    // a foreign user cannot touch it
    assert!(matches!(sv.read(n.id, user_id + 1).await, Err(Error::NotFound(_))));
  }

  #[tokio::test]
  async fn mark_all_read_is_scoped_to_user() {
    let db = setup_test_db().await;
    let user_id = seed_user(&db).await;
    let sv = Notification::new(&db);

    for i in 0..3 {
      sv.create(NewNotification {
        user_id,
        title: format!("n{i}"),
        message: String::new(),
        link: None,
        notification_type: None,
      })
      .await
      .unwrap();
    }

    assert_eq!(sv.mark_all_read(user_id).await.unwrap(), 3);
    assert_eq!(sv.mark_all_read(user_id).await.unwrap(), 0);
  }
}
