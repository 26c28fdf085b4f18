pub use chrono::{Days, Months, NaiveDate, NaiveDateTime as DateTime, Utc};
pub use rust_decimal::Decimal;
pub use sea_orm::{
  ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
  Database, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
  QueryOrder, QuerySelect, Set, TransactionTrait,
};
pub use sea_orm_migration::MigratorTrait;
pub use tracing::{debug, error, info, warn};

pub use crate::error::{Error, Result};

pub fn today() -> NaiveDate {
  Utc::now().date_naive()
}
