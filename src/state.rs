use crate::{mailer::Mailer, migration::Migrator, prelude::*, sv};

#[derive(Debug, Clone)]
pub struct Config {
  pub mail_relay_url: Option<String>,
  pub mail_from: String,
  pub job_interval_hours: u64,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      mail_relay_url: None,
      mail_from: String::from("slm@localhost"),

      job_interval_hours: 24,
    }
  }
}

pub struct Services<'a> {
  pub asset: sv::Asset<'a>,
  pub contract: sv::Contract<'a>,
  pub allocation: sv::Allocation<'a>,
  pub vendor: sv::Vendor<'a>,
  pub invoice: sv::Invoice<'a>,
  pub audit: sv::Audit<'a>,
  pub notification: sv::Notification<'a>,
  pub report: sv::Report<'a>,
}

pub struct AppState {
  pub db: DatabaseConnection,
  pub mailer: Mailer,
  pub config: Config,
}

impl AppState {
  pub async fn new(db_url: &str, config: Config) -> Self {
    info!("Connecting to database...");
    let db =
      Database::connect(db_url).await.expect("Failed to connect to database");

    info!("Running migrations...");
    Migrator::up(&db, None).await.expect("Failed to run migrations");

    let mailer =
      Mailer::new(config.mail_relay_url.clone(), config.mail_from.clone());

    Self { db, mailer, config }
  }

  pub fn sv(&self) -> Services<'_> {
    Services {
      asset: sv::Asset::new(&self.db),
      contract: sv::Contract::new(&self.db),
      allocation: sv::Allocation::new(&self.db),
      vendor: sv::Vendor::new(&self.db),
      invoice: sv::Invoice::new(&self.db),
      audit: sv::Audit::new(&self.db),
      notification: sv::Notification::new(&self.db),
      report: sv::Report::new(&self.db),
    }
  }
}
