//! Best-effort outbound mail via an HTTP relay
//!
//! The server never speaks SMTP itself; it hands messages to a relay
//! endpoint (e.g. an internal mail gateway) and forgets about them.
//! Delivery failure must never fail the operation that triggered the mail.

use serde::Serialize;

#[derive(Debug, Clone)]
pub struct Mailer {
  client: reqwest::Client,
  relay_url: Option<String>,
  from: String,
}

#[derive(Debug, Serialize)]
struct OutboundMail<'a> {
  from: &'a str,
  to: &'a [String],
  subject: &'a str,
  body: &'a str,
}

impl Mailer {
  pub fn new(relay_url: Option<String>, from: String) -> Self {
    Self { client: reqwest::Client::new(), relay_url, from }
  }

  /// Disabled mailer for tests and relay-less deployments.
  pub fn disabled() -> Self {
    Self::new(None, String::from("noreply@localhost"))
  }

  pub async fn send(
    &self,
    to: &[String],
    subject: &str,
    body: &str,
  ) -> anyhow::Result<()> {
    let Some(url) = &self.relay_url else {
      tracing::debug!("mail relay not configured, skipping '{subject}'");
      return Ok(());
    };

    if to.is_empty() {
      return Ok(());
    }

    let mail = OutboundMail { from: &self.from, to, subject, body };
    self
      .client
      .post(url)
      .json(&mail)
      .send()
      .await?
      .error_for_status()?;

    Ok(())
  }
}
