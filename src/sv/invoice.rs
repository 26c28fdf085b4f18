//! Invoices and payments. The stored invoice total is derived state:
//! `before_save` on the entity recomputes it from subtotal + tax on every
//! write, so a client-supplied total is never trusted.

use serde::Deserialize;

use crate::entity::{
  invoice::{self, Currency},
  payment::{self, PaymentMode},
};
use crate::prelude::*;

#[derive(Debug, Deserialize)]
pub struct NewInvoice {
  pub invoice_number: String,
  pub invoice_date: NaiveDate,
  pub vendor_id: Option<i32>,
  pub contract_id: Option<i32>,
  #[serde(default)]
  pub subtotal: Decimal,
  #[serde(default)]
  pub tax: Decimal,
  #[serde(default)]
  pub currency: Currency,
  pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InvoicePatch {
  pub invoice_number: Option<String>,
  pub invoice_date: Option<NaiveDate>,
  pub vendor_id: Option<i32>,
  pub contract_id: Option<i32>,
  pub subtotal: Option<Decimal>,
  pub tax: Option<Decimal>,
  pub currency: Option<Currency>,
  pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InvoiceFilter {
  pub vendor_id: Option<i32>,
  pub currency: Option<Currency>,
}

#[derive(Debug, Deserialize)]
pub struct NewPayment {
  pub payment_mode: PaymentMode,
  pub transaction_reference: Option<String>,
  pub bank_name: Option<String>,
  pub amount: Decimal,
  pub paid_on: NaiveDate,
  pub notes: Option<String>,
}

pub struct Invoice<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Invoice<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn create(
    &self,
    new: NewInvoice,
    created_by: Option<i32>,
  ) -> Result<invoice::Model> {
    if new.invoice_number.trim().is_empty() {
      return Err(Error::validation("invoice_number required"));
    }

    let now = Utc::now().naive_utc();
    let invoice = invoice::ActiveModel {
      invoice_number: Set(new.invoice_number),
      invoice_date: Set(new.invoice_date),
      vendor_id: Set(new.vendor_id),
      contract_id: Set(new.contract_id),
      subtotal: Set(new.subtotal),
      tax: Set(new.tax),
      currency: Set(new.currency),
      // placeholder, recomputed in before_save
      total: Set(Decimal::ZERO),
      notes: Set(new.notes),
      created_by: Set(created_by),
      created_at: Set(now),
      updated_at: Set(now),
      ..Default::default()
    };

    Ok(invoice.insert(self.db).await?)
  }

  pub async fn by_id(&self, id: i32) -> Result<invoice::Model> {
    invoice::Entity::find_by_id(id)
      .one(self.db)
      .await?
      .ok_or(Error::NotFound("Invoice"))
  }

  pub async fn list(&self, filter: InvoiceFilter) -> Result<Vec<invoice::Model>> {
    let mut query = invoice::Entity::find();

    if let Some(vendor_id) = filter.vendor_id {
      query = query.filter(invoice::Column::VendorId.eq(vendor_id));
    }
    if let Some(currency) = filter.currency {
      query = query.filter(invoice::Column::Currency.eq(currency));
    }

    Ok(query.order_by_desc(invoice::Column::InvoiceDate).all(self.db).await?)
  }

  pub async fn update(
    &self,
    id: i32,
    patch: InvoicePatch,
  ) -> Result<invoice::Model> {
    let invoice = self.by_id(id).await?;

    // both amounts are re-Set so before_save always recomputes the total
    let subtotal = patch.subtotal.unwrap_or(invoice.subtotal);
    let tax = patch.tax.unwrap_or(invoice.tax);

    let mut active: invoice::ActiveModel = invoice.into();
    active.subtotal = Set(subtotal);
    active.tax = Set(tax);
    if let Some(invoice_number) = patch.invoice_number {
      active.invoice_number = Set(invoice_number);
    }
    if let Some(invoice_date) = patch.invoice_date {
      active.invoice_date = Set(invoice_date);
    }
    if let Some(vendor_id) = patch.vendor_id {
      active.vendor_id = Set(Some(vendor_id));
    }
    if let Some(contract_id) = patch.contract_id {
      active.contract_id = Set(Some(contract_id));
    }
    if let Some(currency) = patch.currency {
      active.currency = Set(currency);
    }
    if let Some(notes) = patch.notes {
      active.notes = Set(Some(notes));
    }
    active.updated_at = Set(Utc::now().naive_utc());

    Ok(active.update(self.db).await?)
  }

  pub async fn add_payment(
    &self,
    invoice_id: i32,
    new: NewPayment,
    created_by: Option<i32>,
  ) -> Result<payment::Model> {
    let invoice = self.by_id(invoice_id).await?;

    let payment = payment::ActiveModel {
      invoice_id: Set(invoice.id),
      payment_mode: Set(new.payment_mode),
      transaction_reference: Set(new.transaction_reference),
      bank_name: Set(new.bank_name),
      amount: Set(new.amount),
      paid_on: Set(new.paid_on),
      notes: Set(new.notes),
      created_by: Set(created_by),
      created_at: Set(Utc::now().naive_utc()),
      ..Default::default()
    };

    Ok(payment.insert(self.db).await?)
  }

  pub async fn payments(&self, invoice_id: i32) -> Result<Vec<payment::Model>> {
    Ok(
      payment::Entity::find()
        .filter(payment::Column::InvoiceId.eq(invoice_id))
        .order_by_desc(payment::Column::PaidOn)
        .all(self.db)
        .await?,
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::tests::setup_test_db;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[tokio::test]
  async fn total_is_always_subtotal_plus_tax() {
    let db = setup_test_db().await;
    let sv = Invoice::new(&db);

    let invoice = sv
      .create(
        NewInvoice {
          invoice_number: "INV-001".into(),
          invoice_date: date(2026, 3, 1),
          vendor_id: None,
          contract_id: None,
          subtotal: Decimal::new(10000, 2),
          tax: Decimal::new(1800, 2),
          currency: Currency::Usd,
          notes: None,
        },
        None,
      )
      .await
      .unwrap();

    assert_eq!(invoice.total, Decimal::new(11800, 2));

    let updated = sv
      .update(
        invoice.id,
        InvoicePatch { tax: Some(Decimal::ZERO), ..Default::default() },
      )
      .await
      .unwrap();
    assert_eq!(updated.total, Decimal::new(10000, 2));
  }

  #[tokio::test]
  async fn supplied_total_is_ignored() {
    let db = setup_test_db().await;

    let now = Utc::now().naive_utc();
    let invoice = invoice::ActiveModel {
      invoice_number: Set("INV-002".into()),
      invoice_date: Set(date(2026, 3, 1)),
      vendor_id: Set(None),
      contract_id: Set(None),
      subtotal: Set(Decimal::from(50)),
      tax: Set(Decimal::from(5)),
      currency: Set(Currency::Eur),
      // deliberately wrong
      total: Set(Decimal::from(999)),
      notes: Set(None),
      created_by: Set(None),
      created_at: Set(now),
      updated_at: Set(now),
      ..Default::default()
    }
    .insert(&db)
    .await
    .unwrap();

    assert_eq!(invoice.total, Decimal::from(55));
  }

  #[tokio::test]
  async fn payments_belong_to_invoice() {
    let db = setup_test_db().await;
    let sv = Invoice::new(&db);

    let invoice = sv
      .create(
        NewInvoice {
          invoice_number: "INV-003".into(),
          invoice_date: date(2026, 4, 1),
          vendor_id: None,
          contract_id: None,
          subtotal: Decimal::from(120),
          tax: Decimal::ZERO,
          currency: Currency::Usd,
          notes: None,
        },
        None,
      )
      .await
      .unwrap();

    sv.add_payment(
      invoice.id,
      NewPayment {
        payment_mode: PaymentMode::BankTransfer,
        transaction_reference: Some("TX-42".into()),
        bank_name: None,
        amount: Decimal::from(120),
        paid_on: date(2026, 4, 10),
        notes: None,
      },
      None,
    )
    .await
    .unwrap();

    let payments = sv.payments(invoice.id).await.unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].amount, Decimal::from(120));
  }
}
