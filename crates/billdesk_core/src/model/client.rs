//! Client and payment domain model.
//!
//! # Responsibility
//! - Define the billable party and the payments it exclusively owns.
//! - Expose paid/unpaid predicates used by every aggregation path.
//!
//! # Invariants
//! - A payment is paid iff `paid_date` is present.
//! - `amount_paid`/`amount_due` are store-maintained caches and should equal
//!   the live sums of paid/unpaid payment amounts.
//! - `installment_number` is meaningful only for installment payments.

use crate::model::date::{serde_local, LocalTimestamp};
use crate::model::money::saturating_total;
use crate::model::validation::ValidationError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payment category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    /// Upfront or standing fee.
    Retainer,
    /// Numbered installment of a payment plan.
    Installment,
}

/// One charge owed by a client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    pub payment_type: PaymentType,
    pub amount: Decimal,
    #[serde(with = "serde_local")]
    pub due_date: LocalTimestamp,
    #[serde(default, with = "serde_local::option")]
    pub paid_date: Option<LocalTimestamp>,
    #[serde(default)]
    pub installment_number: Option<u32>,
}

impl Payment {
    /// Creates an unpaid installment.
    pub fn installment(
        id: impl Into<String>,
        amount: Decimal,
        due_date: LocalTimestamp,
        installment_number: u32,
    ) -> Self {
        Self {
            id: id.into(),
            payment_type: PaymentType::Installment,
            amount,
            due_date,
            paid_date: None,
            installment_number: Some(installment_number),
        }
    }

    /// Creates an unpaid retainer.
    pub fn retainer(id: impl Into<String>, amount: Decimal, due_date: LocalTimestamp) -> Self {
        Self {
            id: id.into(),
            payment_type: PaymentType::Retainer,
            amount,
            due_date,
            paid_date: None,
            installment_number: None,
        }
    }

    /// Returns a copy marked as paid on `paid_date`.
    pub fn paid_on(mut self, paid_date: LocalTimestamp) -> Self {
        self.paid_date = Some(paid_date);
        self
    }

    pub fn is_paid(&self) -> bool {
        self.paid_date.is_some()
    }

    pub fn is_retainer(&self) -> bool {
        self.payment_type == PaymentType::Retainer
    }

    /// Validates payment invariants.
    ///
    /// # Errors
    /// - `EmptyId` for a blank id.
    /// - `NegativeAmount` when `amount < 0`.
    /// - `RetainerWithInstallmentNumber` for a numbered retainer.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if self.amount < Decimal::ZERO {
            return Err(ValidationError::NegativeAmount {
                payment_id: self.id.clone(),
                amount: self.amount,
            });
        }
        if self.is_retainer() && self.installment_number.is_some() {
            return Err(ValidationError::RetainerWithInstallmentNumber {
                payment_id: self.id.clone(),
            });
        }
        Ok(())
    }
}

/// Billable party with its payment schedule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub payments: Vec<Payment>,
    /// Store-maintained cache of paid payment amounts.
    #[serde(default)]
    pub amount_paid: Decimal,
    /// Store-maintained cache of unpaid payment amounts.
    #[serde(default)]
    pub amount_due: Decimal,
}

impl Client {
    /// Creates a client with a generated stable id and no payments.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name)
    }

    /// Creates a client with a caller-provided id.
    ///
    /// Used by import paths where identity already exists in the store.
    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            payments: Vec::new(),
            amount_paid: Decimal::ZERO,
            amount_due: Decimal::ZERO,
        }
    }

    /// Appends payments and recomputes both cached aggregates from them.
    ///
    /// Store-side convenience for building consistent fixtures and imports;
    /// aggregation code never calls this.
    pub fn with_payments(mut self, payments: Vec<Payment>) -> Self {
        self.payments.extend(payments);
        self.amount_paid = self.live_amount_paid();
        self.amount_due = self.live_amount_due();
        self
    }

    /// Overrides cached aggregates without touching payments.
    pub fn with_cached_totals(mut self, amount_paid: Decimal, amount_due: Decimal) -> Self {
        self.amount_paid = amount_paid;
        self.amount_due = amount_due;
        self
    }

    pub fn unpaid_payments(&self) -> impl Iterator<Item = &Payment> {
        self.payments.iter().filter(|payment| !payment.is_paid())
    }

    pub fn paid_payments(&self) -> impl Iterator<Item = &Payment> {
        self.payments.iter().filter(|payment| payment.is_paid())
    }

    /// Sum of paid payment amounts computed from payment data.
    pub fn live_amount_paid(&self) -> Decimal {
        saturating_total(self.paid_payments().map(|payment| payment.amount))
    }

    /// Sum of unpaid payment amounts computed from payment data.
    pub fn live_amount_due(&self) -> Decimal {
        saturating_total(self.unpaid_payments().map(|payment| payment.amount))
    }

    /// Validates client id and every owned payment.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        self.payments.iter().try_for_each(Payment::validate)
    }
}
