//! Calendar event projection.
//!
//! # Responsibility
//! - Define the derived, read-only event shape consumed by calendar views.
//!
//! # Invariants
//! - `date` is always normalized to local midnight.
//! - Payment events carry payment details; contract events carry contract
//!   details. The kind and the details variant always agree.
//! - Events are never stored; they are rebuilt from each snapshot.

use crate::model::date::{serde_local, LocalTimestamp};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Event category shown on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalendarEventKind {
    /// Unpaid payment falling due.
    Payment,
    ContractStart,
    ContractExpiration,
    ProjectCompletion,
}

impl CalendarEventKind {
    /// Stable string id, also used as the event id prefix for contract events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::ContractStart => "contract-start",
            Self::ContractExpiration => "contract-expiration",
            Self::ProjectCompletion => "project-completion",
        }
    }
}

/// Kind-specific event payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventDetails {
    #[serde(rename_all = "camelCase")]
    Payment {
        payment_id: String,
        amount: Decimal,
    },
    #[serde(rename_all = "camelCase")]
    Contract {
        contract_id: String,
        contract_number: String,
    },
}

/// One dated entry in the calendar feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    pub kind: CalendarEventKind,
    #[serde(with = "serde_local")]
    pub date: LocalTimestamp,
    pub client_name: String,
    pub client_id: String,
    #[serde(flatten)]
    pub details: EventDetails,
}

impl CalendarEvent {
    /// Calendar day of this event.
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }

    /// Payment amount; `None` for contract events.
    pub fn amount(&self) -> Option<Decimal> {
        match &self.details {
            EventDetails::Payment { amount, .. } => Some(*amount),
            EventDetails::Contract { .. } => None,
        }
    }

    pub fn payment_id(&self) -> Option<&str> {
        match &self.details {
            EventDetails::Payment { payment_id, .. } => Some(payment_id.as_str()),
            EventDetails::Contract { .. } => None,
        }
    }

    pub fn contract_id(&self) -> Option<&str> {
        match &self.details {
            EventDetails::Contract { contract_id, .. } => Some(contract_id.as_str()),
            EventDetails::Payment { .. } => None,
        }
    }

    pub fn contract_number(&self) -> Option<&str> {
        match &self.details {
            EventDetails::Contract {
                contract_number, ..
            } => Some(contract_number.as_str()),
            EventDetails::Payment { .. } => None,
        }
    }
}

/// Builds the id of a contract-derived event: `<kind>-<contract_id>`.
pub fn contract_event_id(kind: CalendarEventKind, contract_id: &str) -> String {
    format!("{}-{contract_id}", kind.as_str())
}
