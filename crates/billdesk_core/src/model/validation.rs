//! Entity validation errors.

use crate::model::date::LocalTimestamp;
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failure raised by entity `validate()` helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Entity id is empty or whitespace.
    EmptyId,
    /// Payment amount is below zero.
    NegativeAmount { payment_id: String, amount: Decimal },
    /// `installment_number` set on a retainer payment.
    RetainerWithInstallmentNumber { payment_id: String },
    /// Contract ends before it starts.
    InvalidContractWindow {
        contract_id: String,
        start: LocalTimestamp,
        end: LocalTimestamp,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "entity id must not be empty"),
            Self::NegativeAmount { payment_id, amount } => {
                write!(f, "payment {payment_id} has negative amount {amount}")
            }
            Self::RetainerWithInstallmentNumber { payment_id } => write!(
                f,
                "payment {payment_id} is a retainer but carries an installment number"
            ),
            Self::InvalidContractWindow {
                contract_id,
                start,
                end,
            } => write!(
                f,
                "contract {contract_id}: end_date ({end}) must be >= start_date ({start})"
            ),
        }
    }
}

impl Error for ValidationError {}
