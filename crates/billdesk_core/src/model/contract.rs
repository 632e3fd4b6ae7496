//! Contract domain model.
//!
//! # Invariants
//! - `client_id` is a weak reference resolved through a lookup, never owned.
//! - `end_date` should not be earlier than `start_date`.

use crate::model::date::{serde_local, LocalTimestamp};
use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};

/// Agreement with a client, with a validity window and optional milestone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: String,
    pub client_id: String,
    pub contract_number: String,
    #[serde(with = "serde_local")]
    pub start_date: LocalTimestamp,
    #[serde(with = "serde_local")]
    pub end_date: LocalTimestamp,
    #[serde(default, with = "serde_local::option")]
    pub project_completion_date: Option<LocalTimestamp>,
}

impl Contract {
    pub fn new(
        id: impl Into<String>,
        client_id: impl Into<String>,
        contract_number: impl Into<String>,
        start_date: LocalTimestamp,
        end_date: LocalTimestamp,
    ) -> Self {
        Self {
            id: id.into(),
            client_id: client_id.into(),
            contract_number: contract_number.into(),
            start_date,
            end_date,
            project_completion_date: None,
        }
    }

    /// Sets the project completion milestone.
    pub fn completed_on(mut self, completion_date: LocalTimestamp) -> Self {
        self.project_completion_date = Some(completion_date);
        self
    }

    /// Validates id presence and the contract window.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if self.end_date < self.start_date {
            return Err(ValidationError::InvalidContractWindow {
                contract_id: self.id.clone(),
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }
}
