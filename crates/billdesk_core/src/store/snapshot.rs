//! In-memory entity snapshot.

use crate::model::client::Client;
use crate::model::contract::Contract;
use crate::model::validation::ValidationError;
use crate::store::{content_fingerprint, ClientLookup, EntityStore};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Snapshot construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    DuplicateClientId(String),
    Validation(ValidationError),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateClientId(id) => write!(f, "duplicate client id in snapshot: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::DuplicateClientId(_) => None,
        }
    }
}

impl From<ValidationError> for SnapshotError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Wire shape of a snapshot: `{"clients": [...], "contracts": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotData {
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub contracts: Vec<Contract>,
}

/// Immutable entity collections with an id index for client lookup.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    clients: Vec<Client>,
    contracts: Vec<Contract>,
    client_index: HashMap<String, usize>,
}

impl Snapshot {
    /// Builds a snapshot, rejecting duplicate client ids.
    ///
    /// Entity invariants are not checked; see [`Snapshot::try_new_validated`].
    pub fn try_new(clients: Vec<Client>, contracts: Vec<Contract>) -> Result<Self, SnapshotError> {
        let mut client_index = HashMap::with_capacity(clients.len());
        for (position, client) in clients.iter().enumerate() {
            if client_index.insert(client.id.clone(), position).is_some() {
                return Err(SnapshotError::DuplicateClientId(client.id.clone()));
            }
        }

        Ok(Self {
            clients,
            contracts,
            client_index,
        })
    }

    /// Like [`Snapshot::try_new`], also running every entity `validate()`.
    pub fn try_new_validated(
        clients: Vec<Client>,
        contracts: Vec<Contract>,
    ) -> Result<Self, SnapshotError> {
        clients.iter().try_for_each(Client::validate)?;
        contracts.iter().try_for_each(Contract::validate)?;
        Self::try_new(clients, contracts)
    }

    pub fn len_clients(&self) -> usize {
        self.clients.len()
    }

    pub fn len_contracts(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty() && self.contracts.is_empty()
    }

    /// Consumes the snapshot back into its wire shape.
    pub fn into_data(self) -> SnapshotData {
        SnapshotData {
            clients: self.clients,
            contracts: self.contracts,
        }
    }
}

impl TryFrom<SnapshotData> for Snapshot {
    type Error = SnapshotError;

    fn try_from(value: SnapshotData) -> Result<Self, Self::Error> {
        Self::try_new(value.clients, value.contracts)
    }
}

impl EntityStore for Snapshot {
    fn clients(&self) -> &[Client] {
        &self.clients
    }

    fn contracts(&self) -> &[Contract] {
        &self.contracts
    }

    fn get_client(&self, id: &str) -> Option<&Client> {
        self.client_index
            .get(id)
            .and_then(|position| self.clients.get(*position))
    }

    fn fingerprint(&self) -> u64 {
        content_fingerprint(&self.clients, &self.contracts)
    }
}

impl<'a> ClientLookup<'a> for &'a Snapshot {
    fn get_client(&self, id: &str) -> Option<&'a Client> {
        EntityStore::get_client(*self, id)
    }
}

#[cfg(test)]
mod tests {
    use super::{Snapshot, SnapshotError};
    use crate::model::client::{Client, Payment};
    use crate::model::contract::Contract;
    use crate::model::date::parse_local_timestamp;
    use crate::model::validation::ValidationError;
    use crate::store::EntityStore;
    use rust_decimal::Decimal;

    fn ts(value: &str) -> chrono::NaiveDateTime {
        parse_local_timestamp(value).expect("fixture timestamp should parse")
    }

    #[test]
    fn lookup_resolves_by_id() {
        let snapshot = Snapshot::try_new(
            vec![Client::with_id("a", "Acme"), Client::with_id("b", "Beta")],
            Vec::new(),
        )
        .expect("snapshot should build");

        assert_eq!(
            snapshot.get_client("b").map(|client| client.name.as_str()),
            Some("Beta")
        );
        assert!(snapshot.get_client("ghost").is_none());
    }

    #[test]
    fn duplicate_client_ids_are_rejected() {
        let err = Snapshot::try_new(
            vec![Client::with_id("a", "Acme"), Client::with_id("a", "Acme 2")],
            Vec::new(),
        )
        .expect_err("duplicate ids must fail");
        assert_eq!(err, SnapshotError::DuplicateClientId("a".to_string()));
    }

    #[test]
    fn validated_constructor_surfaces_entity_errors() {
        let contract = Contract::new(
            "c1",
            "a",
            "K-1",
            ts("2024-06-01"),
            ts("2024-01-01"),
        );
        let err = Snapshot::try_new_validated(vec![Client::with_id("a", "Acme")], vec![contract])
            .expect_err("reversed window must fail");
        assert!(matches!(
            err,
            SnapshotError::Validation(ValidationError::InvalidContractWindow { .. })
        ));
    }

    #[test]
    fn fingerprint_tracks_content_not_identity() {
        let build = |amount: i64| {
            let client = Client::with_id("a", "Acme").with_payments(vec![Payment::retainer(
                "p1",
                Decimal::from(amount),
                ts("2024-01-01"),
            )]);
            Snapshot::try_new(vec![client], Vec::new()).expect("snapshot should build")
        };

        assert_eq!(build(100).fingerprint(), build(100).fingerprint());
        assert_ne!(build(100).fingerprint(), build(101).fingerprint());
    }
}
