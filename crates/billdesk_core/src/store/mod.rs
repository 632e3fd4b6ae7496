//! Entity store boundary.
//!
//! # Responsibility
//! - Define the read-only contract the aggregation core needs from the
//!   external entity store.
//! - Provide an in-memory snapshot implementation for callers and tests.
//!
//! # Invariants
//! - Implementations must answer `get_client` consistently with `clients()`
//!   for the lifetime of a borrow.
//! - The core never mutates store contents.

mod snapshot;

pub use snapshot::{Snapshot, SnapshotData, SnapshotError};

use crate::model::client::Client;
use crate::model::contract::Contract;
use rust_decimal::Decimal;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Resolves a client by id for the lifetime `'a` of the borrowed snapshot.
///
/// Implemented for closures `Fn(&str) -> Option<&'a Client>` and for
/// `&'a Snapshot`.
pub trait ClientLookup<'a> {
    fn get_client(&self, id: &str) -> Option<&'a Client>;
}

impl<'a, F> ClientLookup<'a> for F
where
    F: Fn(&str) -> Option<&'a Client>,
{
    fn get_client(&self, id: &str) -> Option<&'a Client> {
        self(id)
    }
}

/// Read-only view over the store's entity collections.
pub trait EntityStore {
    fn clients(&self) -> &[Client];
    fn contracts(&self) -> &[Contract];
    fn get_client(&self, id: &str) -> Option<&Client>;

    /// Content fingerprint used as memoization key.
    ///
    /// Equal content yields an equal fingerprint within one process. Callers
    /// should compute it once per snapshot; it walks every entity.
    fn fingerprint(&self) -> u64 {
        content_fingerprint(self.clients(), self.contracts())
    }
}

/// Hashes full collection content, including order and cached aggregates.
///
/// Amounts are hashed by their exact representation, so `500.0` and `500.00`
/// fingerprint differently even though they compare equal.
pub fn content_fingerprint(clients: &[Client], contracts: &[Contract]) -> u64 {
    let mut hasher = DefaultHasher::new();
    clients.len().hash(&mut hasher);
    for client in clients {
        client.id.hash(&mut hasher);
        client.name.hash(&mut hasher);
        hash_amount(client.amount_paid, &mut hasher);
        hash_amount(client.amount_due, &mut hasher);
        client.payments.len().hash(&mut hasher);
        for payment in &client.payments {
            payment.id.hash(&mut hasher);
            payment.payment_type.hash(&mut hasher);
            hash_amount(payment.amount, &mut hasher);
            payment.due_date.hash(&mut hasher);
            payment.paid_date.hash(&mut hasher);
            payment.installment_number.hash(&mut hasher);
        }
    }
    contracts.hash(&mut hasher);
    hasher.finish()
}

fn hash_amount(amount: Decimal, hasher: &mut DefaultHasher) {
    amount.serialize().hash(hasher);
}
