//! Dashboard financial metrics.
//!
//! # Responsibility
//! - Reduce the client collection into four scalar totals.
//! - Detect drift between store-maintained caches and live payment data.
//!
//! # Invariants
//! - `total_revenue` and `total_outstanding` read the client caches.
//! - `total_due` and `total_retainers` are re-derived from payments.
//! - `total_outstanding` and `total_due` both mean "money owed" and are kept
//!   as two separate computations; drift is reported, never reconciled.
//! - Results are independent of client order.
//! - Sums saturate at the `Decimal` bounds; aggregation never panics.

use crate::model::client::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Scalar totals for dashboard cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialMetrics {
    /// Sum of cached `amount_paid`.
    pub total_revenue: Decimal,
    /// Sum of cached `amount_due`.
    pub total_outstanding: Decimal,
    /// Sum of unpaid payment amounts.
    pub total_due: Decimal,
    /// Sum of paid retainer amounts.
    pub total_retainers: Decimal,
}

/// Mismatch between cached and live "money owed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwedDrift {
    /// `total_outstanding`, from client caches.
    pub cached: Decimal,
    /// `total_due`, from payment data.
    pub live: Decimal,
    /// `cached - live`.
    pub difference: Decimal,
}

impl FinancialMetrics {
    /// Returns the drift when cached and live owed totals disagree.
    pub fn owed_drift(&self) -> Option<OwedDrift> {
        if self.total_outstanding == self.total_due {
            return None;
        }
        Some(OwedDrift {
            cached: self.total_outstanding,
            live: self.total_due,
            difference: self.total_outstanding.saturating_sub(self.total_due),
        })
    }
}

/// Aggregates the four dashboard totals in one pass.
///
/// Totals saturate at the `Decimal` bounds instead of overflowing.
pub fn aggregate_metrics(clients: &[Client]) -> FinancialMetrics {
    clients
        .iter()
        .fold(FinancialMetrics::default(), |mut totals, client| {
            totals.total_revenue = totals.total_revenue.saturating_add(client.amount_paid);
            totals.total_outstanding = totals.total_outstanding.saturating_add(client.amount_due);
            for payment in &client.payments {
                match payment.paid_date {
                    None => totals.total_due = totals.total_due.saturating_add(payment.amount),
                    Some(_) if payment.is_retainer() => {
                        totals.total_retainers = totals.total_retainers.saturating_add(payment.amount)
                    }
                    Some(_) => {}
                }
            }
            totals
        })
}

/// Per-client cache mismatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCacheDrift {
    pub client_id: String,
    pub cached_paid: Decimal,
    pub live_paid: Decimal,
    pub cached_due: Decimal,
    pub live_due: Decimal,
}

/// Lists clients whose cached aggregates differ from their payment data.
pub fn check_client_caches(clients: &[Client]) -> Vec<ClientCacheDrift> {
    clients
        .iter()
        .filter_map(|client| {
            let live_paid = client.live_amount_paid();
            let live_due = client.live_amount_due();
            if live_paid == client.amount_paid && live_due == client.amount_due {
                return None;
            }
            Some(ClientCacheDrift {
                client_id: client.id.clone(),
                cached_paid: client.amount_paid,
                live_paid,
                cached_due: client.amount_due,
                live_due,
            })
        })
        .collect()
}
