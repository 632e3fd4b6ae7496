//! Calendar event collection.
//!
//! # Responsibility
//! - Join clients, payments and contracts into one flat calendar feed.
//!
//! # Invariants
//! - Exactly one `payment` event per unpaid payment, keyed by the payment id.
//! - Paid payments never produce events.
//! - A contract whose client resolves yields start + expiration events, plus
//!   project-completion iff the completion date is set.
//! - A contract whose client does not resolve yields no events and no error.
//! - Every event date is normalized to local midnight.
//!
//! Output order is payments (client order, then payment order), then all
//! starts, expirations and completions in contract order. Callers sort before
//! display; see [`crate::service::calendar::sort_events`].

use crate::model::client::{Client, Payment};
use crate::model::contract::Contract;
use crate::model::date::{normalize_to_midnight, LocalTimestamp};
use crate::model::event::{contract_event_id, CalendarEvent, CalendarEventKind, EventDetails};
use crate::store::ClientLookup;
use log::debug;

/// Side information gathered while collecting events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectReport {
    /// Contracts skipped because their `client_id` did not resolve.
    pub orphan_contract_ids: Vec<String>,
}

impl CollectReport {
    pub fn has_orphans(&self) -> bool {
        !self.orphan_contract_ids.is_empty()
    }
}

/// Collects calendar events from a snapshot.
///
/// `lookup` must answer consistently with `clients` for the duration of the
/// call. Orphan contracts are dropped silently.
pub fn collect_events<'a, L>(
    clients: &[Client],
    contracts: &[Contract],
    lookup: L,
) -> Vec<CalendarEvent>
where
    L: ClientLookup<'a>,
{
    collect_events_with_report(clients, contracts, lookup).0
}

/// Collects calendar events and reports which contracts were dropped.
pub fn collect_events_with_report<'a, L>(
    clients: &[Client],
    contracts: &[Contract],
    lookup: L,
) -> (Vec<CalendarEvent>, CollectReport)
where
    L: ClientLookup<'a>,
{
    let mut events: Vec<CalendarEvent> = clients
        .iter()
        .flat_map(|client| {
            client
                .unpaid_payments()
                .map(move |payment| payment_event(client, payment))
        })
        .collect();
    let payment_count = events.len();

    let mut starts = Vec::new();
    let mut expirations = Vec::new();
    let mut completions = Vec::new();
    let mut report = CollectReport::default();

    for contract in contracts {
        let Some(client) = lookup.get_client(contract.client_id.as_str()) else {
            debug!(
                "event=orphan_contract module=event_collector status=skipped contract_id={}",
                contract.id
            );
            report.orphan_contract_ids.push(contract.id.clone());
            continue;
        };

        starts.push(contract_event(
            client,
            contract,
            CalendarEventKind::ContractStart,
            contract.start_date,
        ));
        expirations.push(contract_event(
            client,
            contract,
            CalendarEventKind::ContractExpiration,
            contract.end_date,
        ));
        if let Some(completion_date) = contract.project_completion_date {
            completions.push(contract_event(
                client,
                contract,
                CalendarEventKind::ProjectCompletion,
                completion_date,
            ));
        }
    }

    events.extend(starts);
    events.extend(expirations);
    events.extend(completions);

    debug!(
        "event=collect_events module=event_collector status=ok clients={} contracts={} payment_events={} total_events={} orphans={}",
        clients.len(),
        contracts.len(),
        payment_count,
        events.len(),
        report.orphan_contract_ids.len()
    );

    (events, report)
}

fn payment_event(client: &Client, payment: &Payment) -> CalendarEvent {
    CalendarEvent {
        id: payment.id.clone(),
        kind: CalendarEventKind::Payment,
        date: normalize_to_midnight(payment.due_date),
        client_name: client.name.clone(),
        client_id: client.id.clone(),
        details: EventDetails::Payment {
            payment_id: payment.id.clone(),
            amount: payment.amount,
        },
    }
}

fn contract_event(
    client: &Client,
    contract: &Contract,
    kind: CalendarEventKind,
    date: LocalTimestamp,
) -> CalendarEvent {
    CalendarEvent {
        id: contract_event_id(kind, contract.id.as_str()),
        kind,
        date: normalize_to_midnight(date),
        client_name: client.name.clone(),
        client_id: client.id.clone(),
        details: EventDetails::Contract {
            contract_id: contract.id.clone(),
            contract_number: contract.contract_number.clone(),
        },
    }
}
