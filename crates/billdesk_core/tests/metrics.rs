use billdesk_core::{
    aggregate_metrics, check_client_caches, parse_local_timestamp, Client, FinancialMetrics,
    Payment,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn ts(value: &str) -> billdesk_core::LocalTimestamp {
    parse_local_timestamp(value).unwrap()
}

fn scenario_client() -> Client {
    Client::with_id("A", "Acme")
        .with_payments(vec![
            Payment::installment("p1", dec!(500), ts("2024-03-15"), 1),
            Payment::retainer("p2", dec!(200), ts("2024-01-01")).paid_on(ts("2024-01-10")),
        ])
        .with_cached_totals(dec!(1000), dec!(500))
}

fn consistent_clients() -> Vec<Client> {
    vec![
        Client::with_id("a", "Acme").with_payments(vec![
            Payment::retainer("a0", dec!(1500), ts("2024-01-01")).paid_on(ts("2024-01-03")),
            Payment::installment("a1", dec!(400.50), ts("2024-02-01"), 1)
                .paid_on(ts("2024-02-02")),
            Payment::installment("a2", dec!(400.50), ts("2024-03-01"), 2),
        ]),
        Client::with_id("b", "Beta").with_payments(vec![
            Payment::retainer("b0", dec!(250), ts("2024-02-15")),
            Payment::installment("b1", dec!(99.99), ts("2024-04-01"), 1),
        ]),
        Client::with_id("c", "Cobalt"),
    ]
}

#[test]
fn scenario_totals_match_expected_values() {
    let metrics = aggregate_metrics(&[scenario_client()]);
    assert_eq!(
        metrics,
        FinancialMetrics {
            total_revenue: dec!(1000),
            total_outstanding: dec!(500),
            total_due: dec!(500),
            total_retainers: dec!(200),
        }
    );
}

#[test]
fn unpaid_retainers_count_as_due_not_as_retainers() {
    let metrics = aggregate_metrics(&consistent_clients());
    assert_eq!(metrics.total_retainers, dec!(1500));
    assert_eq!(metrics.total_due, dec!(750.49));
}

#[test]
fn aggregation_is_order_independent_and_idempotent() {
    let clients = consistent_clients();
    let forward = aggregate_metrics(&clients);
    let mut reversed = clients.clone();
    reversed.reverse();
    let mut rotated = clients.clone();
    rotated.rotate_left(1);

    assert_eq!(aggregate_metrics(&reversed), forward);
    assert_eq!(aggregate_metrics(&rotated), forward);
    assert_eq!(aggregate_metrics(&clients), forward);
}

#[test]
fn consistent_caches_show_no_owed_drift() {
    let clients = consistent_clients();
    let metrics = aggregate_metrics(&clients);
    assert_eq!(metrics.total_outstanding, metrics.total_due);
    assert!(metrics.owed_drift().is_none());
    assert!(check_client_caches(&clients).is_empty());
}

#[test]
fn stale_cache_is_reported_without_unifying_totals() {
    let mut clients = consistent_clients();
    clients[1] = clients[1].clone().with_cached_totals(dec!(0), dec!(100));

    let metrics = aggregate_metrics(&clients);
    let drift = metrics.owed_drift().unwrap();
    assert_eq!(drift.cached, metrics.total_outstanding);
    assert_eq!(drift.live, metrics.total_due);
    assert_eq!(drift.difference, dec!(100) - dec!(349.99));

    let stale = check_client_caches(&clients);
    assert_eq!(stale.len(), 1);
    assert_eq!(stale[0].client_id, "b");
    assert_eq!(stale[0].live_due, dec!(349.99));
    assert_eq!(stale[0].cached_due, dec!(100));
}

#[test]
fn totals_saturate_instead_of_overflowing() {
    let client = Client::with_id("big", "Bigco").with_payments(vec![
        Payment::installment("m1", Decimal::MAX, ts("2024-03-01"), 1),
        Payment::installment("m2", Decimal::MAX, ts("2024-04-01"), 2),
    ]);
    assert_eq!(client.amount_due, Decimal::MAX);

    let metrics = aggregate_metrics(&[client.clone(), client]);
    assert_eq!(metrics.total_due, Decimal::MAX);
    assert_eq!(metrics.total_outstanding, Decimal::MAX);
    assert_eq!(metrics.total_revenue, Decimal::ZERO);
    assert!(metrics.owed_drift().is_none());
}
