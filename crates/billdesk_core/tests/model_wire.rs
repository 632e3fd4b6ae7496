use billdesk_core::{
    aggregate_metrics, collect_events, parse_local_timestamp, Client, Contract, EntityStore,
    Payment, PaymentType, Snapshot, SnapshotData, ValidationError,
};
use rust_decimal_macros::dec;

fn ts(value: &str) -> billdesk_core::LocalTimestamp {
    parse_local_timestamp(value).unwrap()
}

#[test]
fn snapshot_json_accepts_date_only_and_timestamp_fields() {
    let value = serde_json::json!({
        "clients": [{
            "id": "A",
            "name": "Acme",
            "amountPaid": 1000,
            "amountDue": "500",
            "payments": [
                {"id": "p1", "type": "installment", "amount": 500, "dueDate": "2024-03-15T18:30:00", "installmentNumber": 1},
                {"id": "p2", "type": "retainer", "amount": 200, "dueDate": "2024-01-01", "paidDate": "2024-01-10"}
            ]
        }],
        "contracts": [
            {"id": "C1", "clientId": "A", "contractNumber": "K-1", "startDate": "2024-01-01", "endDate": "2024-12-31"}
        ]
    });

    let data: SnapshotData = serde_json::from_value(value).unwrap();
    let snapshot = Snapshot::try_from(data).unwrap();
    let client = snapshot.get_client("A").unwrap();

    assert_eq!(client.amount_paid, dec!(1000));
    assert_eq!(client.amount_due, dec!(500));
    assert_eq!(client.payments[0].payment_type, PaymentType::Installment);
    assert_eq!(client.payments[0].due_date, ts("2024-03-15T18:30:00"));
    assert_eq!(client.payments[1].paid_date, Some(ts("2024-01-10")));
    assert_eq!(snapshot.contracts()[0].project_completion_date, None);
}

#[test]
fn calendar_event_serializes_with_flat_type_specific_fields() {
    let clients = vec![Client::with_id("A", "Acme").with_payments(vec![Payment::installment(
        "p1",
        dec!(500),
        ts("2024-03-15T18:30:00"),
        1,
    )])];
    let contracts = vec![Contract::new("C1", "A", "K-1", ts("2024-01-01"), ts("2024-12-31"))];
    let events = collect_events(&clients, &contracts, |id: &str| {
        clients.iter().find(|client| client.id == id)
    });

    let payment = serde_json::to_value(&events[0]).unwrap();
    assert_eq!(payment["type"], "payment");
    assert_eq!(payment["id"], "p1");
    assert_eq!(payment["paymentId"], "p1");
    assert_eq!(payment["date"], "2024-03-15T00:00:00.000");
    assert_eq!(payment["clientName"], "Acme");
    assert!(payment.get("contractId").is_none());
    assert!(payment.get("payment_id").is_none());

    let start = serde_json::to_value(&events[1]).unwrap();
    assert_eq!(start["type"], "contract-start");
    assert_eq!(start["contractId"], "C1");
    assert_eq!(start["contractNumber"], "K-1");
    assert!(start.get("amount").is_none());
}

#[test]
fn unparsable_dates_are_rejected_at_the_wire_boundary() {
    let value = serde_json::json!({
        "id": "p1", "type": "retainer", "amount": 1, "dueDate": "next tuesday"
    });
    let err = serde_json::from_value::<Payment>(value).unwrap_err();
    assert!(err.to_string().contains("next tuesday"), "unexpected error: {err}");
}

#[test]
fn payment_validation_rejects_negative_amounts_and_numbered_retainers() {
    let negative = Payment::installment("p1", dec!(-1), ts("2024-01-01"), 1);
    assert!(matches!(
        negative.validate(),
        Err(ValidationError::NegativeAmount { .. })
    ));

    let mut numbered = Payment::retainer("p2", dec!(10), ts("2024-01-01"));
    numbered.installment_number = Some(3);
    assert_eq!(
        numbered.validate(),
        Err(ValidationError::RetainerWithInstallmentNumber {
            payment_id: "p2".to_string()
        })
    );

    assert!(Payment::retainer("p3", dec!(0), ts("2024-01-01")).validate().is_ok());
}

#[test]
fn generated_client_ids_are_unique() {
    let first = Client::new("Acme");
    let second = Client::new("Acme");
    assert!(!first.id.is_empty());
    assert_ne!(first.id, second.id);
}

#[test]
fn metrics_serialize_with_camel_case_keys() {
    let clients = vec![Client::with_id("A", "Acme").with_payments(vec![Payment::retainer(
        "p1",
        dec!(200),
        ts("2024-01-01"),
    )
    .paid_on(ts("2024-01-10"))])];
    let value = serde_json::to_value(aggregate_metrics(&clients)).unwrap();
    let mut keys: Vec<&str> = value
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["totalDue", "totalOutstanding", "totalRetainers", "totalRevenue"]
    );
}
