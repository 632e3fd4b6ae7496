//! Calendar view helpers over collected events.
//!
//! # Responsibility
//! - Give calendar views a deterministic display order.
//! - Group and filter events at day granularity.
//!
//! # Invariants
//! - Display order is `date ASC, kind ASC, id ASC` regardless of input order.
//! - Filters compare calendar days only; event times are already midnight.

use crate::model::event::CalendarEvent;
use chrono::{Days, Months, NaiveDate};
use std::collections::BTreeMap;

/// Sorts events into display order.
pub fn sort_events(events: &mut [CalendarEvent]) {
    events.sort_by(|left, right| {
        left.date
            .cmp(&right.date)
            .then_with(|| left.kind.cmp(&right.kind))
            .then_with(|| left.id.cmp(&right.id))
    });
}

/// Returns a sorted copy of `events`.
pub fn sorted_events(events: &[CalendarEvent]) -> Vec<CalendarEvent> {
    let mut sorted = events.to_vec();
    sort_events(&mut sorted);
    sorted
}

/// Groups events by calendar day; each day's list is in display order.
pub fn group_events_by_day(events: &[CalendarEvent]) -> BTreeMap<NaiveDate, Vec<CalendarEvent>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<CalendarEvent>> = BTreeMap::new();
    for event in events {
        grouped.entry(event.day()).or_default().push(event.clone());
    }
    for day_events in grouped.values_mut() {
        sort_events(day_events);
    }
    grouped
}

/// Events within `from..=to` (calendar days), sorted.
///
/// Returns an empty list when `to < from`.
pub fn events_in_range(events: &[CalendarEvent], from: NaiveDate, to: NaiveDate) -> Vec<CalendarEvent> {
    let mut selected: Vec<CalendarEvent> = events
        .iter()
        .filter(|event| {
            let day = event.day();
            from <= day && day <= to
        })
        .cloned()
        .collect();
    sort_events(&mut selected);
    selected
}

/// Events in one calendar month, sorted. An invalid `month` yields nothing.
pub fn events_in_month(events: &[CalendarEvent], year: i32, month: u32) -> Vec<CalendarEvent> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let Some(last) = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
    else {
        return Vec::new();
    };
    events_in_range(events, first, last)
}

/// Events from `today` through `today + days`, sorted.
pub fn upcoming_events(events: &[CalendarEvent], today: NaiveDate, days: u32) -> Vec<CalendarEvent> {
    let until = today
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX);
    events_in_range(events, today, until)
}

#[cfg(test)]
mod tests {
    use super::{events_in_month, group_events_by_day, sort_events, upcoming_events};
    use crate::model::date::start_of_day;
    use crate::model::event::{CalendarEvent, CalendarEventKind, EventDetails};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn payment(id: &str, day: NaiveDate) -> CalendarEvent {
        CalendarEvent {
            id: id.to_string(),
            kind: CalendarEventKind::Payment,
            date: start_of_day(day),
            client_name: "Acme".to_string(),
            client_id: "a".to_string(),
            details: EventDetails::Payment {
                payment_id: id.to_string(),
                amount: Decimal::from(10),
            },
        }
    }

    fn start(contract_id: &str, day: NaiveDate) -> CalendarEvent {
        CalendarEvent {
            id: format!("contract-start-{contract_id}"),
            kind: CalendarEventKind::ContractStart,
            date: start_of_day(day),
            client_name: "Acme".to_string(),
            client_id: "a".to_string(),
            details: EventDetails::Contract {
                contract_id: contract_id.to_string(),
                contract_number: "K-1".to_string(),
            },
        }
    }

    #[test]
    fn sort_orders_by_date_then_kind_then_id() {
        let mut events = vec![
            start("c1", date(2024, 3, 1)),
            payment("p2", date(2024, 3, 1)),
            payment("p1", date(2024, 3, 1)),
            payment("p0", date(2024, 2, 1)),
        ];
        sort_events(&mut events);
        let ids: Vec<&str> = events.iter().map(|event| event.id.as_str()).collect();
        assert_eq!(ids, vec!["p0", "p1", "p2", "contract-start-c1"]);
    }

    #[test]
    fn grouping_and_month_filter_use_calendar_days() {
        let events = vec![
            payment("p1", date(2024, 3, 15)),
            start("c1", date(2024, 3, 15)),
            payment("p2", date(2024, 4, 1)),
        ];

        let grouped = group_events_by_day(&events);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[&date(2024, 3, 15)].len(), 2);

        let march = events_in_month(&events, 2024, 3);
        assert_eq!(march.len(), 2);
        assert!(events_in_month(&events, 2024, 13).is_empty());
    }

    #[test]
    fn upcoming_window_is_inclusive() {
        let events = vec![
            payment("past", date(2024, 2, 28)),
            payment("today", date(2024, 3, 1)),
            payment("edge", date(2024, 3, 8)),
            payment("later", date(2024, 3, 9)),
        ];
        let upcoming = upcoming_events(&events, date(2024, 3, 1), 7);
        let ids: Vec<&str> = upcoming.iter().map(|event| event.id.as_str()).collect();
        assert_eq!(ids, vec!["today", "edge"]);
    }
}
