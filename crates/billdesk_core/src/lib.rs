//! Financial-event aggregation core for the billing dashboard.
//! Joins clients, payments and contracts into calendar feeds and metrics.

pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use config::{ConfigError, DashboardConfig};
pub use logging::{init_logging, logging_status, LogLevel};
pub use model::client::{Client, Payment, PaymentType};
pub use model::contract::Contract;
pub use model::date::{normalize_to_midnight, parse_local_timestamp, LocalTimestamp};
pub use model::money::saturating_total;
pub use model::event::{CalendarEvent, CalendarEventKind, EventDetails};
pub use model::validation::ValidationError;
pub use service::calendar::{
    events_in_month, events_in_range, group_events_by_day, sort_events, sorted_events,
    upcoming_events,
};
pub use service::chart_series::{
    ChartMetric, MonthlySeriesBuilder, SeriesBuilder, SeriesPoint, UnknownMetricError,
    MAX_SERIES_MONTHS,
};
pub use service::dashboard::{DashboardService, DashboardSummary};
pub use service::event_collector::{collect_events, collect_events_with_report, CollectReport};
pub use service::metrics::{
    aggregate_metrics, check_client_caches, ClientCacheDrift, FinancialMetrics, OwedDrift,
};
pub use store::{ClientLookup, EntityStore, Snapshot, SnapshotData, SnapshotError};

/// Liveness check for hosts linking the core.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_answers_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
