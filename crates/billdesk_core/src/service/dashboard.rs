//! Dashboard facade with snapshot-keyed memoization.
//!
//! # Responsibility
//! - Serve calendar, metric and chart data for one entity store.
//! - Reuse computed results while the store content is unchanged.
//!
//! # Invariants
//! - Cached results are keyed by the store content fingerprint, computed once
//!   per snapshot; any content change invalidates every cached value.
//! - Upcoming events and chart series share one date anchor.
//! - Repeated calls over unchanged content return equal output.
//! - The facade never mutates store entities.

use crate::config::{ConfigError, DashboardConfig};
use crate::model::event::CalendarEvent;
use crate::service::calendar::{sort_events, upcoming_events};
use crate::service::chart_series::{ChartMetric, SeriesBuilder, SeriesPoint};
use crate::service::event_collector::{collect_events_with_report, CollectReport};
use crate::service::metrics::{aggregate_metrics, FinancialMetrics};
use crate::store::EntityStore;
use chrono::{Local, NaiveDate};
use log::{debug, warn};
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything the dashboard page renders in one call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub metrics: FinancialMetrics,
    pub series: BTreeMap<ChartMetric, Vec<SeriesPoint>>,
    pub upcoming: Vec<CalendarEvent>,
}

#[derive(Debug)]
struct DashboardCache {
    fingerprint: u64,
    events: Option<(Vec<CalendarEvent>, CollectReport)>,
    metrics: Option<FinancialMetrics>,
    series: BTreeMap<ChartMetric, Vec<SeriesPoint>>,
}

impl DashboardCache {
    fn empty(fingerprint: u64) -> Self {
        Self {
            fingerprint,
            events: None,
            metrics: None,
            series: BTreeMap::new(),
        }
    }
}

/// Dashboard facade over one store and one series builder.
///
/// The facade owns the single date anchor: the upcoming-events window and
/// the series builder both follow [`DashboardService::set_today`]. A
/// long-lived service calls [`DashboardService::roll_to_local_today`] when
/// the day changes.
pub struct DashboardService<S: EntityStore, B: SeriesBuilder> {
    store: S,
    builder: B,
    config: DashboardConfig,
    today: NaiveDate,
    cache: DashboardCache,
}

impl<S: EntityStore, B: SeriesBuilder> DashboardService<S, B> {
    /// Creates a facade anchored at the current local date.
    ///
    /// The builder is re-anchored to the same date.
    ///
    /// # Errors
    /// Returns `ConfigError` when `config` fails validation.
    pub fn new(store: S, mut builder: B, config: DashboardConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let today = Local::now().date_naive();
        builder.anchor_at(today);
        let cache = DashboardCache::empty(store.fingerprint());
        Ok(Self {
            store,
            builder,
            config,
            today,
            cache,
        })
    }

    /// Builder-style [`DashboardService::set_today`].
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.set_today(today);
        self
    }

    /// Moves the date anchor for upcoming events and chart series together.
    ///
    /// Cached series are dropped when the date changes; events and metrics do
    /// not depend on it.
    pub fn set_today(&mut self, today: NaiveDate) {
        if self.today == today {
            return;
        }
        self.today = today;
        self.builder.anchor_at(today);
        self.cache.series.clear();
    }

    /// Re-anchors at the current local date.
    pub fn roll_to_local_today(&mut self) {
        self.set_today(Local::now().date_naive());
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn series_builder(&self) -> &B {
        &self.builder
    }

    /// Swaps in a newer store snapshot.
    ///
    /// The snapshot is fingerprinted once here; cached results survive only
    /// if the fingerprint is unchanged.
    pub fn replace_store(&mut self, store: S) {
        let fingerprint = store.fingerprint();
        self.store = store;
        if self.cache.fingerprint == fingerprint {
            return;
        }
        debug!("event=cache_invalidate module=dashboard status=ok");
        self.cache = DashboardCache::empty(fingerprint);
    }

    /// Sorted calendar feed.
    pub fn calendar_events(&mut self) -> &[CalendarEvent] {
        &self.events_entry().0
    }

    /// Orphan contracts seen while collecting the current feed.
    pub fn collect_report(&mut self) -> &CollectReport {
        &self.events_entry().1
    }

    /// Scalar dashboard totals.
    pub fn metrics(&mut self) -> FinancialMetrics {
        if let Some(metrics) = self.cache.metrics {
            return metrics;
        }

        let metrics = aggregate_metrics(self.store.clients());
        if self.config.warn_on_owed_drift {
            if let Some(drift) = metrics.owed_drift() {
                warn!(
                    "event=owed_drift module=dashboard status=warn difference={}",
                    drift.difference
                );
            }
        }
        self.cache.metrics = Some(metrics);
        metrics
    }

    /// Series for one metric over `config.chart_month_count` months.
    pub fn chart_series(&mut self, metric: ChartMetric) -> &[SeriesPoint] {
        let store = &self.store;
        let builder = &self.builder;
        let month_count = self.config.chart_month_count;
        self.cache
            .series
            .entry(metric)
            .or_insert_with(|| builder.build_series(store.clients(), metric, month_count))
    }

    /// Upcoming events from today through `config.upcoming_days`.
    pub fn upcoming(&mut self) -> Vec<CalendarEvent> {
        let today = self.today;
        let days = self.config.upcoming_days;
        upcoming_events(self.calendar_events(), today, days)
    }

    /// Metrics, all four series and the upcoming list.
    pub fn summary(&mut self) -> DashboardSummary {
        let metrics = self.metrics();
        let series = ChartMetric::ALL
            .into_iter()
            .map(|metric| (metric, self.chart_series(metric).to_vec()))
            .collect();
        let upcoming = self.upcoming();
        DashboardSummary {
            metrics,
            series,
            upcoming,
        }
    }

    fn events_entry(&mut self) -> &(Vec<CalendarEvent>, CollectReport) {
        let store = &self.store;
        self.cache.events.get_or_insert_with(|| {
            let (mut events, report) = collect_events_with_report(
                store.clients(),
                store.contracts(),
                |id: &str| store.get_client(id),
            );
            sort_events(&mut events);
            (events, report)
        })
    }
}
