//! Trailing monthly chart series.
//!
//! # Responsibility
//! - Define the series-builder contract consumed by dashboard charts.
//! - Provide a default builder bucketing payments by calendar month.
//!
//! # Invariants
//! - A series has exactly `month_count` points (capped at
//!   [`MAX_SERIES_MONTHS`]), oldest first, ending at the month containing the
//!   builder's `today`.
//! - Months without contributing payments are present with value zero.
//!
//! Bucketing rules of [`MonthlySeriesBuilder`]:
//! - `revenue`: paid payments by `paid_date` month.
//! - `retainers`: paid retainers by `paid_date` month.
//! - `due`: unpaid payments by `due_date` month.
//! - `outstanding`: month-end balance of payments due on or before the last
//!   day of the month and not paid by that day.

use crate::model::client::{Client, Payment};
use crate::model::money::saturating_total;
use chrono::{Datelike, Local, Months, NaiveDate};
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const MONTH_LABEL_FORMAT: &str = "%b %Y";

/// Longest series [`MonthlySeriesBuilder`] produces; larger requests are capped.
pub const MAX_SERIES_MONTHS: u32 = 1200;

/// Metric plotted by a chart series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartMetric {
    Revenue,
    Outstanding,
    Due,
    Retainers,
}

impl ChartMetric {
    /// Every metric, in dashboard display order.
    pub const ALL: [ChartMetric; 4] = [
        ChartMetric::Revenue,
        ChartMetric::Outstanding,
        ChartMetric::Due,
        ChartMetric::Retainers,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::Outstanding => "outstanding",
            Self::Due => "due",
            Self::Retainers => "retainers",
        }
    }
}

/// Unknown metric name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMetricError(pub String);

impl Display for UnknownMetricError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown chart metric `{}`; expected revenue|outstanding|due|retainers",
            self.0
        )
    }
}

impl Error for UnknownMetricError {}

impl FromStr for ChartMetric {
    type Err = UnknownMetricError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "revenue" => Ok(Self::Revenue),
            "outstanding" => Ok(Self::Outstanding),
            "due" => Ok(Self::Due),
            "retainers" => Ok(Self::Retainers),
            other => Err(UnknownMetricError(other.to_string())),
        }
    }
}

/// One chart bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Display label, e.g. `Mar 2024`.
    pub month: String,
    pub value: Decimal,
}

/// Builds trailing monthly series for one metric.
///
/// # Contract
/// - Returns `month_count` points, oldest first, ending at the anchor month.
/// - Implementations may cap `month_count` at a documented maximum; the
///   default builder caps at [`MAX_SERIES_MONTHS`].
pub trait SeriesBuilder {
    fn build_series(
        &self,
        clients: &[Client],
        metric: ChartMetric,
        month_count: u32,
    ) -> Vec<SeriesPoint>;

    /// Moves the month the series ends at. Builders without a date anchor
    /// ignore this.
    fn anchor_at(&mut self, _today: NaiveDate) {}
}

/// Default builder anchored at a fixed "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlySeriesBuilder {
    today: NaiveDate,
}

impl MonthlySeriesBuilder {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Anchors at the current local date.
    pub fn from_local_clock() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }
}

impl SeriesBuilder for MonthlySeriesBuilder {
    fn build_series(
        &self,
        clients: &[Client],
        metric: ChartMetric,
        month_count: u32,
    ) -> Vec<SeriesPoint> {
        month_windows(self.today, month_count)
            .into_iter()
            .map(|window| SeriesPoint {
                month: window.first.format(MONTH_LABEL_FORMAT).to_string(),
                value: saturating_total(
                    clients
                        .iter()
                        .flat_map(|client| client.payments.iter())
                        .filter(|payment| contributes(payment, metric, &window))
                        .map(|payment| payment.amount),
                ),
            })
            .collect()
    }

    fn anchor_at(&mut self, today: NaiveDate) {
        self.today = today;
    }
}

/// Inclusive first/last day of one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MonthWindow {
    first: NaiveDate,
    last: NaiveDate,
}

impl MonthWindow {
    fn contains(&self, date: NaiveDate) -> bool {
        self.first <= date && date <= self.last
    }
}

/// Windows for the trailing `month_count` months, capped at
/// [`MAX_SERIES_MONTHS`]. Empty only when the window leaves chrono's date range.
fn month_windows(today: NaiveDate, month_count: u32) -> Vec<MonthWindow> {
    if month_count == 0 {
        return Vec::new();
    }
    if month_count > MAX_SERIES_MONTHS {
        debug!(
            "event=series_window module=chart_series status=capped requested={month_count} applied={MAX_SERIES_MONTHS}"
        );
    }
    let month_count = month_count.min(MAX_SERIES_MONTHS);
    let current_first = today.with_day(1).unwrap_or(today);
    let Some(oldest_first) = current_first.checked_sub_months(Months::new(month_count - 1)) else {
        warn!(
            "event=series_window module=chart_series status=error reason=date_out_of_range month_count={month_count}"
        );
        return Vec::new();
    };

    let mut windows = Vec::with_capacity(month_count as usize);
    for offset in 0..month_count {
        let window = oldest_first
            .checked_add_months(Months::new(offset))
            .and_then(|first| {
                let last = first
                    .checked_add_months(Months::new(1))
                    .and_then(|next| next.pred_opt())?;
                Some(MonthWindow { first, last })
            });
        match window {
            Some(window) => windows.push(window),
            None => {
                warn!(
                    "event=series_window module=chart_series status=error reason=date_out_of_range offset={offset}"
                );
                return Vec::new();
            }
        }
    }
    windows
}

fn contributes(payment: &Payment, metric: ChartMetric, window: &MonthWindow) -> bool {
    match metric {
        ChartMetric::Revenue => payment
            .paid_date
            .is_some_and(|paid| window.contains(paid.date())),
        ChartMetric::Retainers => {
            payment.is_retainer()
                && payment
                    .paid_date
                    .is_some_and(|paid| window.contains(paid.date()))
        }
        ChartMetric::Due => !payment.is_paid() && window.contains(payment.due_date.date()),
        ChartMetric::Outstanding => {
            payment.due_date.date() <= window.last
                && payment
                    .paid_date
                    .map_or(true, |paid| paid.date() > window.last)
        }
    }
}
