//! Dashboard configuration.
//!
//! # Invariants
//! - `chart_month_count` is within `1..=MAX_CHART_MONTHS`.
//! - `upcoming_days` is at most `MAX_UPCOMING_DAYS`.
//! - Missing fields take their defaults when deserialized.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_CHART_MONTHS: u32 = 6;
pub const MAX_CHART_MONTHS: u32 = 60;
pub const DEFAULT_UPCOMING_DAYS: u32 = 30;
pub const MAX_UPCOMING_DAYS: u32 = 366;

/// Tunables for the dashboard facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardConfig {
    /// Number of trailing months in every chart series.
    pub chart_month_count: u32,
    /// Horizon of the upcoming-events list, in days after today.
    pub upcoming_days: u32,
    /// Log a warning when cached and live owed totals disagree.
    pub warn_on_owed_drift: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            chart_month_count: DEFAULT_CHART_MONTHS,
            upcoming_days: DEFAULT_UPCOMING_DAYS,
            warn_on_owed_drift: true,
        }
    }
}

impl DashboardConfig {
    /// Checks value ranges.
    ///
    /// # Errors
    /// - `ChartMonthsOutOfRange` when `chart_month_count` is 0 or too large.
    /// - `UpcomingDaysOutOfRange` when `upcoming_days` is too large.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chart_month_count == 0 || self.chart_month_count > MAX_CHART_MONTHS {
            return Err(ConfigError::ChartMonthsOutOfRange(self.chart_month_count));
        }
        if self.upcoming_days > MAX_UPCOMING_DAYS {
            return Err(ConfigError::UpcomingDaysOutOfRange(self.upcoming_days));
        }
        Ok(())
    }
}

/// Invalid dashboard configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    ChartMonthsOutOfRange(u32),
    UpcomingDaysOutOfRange(u32),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ChartMonthsOutOfRange(value) => write!(
                f,
                "chart_month_count must be within 1..={MAX_CHART_MONTHS}, got {value}"
            ),
            Self::UpcomingDaysOutOfRange(value) => write!(
                f,
                "upcoming_days must be at most {MAX_UPCOMING_DAYS}, got {value}"
            ),
        }
    }
}

impl Error for ConfigError {}
