//! Aggregation services over entity snapshots.
//!
//! # Responsibility
//! - Derive calendar feeds, scalar metrics and chart series from snapshots.
//! - Keep UI layers decoupled from the store and from join logic.
//!
//! # Invariants
//! - Every derivation is a pure function of its inputs; only the dashboard
//!   facade holds state (its memo cache).

pub mod calendar;
pub mod chart_series;
pub mod dashboard;
pub mod event_collector;
pub mod metrics;
