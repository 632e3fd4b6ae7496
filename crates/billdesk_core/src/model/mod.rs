//! Domain model for the billing dashboard.
//!
//! # Responsibility
//! - Define clients, payments and contracts as supplied by the entity store.
//! - Define the calendar event projection derived from them.
//!
//! # Invariants
//! - Aggregation code reads these types and never mutates them.
//! - Every date is local wall-clock time; events are normalized to midnight.

pub mod client;
pub mod contract;
pub mod date;
pub mod event;
pub mod money;
pub mod validation;
