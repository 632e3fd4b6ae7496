//! Overflow-safe money arithmetic.
//!
//! # Invariants
//! - Sums never panic; they saturate at `Decimal::MAX` / `Decimal::MIN`.

use rust_decimal::Decimal;

/// Sums amounts, saturating instead of overflowing.
pub fn saturating_total<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |total, amount| total.saturating_add(amount))
}
