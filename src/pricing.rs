//! Rental pricing engine
//!
//! Day-rate pricing with a weekly-discount tier: every full 5-day block is
//! billed at the weekly rate (15% off five day rates), remaining days at
//! the raw day rate. Pure functions, no error conditions.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Rounds half away from zero to a whole currency amount (the behavior of
/// JS `Math.round` for non-negative values).
fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Discounted price for a 5-day block: round(day_rate * 5 * 0.85),
/// rounded to the nearest integer exactly once.
pub fn weekly_rate(day_rate: Decimal) -> Decimal {
    round_currency(day_rate * dec!(5) * dec!(0.85))
}

/// Price for renting one unit at `day_rate` for `days` days.
///
/// Free items (rate 0) and zero-day rentals never accrue cost. For five
/// days or more, full 5-day blocks are billed at the pre-rounded weekly
/// rate; the remainder uses the raw day rate. The total is reported as an
/// integer currency amount.
pub fn price(day_rate: Decimal, days: u32) -> Decimal {
    if day_rate <= Decimal::ZERO || days == 0 {
        return Decimal::ZERO;
    }
    let weeks = Decimal::from(days / 5);
    let remaining = Decimal::from(days % 5);
    round_currency(weeks * weekly_rate(day_rate) + remaining * day_rate)
}
