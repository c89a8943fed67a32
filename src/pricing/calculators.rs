//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no database access and no I/O.
//! Transfers price as a base fare plus a per-kilometre rate; disposals
//! (hourly rentals with driver) price as an hourly rate times the
//! booked hours.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Round to specified decimal places using round-half-up
/// (MidpointAwayFromZero).
///
/// Customer-facing totals round the commercial way: exactly-halfway
/// values go away from zero.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use tunistransfer_web::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(3));
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// assert_eq!(round_money(dec!(1.235), 2), dec!(1.24));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Total price of a transfer: base fare plus per-km rate over the
/// driving distance, rounded to 2 decimals.
pub fn transfer_price(base_price: Decimal, price_per_km: Decimal, distance_km: Decimal) -> Decimal {
    round_money(base_price + price_per_km * distance_km, 2)
}

/// Total price of a disposal: hourly rate times booked hours, rounded
/// to 2 decimals.
pub fn disposal_price(price_per_hour: Decimal, hours: Decimal) -> Decimal {
    round_money(price_per_hour * hours, 2)
}
