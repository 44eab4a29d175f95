//! Numeric types for odds, probabilities and monetary amounts.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal odds (stake multiplier including the stake itself).
pub type Odds = Decimal;

/// Probability in `[0, 1]`, represented as a Decimal for precision.
pub type Probability = Decimal;

/// Monetary amount in the caller's currency.
pub type Amount = Decimal;

/// Round an amount to the smallest currency unit (`decimals` places).
///
/// Midpoints round away from zero, matching how prices are usually quoted.
#[must_use]
pub fn round_to_unit(amount: Amount, decimals: u32) -> Amount {
    amount.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
}

/// Size of the smallest currency unit for `decimals` places (e.g. `0.01`).
#[must_use]
pub fn currency_unit(decimals: u32) -> Amount {
    Decimal::new(1, decimals)
}
