use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount with two decimals behind the currency symbol, e.g. `$3.50`.
pub fn format_money(amount: Decimal, currency: char) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{currency}{:.2}", rounded)
}
