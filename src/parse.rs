use std::str::FromStr;

use rust_decimal::Decimal;

use crate::errors::LedgerError;

fn with_point_separator(input: &str, decimal_sep: char) -> Option<String> {
    match decimal_sep {
        '.' => Some(input.to_string()),
        // a point is a thousands separator in these locales, which we do not accept
        ',' if !input.contains('.') => Some(input.replacen(',', ".", 1)),
        _ => None,
    }
}

fn is_numeric(input: &str) -> bool {
    let unsigned = input.strip_prefix(['+', '-']).unwrap_or(input);
    let mut seen_separator = false;
    let mut seen_digit = false;
    for c in unsigned.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_separator => seen_separator = true,
            _ => return false,
        }
    }
    seen_digit
}

/// Parses a price typed by the user.
///
/// Leading and trailing whitespace is ignored. `decimal_sep` selects whether
/// `.` or `,` separates the cents. Negative values are rejected because a
/// ledger line is always an expense.
pub fn parse_price(input: &str, decimal_sep: char) -> Result<Decimal, LedgerError> {
    let trimmed = input.trim();
    let invalid = || LedgerError::InvalidPrice(trimmed.to_string());

    let normalized = with_point_separator(trimmed, decimal_sep).ok_or_else(invalid)?;
    if !is_numeric(&normalized) {
        return Err(invalid());
    }
    let value = Decimal::from_str(&normalized).map_err(|_| invalid())?;
    if value.is_zero() {
        return Ok(Decimal::ZERO);
    }
    if value.is_sign_negative() {
        return Err(invalid());
    }
    Ok(value)
}
