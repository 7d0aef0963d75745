use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use feed_core::presentation::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount with exactly two decimals; `None` renders as `0.00`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use feed_core::presentation::format_amount;
///
/// assert_eq!(format_amount(Some(dec!(12.5))), "12.50");
/// assert_eq!(format_amount(Some(dec!(0.125))), "0.13");
/// assert_eq!(format_amount(None), "0.00");
/// ```
pub fn format_amount(value: Option<Decimal>) -> String {
    let mut rounded = round_half_up(value.unwrap_or(Decimal::ZERO));
    rounded.rescale(2);
    rounded.to_string()
}

/// Formats a count without padding or trailing zeros; `None` renders as `0`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use feed_core::presentation::format_count;
///
/// assert_eq!(format_count(Some(dec!(90.0))), "90");
/// assert_eq!(format_count(None), "0");
/// ```
pub fn format_count(value: Option<Decimal>) -> String {
    value.unwrap_or(Decimal::ZERO).normalize().to_string()
}

/// Joins feeding times with `", "`.
pub fn join_feeding_times(times: &[String]) -> String {
    times.join(", ")
}

/// Display label for a species identifier: first letter upper-cased, the
/// rest untouched (`"catfish"` → `"Catfish"`).
pub fn species_label(species: &str) -> String {
    let mut chars = species.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
