use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid number '{input}': {reason}")]
pub struct ParseNumberError {
    input: String,
    reason: String,
}

impl ParseNumberError {
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Normalizes input for numeric parsing: trims whitespace and removes commas (thousands separator).
fn normalize_number_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Returns `true` for empty or whitespace-only input.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Parses a string into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`).
/// Callers decide beforehand whether blank input is allowed; here it is an error.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseNumberError> {
    let normalized = normalize_number_input(s);
    normalized.parse().map_err(|e: rust_decimal::Error| {
        tracing::debug!(input = %s, "invalid decimal: {}", e);
        ParseNumberError {
            input: s.to_string(),
            reason: e.to_string(),
        }
    })
}

/// Parses a string into an optional [`Decimal`]; blank input is `None`.
pub fn parse_optional_decimal(s: &str) -> Result<Option<Decimal>, ParseNumberError> {
    if is_blank(s) {
        Ok(None)
    } else {
        parse_decimal(s).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_decimal_accepts_comma_thousands_separator() {
        assert_eq!(parse_decimal("1,234.56").unwrap(), dec!(1234.56));
    }

    #[test]
    fn parse_decimal_trim_whitespace() {
        assert_eq!(parse_decimal("  0.5  ").unwrap(), dec!(0.5));
    }

    #[test]
    fn parse_decimal_rejects_blank_and_garbage() {
        assert!(parse_decimal("").is_err());
        assert_eq!(parse_decimal("abc").unwrap_err().input(), "abc");
    }

    #[test]
    fn parse_optional_decimal_blank_is_none() {
        assert_eq!(parse_optional_decimal("").unwrap(), None);
        assert_eq!(parse_optional_decimal("   ").unwrap(), None);
        assert_eq!(parse_optional_decimal("0").unwrap(), Some(dec!(0)));
    }

    #[test]
    fn parse_decimal_keeps_fractions_and_negatives() {
        assert_eq!(parse_decimal("12,000").unwrap(), dec!(12000));
        assert_eq!(parse_decimal("10.5").unwrap(), dec!(10.5));
        assert_eq!(parse_decimal("-5").unwrap(), dec!(-5));
    }
}
