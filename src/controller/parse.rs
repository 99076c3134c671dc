use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::InputError;

/// Parse a user-typed amount. Thousands separators (`,`) are stripped and
/// surrounding whitespace ignored; plain and scientific notation are accepted.
pub(crate) fn parse_amount(raw: &str) -> Result<Decimal, InputError> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    let invalid = || InputError::InvalidAmount(raw.to_string());

    if cleaned.is_empty() {
        return Err(invalid());
    }

    let parsed = if cleaned.contains(['e', 'E']) {
        Decimal::from_scientific(&cleaned)
    } else {
        Decimal::from_str(&cleaned)
    };
    parsed.map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_plain() {
        assert_eq!(parse_amount("50").unwrap(), dec!(50));
        assert_eq!(parse_amount("250.75").unwrap(), dec!(250.75));
    }

    #[test]
    fn test_parse_strips_thousands_separators() {
        assert_eq!(parse_amount("1,234.50").unwrap(), dec!(1234.50));
        assert_eq!(parse_amount("1,000,000").unwrap(), dec!(1000000));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_amount("  42.10 ").unwrap(), dec!(42.10));
    }

    #[test]
    fn test_parse_signed() {
        assert_eq!(parse_amount("-3.5").unwrap(), dec!(-3.5));
    }

    #[test]
    fn test_parse_scientific() {
        assert_eq!(parse_amount("1.5e3").unwrap(), dec!(1500));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["abc", "", "   ", ",", "12abc", "1.2.3", "inf", "nan", "$5"] {
            assert_eq!(
                parse_amount(input),
                Err(InputError::InvalidAmount(input.to_string())),
                "accepted {input:?}"
            );
        }
    }
}
