//! Lenient parsing of monetary form input.
//!
//! Amounts arrive as whatever the user typed. Anything that is not a number
//! is read as zero; a number followed by junk keeps its leading numeric part.
//! Negative amounts pass through untouched.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

/// Parses a raw monetary input, coercing anything unparseable to zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::parse_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_amount("5000"), Decimal::new(5000, 0));
/// assert_eq!(parse_amount("12.5abc"), Decimal::new(125, 1));
/// assert_eq!(parse_amount(""), Decimal::ZERO);
/// assert_eq!(parse_amount("n/a"), Decimal::ZERO);
/// ```
pub fn parse_amount(raw: &str) -> Decimal {
    let Some(literal) = numeric_prefix(raw.trim_start()) else {
        return Decimal::ZERO;
    };

    let parsed = if literal.contains('e') {
        Decimal::from_scientific(&literal)
    } else {
        Decimal::from_str(&literal)
    };
    parsed.unwrap_or(Decimal::ZERO)
}

/// Parses an optional raw input; absent input is zero.
pub fn parse_optional_amount(raw: Option<&str>) -> Decimal {
    raw.map(parse_amount).unwrap_or(Decimal::ZERO)
}

/// Extracts the longest leading decimal literal, normalised so the decimal
/// parsers accept it (`".5"` becomes `"0.5"`, `"+7"` becomes `"7"`).
fn numeric_prefix(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut pos = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            pos = 1;
            true
        }
        Some(b'+') => {
            pos = 1;
            false
        }
        _ => false,
    };

    let int_len = digits_from(pos);
    let int_part = &input[pos..pos + int_len];
    pos += int_len;

    let mut frac_part = "";
    if bytes.get(pos) == Some(&b'.') {
        let frac_len = digits_from(pos + 1);
        if frac_len > 0 {
            frac_part = &input[pos + 1..pos + 1 + frac_len];
            pos += 1 + frac_len;
        }
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut literal = String::with_capacity(pos + 8);
    if negative {
        literal.push('-');
    }
    literal.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        literal.push('.');
        literal.push_str(frac_part);
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp_pos = pos + 1;
        let exp_negative = match bytes.get(exp_pos) {
            Some(b'-') => {
                exp_pos += 1;
                true
            }
            Some(b'+') => {
                exp_pos += 1;
                false
            }
            _ => false,
        };
        let exp_len = digits_from(exp_pos);
        if exp_len > 0 {
            literal.push('e');
            if exp_negative {
                literal.push('-');
            }
            literal.push_str(&input[exp_pos..exp_pos + exp_len]);
        }
    }

    Some(literal)
}

/// A monetary value exactly as submitted.
///
/// Deserializes from either a JSON string or a JSON number, so form posts and
/// typed API clients are both accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RawAmount(pub String);

impl RawAmount {
    /// Returns the coerced decimal value.
    pub fn amount(&self) -> Decimal {
        parse_amount(&self.0)
    }
}

impl From<&str> for RawAmount {
    fn from(raw: &str) -> Self {
        RawAmount(raw.to_string())
    }
}

impl<'de> Deserialize<'de> for RawAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RawAmountVisitor;

        impl Visitor<'_> for RawAmountVisitor {
            type Value = RawAmount;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number or a numeric string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<RawAmount, E> {
                Ok(RawAmount(value.to_string()))
            }

            fn visit_string<E: de::Error>(self, value: String) -> Result<RawAmount, E> {
                Ok(RawAmount(value))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<RawAmount, E> {
                Ok(RawAmount(value.to_string()))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<RawAmount, E> {
                Ok(RawAmount(value.to_string()))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<RawAmount, E> {
                Ok(RawAmount(value.to_string()))
            }
        }

        deserializer.deserialize_any(RawAmountVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_plain_integer() {
        assert_eq!(parse_amount("5000"), dec("5000"));
    }

    #[test]
    fn test_plain_decimal() {
        assert_eq!(parse_amount("1234.56"), dec("1234.56"));
    }

    #[test]
    fn test_blank_and_whitespace_are_zero() {
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("   "), Decimal::ZERO);
        assert_eq!(parse_optional_amount(None), Decimal::ZERO);
    }

    #[test]
    fn test_non_numeric_is_zero() {
        assert_eq!(parse_amount("abc"), Decimal::ZERO);
        assert_eq!(parse_amount("-"), Decimal::ZERO);
        assert_eq!(parse_amount("."), Decimal::ZERO);
        assert_eq!(parse_amount("$100"), Decimal::ZERO);
    }

    #[test]
    fn test_leading_numeric_prefix_is_kept() {
        assert_eq!(parse_amount("12.5abc"), dec("12.5"));
        assert_eq!(parse_amount("1,000"), dec("1"));
        assert_eq!(parse_amount("  42  "), dec("42"));
    }

    #[test]
    fn test_negative_values_pass_through() {
        assert_eq!(parse_amount("-300"), dec("-300"));
        assert_eq!(parse_amount("-0.75"), dec("-0.75"));
    }

    #[test]
    fn test_sign_and_dot_variants() {
        assert_eq!(parse_amount("+7"), dec("7"));
        assert_eq!(parse_amount(".5"), dec("0.5"));
        assert_eq!(parse_amount("5."), dec("5"));
    }

    #[test]
    fn test_exponent_notation() {
        assert_eq!(parse_amount("1e3"), dec("1000"));
        assert_eq!(parse_amount("2.5E-1"), dec("0.25"));
        // exponent without digits is ignored
        assert_eq!(parse_amount("3e"), dec("3"));
    }

    #[test]
    fn test_out_of_range_is_zero() {
        assert_eq!(parse_amount("1e400"), Decimal::ZERO);
    }

    #[test]
    fn test_raw_amount_from_string_or_number() {
        let from_string: RawAmount = serde_json::from_str("\"200\"").unwrap();
        let from_int: RawAmount = serde_json::from_str("200").unwrap();
        let from_float: RawAmount = serde_json::from_str("200.5").unwrap();

        assert_eq!(from_string.amount(), dec("200"));
        assert_eq!(from_int.amount(), dec("200"));
        assert_eq!(from_float.amount(), dec("200.5"));
    }

    #[test]
    fn test_raw_amount_rejects_non_scalar() {
        assert!(serde_json::from_str::<RawAmount>("[1]").is_err());
        assert!(serde_json::from_str::<RawAmount>("true").is_err());
    }
}
