//! Field parsing shared by the statement formats.

use crate::error::{Error, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Date formats accepted in CSV exports, tried in order.
pub const CSV_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", // 2023-01-05
    "%m/%d/%Y", // 01/05/2023, 1/5/2023
];

/// How a signed amount maps onto the debit/credit pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignConvention {
    /// Negative amounts are money spent (bank accounts, Scotia, RBC).
    NegativeIsDebit,
    /// Positive amounts are charges (American Express).
    PositiveIsDebit,
}

impl SignConvention {
    /// Split a signed amount into non-negative `(debit, credit)`; at most one is non-zero.
    pub fn split(self, amount: Decimal) -> (Decimal, Decimal) {
        match self {
            SignConvention::NegativeIsDebit if amount.is_sign_negative() && !amount.is_zero() => {
                (amount.abs(), Decimal::ZERO)
            }
            SignConvention::NegativeIsDebit => (Decimal::ZERO, amount.abs()),
            SignConvention::PositiveIsDebit if amount.is_sign_positive() && !amount.is_zero() => {
                (amount, Decimal::ZERO)
            }
            SignConvention::PositiveIsDebit => (Decimal::ZERO, amount.abs()),
        }
    }
}

/// Parse a date trying each format in turn.
pub fn parse_date(date_str: &str, formats: &[&str]) -> Result<NaiveDate> {
    let trimmed = date_str.trim();
    formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| Error::InvalidDate(date_str.to_string()))
}

/// Parse an amount, tolerating currency symbols, thousands separators and spaces.
pub fn parse_amount(amount_str: &str) -> Result<Decimal> {
    let cleaned: String = amount_str
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| Error::InvalidAmount(amount_str.to_string()))
}

/// Parse an amount where an empty cell means zero.
pub fn parse_optional_amount(amount_str: &str) -> Result<Decimal> {
    if amount_str.trim().is_empty() {
        Ok(Decimal::ZERO)
    } else {
        parse_amount(amount_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_date_iso_and_us() {
        let expected = NaiveDate::from_ymd_opt(2023, 1, 5).unwrap();
        assert_eq!(parse_date("2023-01-05", CSV_DATE_FORMATS).unwrap(), expected);
        assert_eq!(parse_date("01/05/2023", CSV_DATE_FORMATS).unwrap(), expected);
        assert_eq!(parse_date("1/5/2023", CSV_DATE_FORMATS).unwrap(), expected);
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        let err = parse_date("yesterday", CSV_DATE_FORMATS).unwrap_err();
        assert!(matches!(err, Error::InvalidDate(s) if s == "yesterday"));
    }

    #[test]
    fn test_parse_amount_currency_string() {
        assert_eq!(parse_amount("$1,234.56").unwrap(), Decimal::new(123456, 2));
        assert_eq!(parse_amount("-$12.00").unwrap(), Decimal::new(-1200, 2));
        assert_eq!(parse_amount(" 4.50 ").unwrap(), Decimal::new(450, 2));
    }

    #[test]
    fn test_parse_amount_invalid() {
        assert!(matches!(parse_amount("twelve"), Err(Error::InvalidAmount(_))));
        assert!(matches!(parse_amount(""), Err(Error::InvalidAmount(_))));
    }

    #[test]
    fn test_parse_optional_amount_empty_is_zero() {
        assert_eq!(parse_optional_amount("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_optional_amount("  ").unwrap(), Decimal::ZERO);
        assert_eq!(parse_optional_amount("7.25").unwrap(), Decimal::new(725, 2));
    }

    #[test]
    fn test_split_negative_is_debit() {
        let conv = SignConvention::NegativeIsDebit;
        assert_eq!(conv.split(Decimal::new(-1999, 2)), (Decimal::new(1999, 2), Decimal::ZERO));
        assert_eq!(conv.split(Decimal::new(450, 2)), (Decimal::ZERO, Decimal::new(450, 2)));
        assert_eq!(conv.split(Decimal::ZERO), (Decimal::ZERO, Decimal::ZERO));
    }

    #[test]
    fn test_split_positive_is_debit() {
        let conv = SignConvention::PositiveIsDebit;
        assert_eq!(conv.split(Decimal::new(8500, 2)), (Decimal::new(8500, 2), Decimal::ZERO));
        assert_eq!(conv.split(Decimal::new(-2000, 2)), (Decimal::ZERO, Decimal::new(2000, 2)));
        assert_eq!(conv.split(Decimal::ZERO), (Decimal::ZERO, Decimal::ZERO));
    }
}
