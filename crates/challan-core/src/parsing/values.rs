use crate::error::ChallanError;
use crate::parsing::fields::Field;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Strip thousands separators, currency symbols and surrounding whitespace.
///
/// Handles both grouping styles seen on challans:
/// - "123,456" -> "123456"
/// - "1,23,456" -> "123456" (Indian lakh grouping)
/// - "₹ 10,300.00" -> "10300.00"
pub fn clean_amount(s: &str) -> String {
    s.trim()
        .trim_start_matches('₹')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect()
}

/// Parse an amount string into a Decimal.
///
/// A comma is always a thousands separator here, never a decimal mark.
/// Returns `None` for anything that is not a number once cleaned.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    Decimal::from_str(&clean_amount(s)).ok()
}

/// Parse a deposit date in the receipt's `DD-Mon-YYYY` form, e.g. "07-May-2023".
pub fn parse_deposit_date(s: &str) -> Result<NaiveDate, ChallanError> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%d-%b-%Y").map_err(|e| ChallanError::MissingRequiredField {
        field: Field::DepositDate,
        reason: format!("unparseable date '{}': {}", s, e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_plain_integer() {
        assert_eq!(parse_amount("10000").unwrap(), dec!(10000));
    }

    #[test]
    fn test_western_grouping() {
        assert_eq!(parse_amount("123,456").unwrap(), dec!(123456));
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(parse_amount("1,23,456").unwrap(), dec!(123456));
    }

    #[test]
    fn test_decimals_preserved() {
        assert_eq!(parse_amount("10,300.50").unwrap(), dec!(10300.50));
    }

    #[test]
    fn test_currency_symbol_and_spaces() {
        assert_eq!(parse_amount(" ₹ 10,300 ").unwrap(), dec!(10300));
    }

    #[test]
    fn test_invalid_amount() {
        assert!(parse_amount("abc").is_none());
        assert!(parse_amount("").is_none());
        assert!(parse_amount("1.2.3").is_none());
    }

    #[test]
    fn test_deposit_date() {
        assert_eq!(
            parse_deposit_date("07-May-2023").unwrap(),
            NaiveDate::from_ymd_opt(2023, 5, 7).unwrap()
        );
    }

    #[test]
    fn test_deposit_date_case_insensitive_month() {
        assert_eq!(
            parse_deposit_date("15-JAN-2024").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
    }

    #[test]
    fn test_deposit_date_other_formats_rejected() {
        assert!(parse_deposit_date("2023-05-07").is_err());
        assert!(parse_deposit_date("07/05/2023").is_err());
        assert!(parse_deposit_date("31-Feb-2023").is_err());
    }
}
