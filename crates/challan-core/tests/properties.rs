//! Property tests for amount parsing and the derived date fields.

use chrono::{Datelike, Months, NaiveDate};
use challan_core::derive::derive;
use challan_core::parsing::fields::{ExtractedFields, Field};
use challan_core::parsing::values::parse_amount;
use challan_core::policy::schema::ChallanPolicy;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Western grouping: 123,456,789.
fn group_western(digits: &str) -> String {
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Indian grouping: 12,34,56,789.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::new();
    for (i, c) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    format!("{out},{tail}")
}

fn deposit_date() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

/// Tax with an interest of at most a fifth of it, i.e. at most 14 months late.
fn tax_and_interest(min_tax: u64) -> impl Strategy<Value = (u64, u64)> {
    (min_tax..10_000_000u64).prop_flat_map(move |tax| (Just(tax), min_tax.min(1)..=tax / 5))
}

fn fields(date: NaiveDate, tax: u64, interest: u64) -> ExtractedFields {
    ExtractedFields::new()
        .with(Field::DepositDate, date.format("%d-%b-%Y").to_string())
        .with(Field::Tax, tax.to_string())
        .with(Field::Interest, interest.to_string())
}

proptest! {
    #[test]
    fn separators_do_not_change_value(n in 0u64..1_000_000_000_000) {
        let digits = n.to_string();
        let expected = Some(Decimal::from(n));
        prop_assert_eq!(parse_amount(&group_western(&digits)), expected);
        prop_assert_eq!(parse_amount(&group_indian(&digits)), expected);
        prop_assert_eq!(parse_amount(&format!("₹ {}", group_indian(&digits))), expected);
    }

    #[test]
    fn due_date_is_seventh_of_month_after_accounting_month(
        date in deposit_date(),
        (tax, interest) in tax_and_interest(0),
    ) {
        let r = derive(&fields(date, tax, interest), &ChallanPolicy::default()).unwrap();
        prop_assert_eq!(r.due_date.day(), 7);
        prop_assert_eq!(r.accounting_month.day(), 1);
        prop_assert_eq!(
            r.accounting_month.checked_add_months(Months::new(1)).unwrap(),
            r.due_date.with_day(1).unwrap()
        );
    }

    #[test]
    fn delay_days_never_negative(
        date in deposit_date(),
        (tax, interest) in tax_and_interest(0),
    ) {
        let r = derive(&fields(date, tax, interest), &ChallanPolicy::default()).unwrap();
        let expected = (r.deposit_date - r.due_date).num_days().max(0);
        prop_assert_eq!(i64::from(r.delay_days), expected);
    }

    #[test]
    fn delay_months_follows_interest(
        date in deposit_date(),
        (tax, interest) in tax_and_interest(10),
    ) {
        let policy = ChallanPolicy::default();
        let r = derive(&fields(date, tax, interest), &policy).unwrap();
        let expected = (Decimal::from(interest)
            / (Decimal::from(tax) * policy.interest_rate_per_month))
            .ceil();
        prop_assert_eq!(Decimal::from(r.delay_months), expected);
    }
}
