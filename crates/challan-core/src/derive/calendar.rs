use chrono::{Datelike, Months, NaiveDate};

use crate::error::ChallanError;

/// First day of the month `date` falls in.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the month `months` before `date`'s month.
pub fn months_before(date: NaiveDate, months: u32) -> Result<NaiveDate, ChallanError> {
    first_of_month(date)
        .checked_sub_months(Months::new(months))
        .ok_or_else(|| {
            ChallanError::DateOutOfRange(format!("{date} minus {months} month(s)"))
        })
}

/// `day` of the month `months` after `month_start`'s month.
pub fn day_in_month_after(
    month_start: NaiveDate,
    months: u32,
    day: u32,
) -> Result<NaiveDate, ChallanError> {
    first_of_month(month_start)
        .checked_add_months(Months::new(months))
        .and_then(|d| d.with_day(day))
        .ok_or_else(|| {
            ChallanError::DateOutOfRange(format!(
                "day {day} of {months} month(s) after {month_start}"
            ))
        })
}

/// Whole days from `from` to `to`, floored at zero.
pub fn days_late(from: NaiveDate, to: NaiveDate) -> u32 {
    let days = (to - from).num_days().max(0);
    u32::try_from(days).unwrap_or(u32::MAX)
}
