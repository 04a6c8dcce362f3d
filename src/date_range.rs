//! Calendar helpers for the month and week windows used by the analytics.

use std::ops::RangeInclusive;

use time::{Date, Duration, Month};

use crate::Error;

/// The inclusive range covering every day of `month` in `year`.
///
/// # Errors
/// Returns [Error::DateOutOfRange] if `year` is outside the supported range.
pub fn month_range(year: i32, month: Month) -> Result<RangeInclusive<Date>, Error> {
    let start = calendar_date(year, month, 1)?;
    let end = calendar_date(year, month, last_day_of_month(year, month))?;

    Ok(start..=end)
}

/// The inclusive seven day range starting on `week_start`.
pub fn week_range(week_start: Date) -> RangeInclusive<Date> {
    let end = week_start
        .checked_add(Duration::days(6))
        .unwrap_or(Date::MAX);

    week_start..=end
}

/// The Monday on or before `date`.
pub fn start_of_week(date: Date) -> Date {
    let days_since_monday = date.weekday().number_days_from_monday() as i64;

    date.checked_sub(Duration::days(days_since_monday))
        .unwrap_or(Date::MIN)
}

/// The year and month immediately before `month` in `year`.
pub fn previous_month(year: i32, month: Month) -> (i32, Month) {
    match month {
        Month::January => (year - 1, Month::December),
        month => (year, month.previous()),
    }
}

/// The same day in the month before `date`, clamped to the length of that month.
///
/// For example, the month before 31 March is 29 February in a leap year.
pub fn one_month_before(date: Date) -> Date {
    let (year, month) = previous_month(date.year(), date.month());
    let day = date.day().min(last_day_of_month(year, month));

    Date::from_calendar_date(year, month, day).unwrap_or(Date::MIN)
}

/// The three letter abbreviation for `month`, e.g. "Jan".
pub fn month_abbrev(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

fn calendar_date(year: i32, month: Month, day: u8) -> Result<Date, Error> {
    Date::from_calendar_date(year, month, day).map_err(|error| {
        Error::DateOutOfRange(format!("{year}-{}-{day}: {error}", month as u8))
    })
}

fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
