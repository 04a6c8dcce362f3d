//! Monthly spending totals for charting a calendar year.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Month;

use crate::{Error, date_range::month_abbrev, expense::ExpenseStore};

/// The spending for one month of a year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    /// The month number, 1 for January through 12 for December.
    pub month: u8,
    /// The sum of the expenses in the month.
    #[serde(with = "rust_decimal::serde::float")]
    pub spending: Decimal,
    /// The three letter month name, e.g. "Jan".
    pub name: String,
}

/// The spending for each of the twelve months of `year`, January first.
///
/// # Errors
/// Returns an error if the store fails or `year` is outside the supported calendar.
pub fn monthly_trends<S>(store: &S, year: i32) -> Result<Vec<MonthlyTrend>, Error>
where
    S: ExpenseStore + ?Sized,
{
    let mut trends = Vec::with_capacity(12);
    let mut month = Month::January;

    for _ in 0..12 {
        trends.push(MonthlyTrend {
            month: month as u8,
            spending: store.monthly_spending(year, month)?,
            name: month_abbrev(month).to_owned(),
        });
        month = month.next();
    }

    Ok(trends)
}
