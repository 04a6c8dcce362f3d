//! The financial summary: balance, recent spending and how it compares to the
//! previous period.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, Duration};

use crate::{
    Error,
    date_range::{previous_month, start_of_week},
    expense::ExpenseStore,
};

/// The balance assumed to exist before any expenses were recorded.
pub const DEFAULT_STARTING_BALANCE: i64 = 5000;

/// Derived report combining balance, spending totals and period-over-period changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    /// The starting balance minus every expense, may be negative.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_balance: Decimal,
    /// The spending in the current calendar month.
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_spending: Decimal,
    /// The spending in the current week, starting on Monday.
    #[serde(with = "rust_decimal::serde::float")]
    pub weekly_spending: Decimal,
    /// The percentage change in spending from the previous month.
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_change: Decimal,
    /// The percentage change in spending from the previous week.
    #[serde(with = "rust_decimal::serde::float")]
    pub weekly_change: Decimal,
    /// The remaining balance as a percentage of the starting balance, never negative.
    #[serde(with = "rust_decimal::serde::float")]
    pub savings_percentage: Decimal,
}

/// Build the [FinancialSummary] for the month and week containing `today`.
///
/// # Errors
/// Returns an error if the store fails or `today` is at the edge of the supported calendar.
pub fn summarize<S>(
    store: &S,
    today: Date,
    starting_balance: Decimal,
) -> Result<FinancialSummary, Error>
where
    S: ExpenseStore + ?Sized,
{
    let total_spending = store.total_spending()?;

    let (year, month) = (today.year(), today.month());
    let monthly_spending = store.monthly_spending(year, month)?;
    let (previous_year, previous_month) = previous_month(year, month);
    let previous_month_spending = store.monthly_spending(previous_year, previous_month)?;

    let week_start = start_of_week(today);
    let weekly_spending = store.weekly_spending(week_start)?;
    let previous_week_start = week_start
        .checked_sub(Duration::days(7))
        .ok_or_else(|| Error::DateOutOfRange(format!("the week before {week_start}")))?;
    let previous_week_spending = store.weekly_spending(previous_week_start)?;

    let total_balance = starting_balance - total_spending;

    Ok(FinancialSummary {
        total_balance,
        monthly_spending,
        weekly_spending,
        monthly_change: percentage_change(monthly_spending, previous_month_spending),
        weekly_change: percentage_change(weekly_spending, previous_week_spending),
        savings_percentage: savings_percentage(total_balance, starting_balance),
    })
}

/// The change from `previous` to `current` as a percentage of `previous`.
///
/// Zero when there was no previous spending, whatever the current spending is.
pub fn percentage_change(current: Decimal, previous: Decimal) -> Decimal {
    if previous <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    (current - previous)
        .checked_div(previous)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// The remaining balance as a percentage of the starting balance, clamped at zero.
pub fn savings_percentage(total_balance: Decimal, starting_balance: Decimal) -> Decimal {
    if starting_balance <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    total_balance
        .checked_div(starting_balance)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use time::{Date, macros::date};

    use crate::{
        analytics::summary::{percentage_change, savings_percentage, summarize},
        expense::{Category, ExpenseStore, MemoryExpenseStore, NewExpense},
    };

    fn store_with(expenses: &[(Decimal, Date)]) -> MemoryExpenseStore {
        let mut store = MemoryExpenseStore::new();

        for &(amount, date) in expenses {
            store
                .create(NewExpense {
                    amount,
                    category: Category::Other,
                    description: "test".to_owned(),
                    date,
                })
                .expect("could not create test expense");
        }

        store
    }

    #[test]
    fn balance_and_savings_from_total_spending() {
        let store = store_with(&[(dec!(200.00), date!(2023 - 05 - 01))]);

        let summary = summarize(&store, date!(2024 - 03 - 15), dec!(5000)).unwrap();

        assert_eq!(summary.total_balance, dec!(4800));
        assert_eq!(summary.savings_percentage, dec!(96.0));
    }

    #[test]
    fn savings_percentage_never_negative() {
        assert_eq!(savings_percentage(dec!(-250), dec!(5000)), Decimal::ZERO);
        assert_eq!(savings_percentage(dec!(5000), dec!(5000)), dec!(100));
    }

    #[test]
    fn change_is_zero_without_previous_spending() {
        assert_eq!(percentage_change(dec!(123.45), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(percentage_change(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn change_is_relative_to_previous_spending() {
        assert_eq!(percentage_change(dec!(150), dec!(100)), dec!(50));
        assert_eq!(percentage_change(dec!(50), dec!(100)), dec!(-50));
        assert_eq!(percentage_change(Decimal::ZERO, dec!(100)), dec!(-100));
    }

    #[test]
    fn compares_current_and_previous_periods() {
        // 2024-03-13 is a Wednesday, so the current week starts on 2024-03-11.
        let store = store_with(&[
            (dec!(40.00), date!(2024 - 02 - 10)),
            (dec!(20.00), date!(2024 - 03 - 05)),
            (dec!(40.00), date!(2024 - 03 - 12)),
        ]);

        let summary = summarize(&store, date!(2024 - 03 - 13), dec!(5000)).unwrap();

        assert_eq!(summary.monthly_spending, dec!(60.00));
        assert_eq!(summary.monthly_change, dec!(50));
        assert_eq!(summary.weekly_spending, dec!(40.00));
        assert_eq!(summary.weekly_change, dec!(100));
        assert_eq!(summary.total_balance, dec!(4900.00));
    }

    #[test]
    fn january_compares_with_previous_december() {
        let store = store_with(&[
            (dec!(100.00), date!(2023 - 12 - 31)),
            (dec!(25.00), date!(2024 - 01 - 02)),
        ]);

        let summary = summarize(&store, date!(2024 - 01 - 20), dec!(5000)).unwrap();

        assert_eq!(summary.monthly_spending, dec!(25.00));
        assert_eq!(summary.monthly_change, dec!(-75));
    }

    #[test]
    fn sunday_belongs_to_week_starting_previous_monday() {
        // 2024-03-17 is a Sunday, its week starts on Monday 2024-03-11.
        let store = store_with(&[
            (dec!(10.00), date!(2024 - 03 - 10)),
            (dec!(30.00), date!(2024 - 03 - 11)),
            (dec!(5.00), date!(2024 - 03 - 17)),
        ]);

        let summary = summarize(&store, date!(2024 - 03 - 17), dec!(5000)).unwrap();

        assert_eq!(summary.weekly_spending, dec!(35.00));
        assert_eq!(summary.weekly_change, dec!(250));
    }

    #[test]
    fn empty_store_summary() {
        let store = MemoryExpenseStore::new();

        let summary = summarize(&store, date!(2024 - 03 - 13), dec!(5000)).unwrap();

        assert_eq!(summary.total_balance, dec!(5000));
        assert_eq!(summary.monthly_spending, Decimal::ZERO);
        assert_eq!(summary.weekly_spending, Decimal::ZERO);
        assert_eq!(summary.monthly_change, Decimal::ZERO);
        assert_eq!(summary.weekly_change, Decimal::ZERO);
        assert_eq!(summary.savings_percentage, dec!(100));
    }
}
