//! Defines the expense store trait.

use std::{
    ops::RangeInclusive,
    sync::{Arc, Mutex, MutexGuard},
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, Month};

use crate::{
    Error,
    database_id::ExpenseId,
    date_range::{month_range, week_range},
    expense::{Category, Expense, ExpenseChanges, NewExpense},
};

/// Handles the creation, retrieval and aggregation of expenses.
///
/// Missing expenses are signalled with `None` or `false`, never with an error.
/// Errors are reserved for faults in the underlying storage.
pub trait ExpenseStore {
    /// Create a new expense, assigning the next ID and the creation time.
    fn create(&mut self, expense: NewExpense) -> Result<Expense, Error>;

    /// Retrieve every expense, most recent date first.
    fn get_all(&self) -> Result<Vec<Expense>, Error>;

    /// Retrieve a single expense.
    fn get(&self, id: ExpenseId) -> Result<Option<Expense>, Error>;

    /// Merge `changes` into an existing expense and return the updated expense.
    ///
    /// Returns `None` and leaves the store untouched if `id` does not exist.
    fn update(&mut self, id: ExpenseId, changes: ExpenseChanges)
    -> Result<Option<Expense>, Error>;

    /// Remove an expense, returning whether an expense was actually removed.
    fn delete(&mut self, id: ExpenseId) -> Result<bool, Error>;

    /// Retrieve the expenses dated within `range` (inclusive).
    fn get_by_date_range(&self, range: RangeInclusive<Date>) -> Result<Vec<Expense>, Error>;

    /// The total and number of expenses for each category that has at least one expense.
    fn totals_by_category(&self) -> Result<Vec<CategoryTotal>, Error>;

    /// The sum of every expense, zero if there are none.
    fn total_spending(&self) -> Result<Decimal, Error>;

    /// The sum of the expenses dated within `month` of `year`.
    fn monthly_spending(&self, year: i32, month: Month) -> Result<Decimal, Error> {
        let expenses = self.get_by_date_range(month_range(year, month)?)?;

        Ok(sum_amounts(&expenses))
    }

    /// The sum of the expenses dated within the seven days starting on `week_start`.
    fn weekly_spending(&self, week_start: Date) -> Result<Decimal, Error> {
        let expenses = self.get_by_date_range(week_range(week_start))?;

        Ok(sum_amounts(&expenses))
    }
}

/// The combined spending for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// The category the expenses belong to.
    pub category: Category,
    /// The sum of the expense amounts.
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    /// The number of expenses.
    pub count: usize,
}

/// Add up the amounts of `expenses`.
pub fn sum_amounts(expenses: &[Expense]) -> Decimal {
    expenses.iter().map(|expense| expense.amount).sum()
}

/// An expense store that can be shared between request handlers.
pub type SharedExpenseStore = Arc<Mutex<dyn ExpenseStore + Send>>;

/// Acquire the lock on a shared store.
///
/// # Errors
/// Returns [Error::StoreLockError] if another thread panicked while holding the lock.
pub fn lock_store(
    store: &SharedExpenseStore,
) -> Result<MutexGuard<'_, dyn ExpenseStore + Send + 'static>, Error> {
    store.lock().map_err(|error| {
        tracing::error!("Could not acquire the expense store lock: {error}");
        Error::StoreLockError
    })
}
