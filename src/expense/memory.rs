//! An [ExpenseStore] that keeps expenses in process memory.

use std::{
    cmp::Reverse,
    collections::{BTreeMap, btree_map::Entry},
    ops::RangeInclusive,
};

use rust_decimal::Decimal;
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    database_id::ExpenseId,
    expense::{Category, CategoryTotal, Expense, ExpenseChanges, ExpenseStore, NewExpense},
};

/// Stores expenses in a map keyed by ID.
///
/// Analytics queries scan every expense.
#[derive(Debug)]
pub struct MemoryExpenseStore {
    expenses: BTreeMap<ExpenseId, Expense>,
    next_id: ExpenseId,
}

impl MemoryExpenseStore {
    /// Create an empty store. The first expense will be given the ID 1.
    pub fn new() -> Self {
        Self {
            expenses: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl Default for MemoryExpenseStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseStore for MemoryExpenseStore {
    fn create(&mut self, expense: NewExpense) -> Result<Expense, Error> {
        let id = self.next_id;
        self.next_id += 1;

        let expense = expense.finalize(id, OffsetDateTime::now_utc());
        self.expenses.insert(id, expense.clone());
        tracing::debug!("Created expense {id}");

        Ok(expense)
    }

    fn get_all(&self) -> Result<Vec<Expense>, Error> {
        let mut expenses: Vec<Expense> = self.expenses.values().cloned().collect();
        // Sort by date, and then ID so that expenses on the same day keep a stable order.
        expenses.sort_by_key(|expense| Reverse((expense.date, expense.id)));

        Ok(expenses)
    }

    fn get(&self, id: ExpenseId) -> Result<Option<Expense>, Error> {
        Ok(self.expenses.get(&id).cloned())
    }

    fn update(
        &mut self,
        id: ExpenseId,
        changes: ExpenseChanges,
    ) -> Result<Option<Expense>, Error> {
        match self.expenses.entry(id) {
            Entry::Occupied(mut entry) => {
                changes.apply_to(entry.get_mut());
                tracing::debug!("Updated expense {id}");
                Ok(Some(entry.get().clone()))
            }
            Entry::Vacant(_) => Ok(None),
        }
    }

    fn delete(&mut self, id: ExpenseId) -> Result<bool, Error> {
        let deleted = self.expenses.remove(&id).is_some();

        if deleted {
            tracing::debug!("Deleted expense {id}");
        }

        Ok(deleted)
    }

    fn get_by_date_range(&self, range: RangeInclusive<Date>) -> Result<Vec<Expense>, Error> {
        Ok(self
            .expenses
            .values()
            .filter(|expense| range.contains(&expense.date))
            .cloned()
            .collect())
    }

    fn totals_by_category(&self) -> Result<Vec<CategoryTotal>, Error> {
        let mut totals: BTreeMap<Category, CategoryTotal> = BTreeMap::new();

        for expense in self.expenses.values() {
            let entry = totals
                .entry(expense.category)
                .or_insert_with(|| CategoryTotal {
                    category: expense.category,
                    total: Decimal::ZERO,
                    count: 0,
                });
            entry.total += expense.amount;
            entry.count += 1;
        }

        Ok(totals.into_values().collect())
    }

    fn total_spending(&self) -> Result<Decimal, Error> {
        Ok(self.expenses.values().map(|expense| expense.amount).sum())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use time::{Date, Month, macros::date};

    use crate::expense::{
        Category, ExpenseChanges, ExpenseStore, MemoryExpenseStore, NewExpense,
    };

    fn new_expense(amount: Decimal, category: Category, date: Date) -> NewExpense {
        NewExpense {
            amount,
            category,
            description: format!("{category} on {date}"),
            date,
        }
    }

    /// A store with 10.00, 20.00 and 30.00 spent on 2024-01-05, 2024-01-15 and 2024-02-01.
    fn store_with_three_expenses() -> MemoryExpenseStore {
        let mut store = MemoryExpenseStore::new();

        for (amount, category, date) in [
            (dec!(10.00), Category::Food, date!(2024 - 01 - 05)),
            (dec!(20.00), Category::Shopping, date!(2024 - 01 - 15)),
            (dec!(30.00), Category::Food, date!(2024 - 02 - 01)),
        ] {
            store
                .create(new_expense(amount, category, date))
                .expect("could not create test expense");
        }

        store
    }

    #[test]
    fn create_assigns_sequential_ids() {
        let mut store = MemoryExpenseStore::new();

        let first = store
            .create(new_expense(dec!(1.00), Category::Other, date!(2024 - 01 - 01)))
            .unwrap();
        let second = store
            .create(new_expense(dec!(2.00), Category::Other, date!(2024 - 01 - 01)))
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = MemoryExpenseStore::new();
        let expense = store
            .create(new_expense(dec!(1.00), Category::Other, date!(2024 - 01 - 01)))
            .unwrap();
        store.delete(expense.id).unwrap();

        let next = store
            .create(new_expense(dec!(1.00), Category::Other, date!(2024 - 01 - 01)))
            .unwrap();

        assert_eq!(next.id, 2);
    }

    #[test]
    fn get_returns_created_expense() {
        let mut store = MemoryExpenseStore::new();
        let created = store
            .create(new_expense(dec!(9.99), Category::Healthcare, date!(2024 - 03 - 03)))
            .unwrap();

        let got = store.get(created.id).unwrap();

        assert_eq!(got, Some(created));
    }

    #[test]
    fn get_missing_returns_none() {
        let store = store_with_three_expenses();

        assert_eq!(store.get(42).unwrap(), None);
    }

    #[test]
    fn get_all_sorts_by_date_descending() {
        let store = store_with_three_expenses();

        let dates: Vec<Date> = store
            .get_all()
            .unwrap()
            .iter()
            .map(|expense| expense.date)
            .collect();

        assert_eq!(
            dates,
            [
                date!(2024 - 02 - 01),
                date!(2024 - 01 - 15),
                date!(2024 - 01 - 05)
            ]
        );
    }

    #[test]
    fn get_all_puts_newer_expense_first_on_same_date() {
        let mut store = MemoryExpenseStore::new();
        for _ in 0..3 {
            store
                .create(new_expense(dec!(1.00), Category::Other, date!(2024 - 01 - 01)))
                .unwrap();
        }

        let ids: Vec<i64> = store.get_all().unwrap().iter().map(|e| e.id).collect();

        assert_eq!(ids, [3, 2, 1]);
    }

    #[test]
    fn update_merges_supplied_fields() {
        let mut store = store_with_three_expenses();
        let before = store.get(2).unwrap().unwrap();

        let updated = store
            .update(
                2,
                ExpenseChanges {
                    amount: Some(dec!(25.00)),
                    ..Default::default()
                },
            )
            .unwrap()
            .expect("expense should exist");

        assert_eq!(updated.amount, dec!(25.00));
        assert_eq!(updated.category, before.category);
        assert_eq!(updated.description, before.description);
        assert_eq!(updated.date, before.date);
        assert_eq!(updated.created_at, before.created_at);
        assert_eq!(store.get(2).unwrap(), Some(updated));
    }

    #[test]
    fn update_missing_leaves_store_unchanged() {
        let mut store = store_with_three_expenses();
        let before = store.get_all().unwrap();

        let got = store
            .update(
                42,
                ExpenseChanges {
                    description: Some("nope".to_owned()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(got, None);
        assert_eq!(store.get_all().unwrap(), before);
    }

    #[test]
    fn delete_succeeds_exactly_once() {
        let mut store = store_with_three_expenses();

        assert!(store.delete(1).unwrap());
        assert!(!store.delete(1).unwrap());
        assert_eq!(store.get(1).unwrap(), None);
        assert_eq!(store.get_all().unwrap().len(), 2);
    }

    #[test]
    fn date_range_is_inclusive() {
        let store = store_with_three_expenses();

        let got: Vec<i64> = store
            .get_by_date_range(date!(2024 - 01 - 01)..=date!(2024 - 01 - 31))
            .unwrap()
            .iter()
            .map(|expense| expense.id)
            .collect();
        assert_eq!(got, [1, 2]);

        let got = store
            .get_by_date_range(date!(2024 - 01 - 05)..=date!(2024 - 01 - 05))
            .unwrap();
        assert_eq!(got.len(), 1);
    }

    #[test]
    fn totals_by_category_omits_empty_categories() {
        let store = store_with_three_expenses();

        let totals = store.totals_by_category().unwrap();

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].category, Category::Food);
        assert_eq!(totals[0].total, dec!(40.00));
        assert_eq!(totals[0].count, 2);
        assert_eq!(totals[1].category, Category::Shopping);
        assert_eq!(totals[1].total, dec!(20.00));
        assert_eq!(totals[1].count, 1);
    }

    #[test]
    fn category_totals_sum_to_total_spending() {
        let mut store = store_with_three_expenses();
        store
            .create(new_expense(dec!(0.10), Category::Utilities, date!(2023 - 06 - 30)))
            .unwrap();
        store
            .create(new_expense(dec!(0.20), Category::Utilities, date!(2023 - 07 - 01)))
            .unwrap();

        let category_sum: Decimal = store
            .totals_by_category()
            .unwrap()
            .iter()
            .map(|total| total.total)
            .sum();

        assert_eq!(category_sum, store.total_spending().unwrap());
        assert_eq!(category_sum, dec!(60.30));
    }

    #[test]
    fn total_spending_is_zero_when_empty() {
        let store = MemoryExpenseStore::new();

        assert_eq!(store.total_spending().unwrap(), Decimal::ZERO);
        assert!(store.totals_by_category().unwrap().is_empty());
    }

    #[test]
    fn monthly_spending() {
        let store = store_with_three_expenses();

        assert_eq!(store.monthly_spending(2024, Month::January).unwrap(), dec!(30.00));
        assert_eq!(store.monthly_spending(2024, Month::February).unwrap(), dec!(30.00));
        assert_eq!(store.monthly_spending(2024, Month::March).unwrap(), Decimal::ZERO);
        assert_eq!(store.total_spending().unwrap(), dec!(60.00));
    }

    #[test]
    fn monthly_spending_over_a_year_sums_to_yearly_total() {
        let mut store = store_with_three_expenses();
        for (amount, date) in [
            (dec!(5.55), date!(2024 - 02 - 29)),
            (dec!(7.00), date!(2024 - 12 - 31)),
            (dec!(100.00), date!(2023 - 12 - 31)),
            (dec!(100.00), date!(2025 - 01 - 01)),
        ] {
            store.create(new_expense(amount, Category::Other, date)).unwrap();
        }

        let mut yearly_sum = Decimal::ZERO;
        let mut month = Month::January;
        for _ in 0..12 {
            yearly_sum += store.monthly_spending(2024, month).unwrap();
            month = month.next();
        }

        let want: Decimal = store
            .get_all()
            .unwrap()
            .iter()
            .filter(|expense| expense.date.year() == 2024)
            .map(|expense| expense.amount)
            .sum();
        assert_eq!(yearly_sum, want);
        assert_eq!(yearly_sum, dec!(72.55));
    }

    #[test]
    fn weekly_spending_covers_seven_days() {
        let mut store = MemoryExpenseStore::new();
        for (amount, date) in [
            (dec!(1.00), date!(2024 - 01 - 14)),
            (dec!(2.00), date!(2024 - 01 - 15)),
            (dec!(3.00), date!(2024 - 01 - 21)),
            (dec!(4.00), date!(2024 - 01 - 22)),
        ] {
            store.create(new_expense(amount, Category::Food, date)).unwrap();
        }

        assert_eq!(store.weekly_spending(date!(2024 - 01 - 15)).unwrap(), dec!(5.00));
    }
}
