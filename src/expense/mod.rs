//! Expense management for the expense tracker.
//!
//! This module contains everything related to expenses:
//! - The `Expense` model, its `Category` and the validated inputs for creating and updating it
//! - The `ExpenseStore` trait and its in-memory implementation
//! - Route handlers for the expense REST API

mod core;
mod endpoints;
mod form;
mod memory;
mod query;
mod store;

pub use core::{Category, Expense, ExpenseChanges, InvalidCategory, NewExpense};
pub use endpoints::{
    CategoryOption, TOTAL_COUNT_HEADER, TOTAL_PAGES_HEADER, create_expense,
    delete_expense, get_expense, list_categories, list_expenses, update_expense,
};
pub use form::{ExpenseForm, FieldError};
pub use memory::MemoryExpenseStore;
pub use store::{CategoryTotal, ExpenseStore, SharedExpenseStore, lock_store};
