//! Defines the core data models for expenses.

use std::{fmt::Display, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::database_id::ExpenseId;

// ============================================================================
// MODELS
// ============================================================================

/// A single recorded spending event.
///
/// Expenses are created by an [ExpenseStore](crate::expense::ExpenseStore),
/// which assigns the `id` and `created_at` fields. Neither field changes for
/// the lifetime of the expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// The amount of money spent, always positive and with exactly two
    /// fractional digits.
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    /// What kind of spending this was.
    pub category: Category,
    /// A text description of what the money was spent on.
    pub description: String,
    /// When the money was spent.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// When the expense was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// The validated fields needed to create an [Expense].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    /// The amount of money spent.
    pub amount: Decimal,
    /// What kind of spending this was.
    pub category: Category,
    /// A text description of what the money was spent on.
    pub description: String,
    /// When the money was spent.
    pub date: Date,
}

impl NewExpense {
    /// Finish building the expense with the store assigned fields.
    pub(crate) fn finalize(self, id: ExpenseId, created_at: OffsetDateTime) -> Expense {
        Expense {
            id,
            amount: self.amount,
            category: self.category,
            description: self.description,
            date: self.date,
            created_at,
        }
    }
}

/// A validated partial update for an [Expense].
///
/// Fields set to `None` are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseChanges {
    /// The new amount, if it should change.
    pub amount: Option<Decimal>,
    /// The new category, if it should change.
    pub category: Option<Category>,
    /// The new description, if it should change.
    pub description: Option<String>,
    /// The new date, if it should change.
    pub date: Option<Date>,
}

impl ExpenseChanges {
    /// Merge the supplied fields into `expense`.
    ///
    /// The ID and creation time of `expense` are never modified.
    pub fn apply_to(self, expense: &mut Expense) {
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }

        if let Some(category) = self.category {
            expense.category = category;
        }

        if let Some(description) = self.description {
            expense.description = description;
        }

        if let Some(date) = self.date {
            expense.date = date;
        }
    }
}

// ============================================================================
// CATEGORY
// ============================================================================

/// The fixed set of tags used to classify expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Groceries, restaurants and takeaways.
    Food,
    /// Fuel, fares and parking.
    Transportation,
    /// Movies, games and events.
    Entertainment,
    /// Clothes, gadgets and other purchases.
    Shopping,
    /// Doctor visits and medicine.
    Healthcare,
    /// Power, water and internet bills.
    Utilities,
    /// Anything else.
    Other,
}

impl Category {
    /// Every category in declaration order.
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Transportation,
        Category::Entertainment,
        Category::Shopping,
        Category::Healthcare,
        Category::Utilities,
        Category::Other,
    ];

    /// The value used for the category in JSON and query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transportation => "transportation",
            Category::Entertainment => "entertainment",
            Category::Shopping => "shopping",
            Category::Healthcare => "healthcare",
            Category::Utilities => "utilities",
            Category::Other => "other",
        }
    }

    /// The human readable name for the category.
    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "Food & Dining",
            Category::Transportation => "Transportation",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Healthcare => "Healthcare",
            Category::Utilities => "Utilities",
            Category::Other => "Other",
        }
    }
}

/// Returned when a string does not name one of the [Category] values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{0}\" is not a valid category")]
pub struct InvalidCategory(pub String);

impl FromStr for Category {
    type Err = InvalidCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| InvalidCategory(s.to_owned()))
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// TESTS
// ============================================================================
