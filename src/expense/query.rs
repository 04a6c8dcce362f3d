//! Filtering and paging for the expense list.

use serde::Deserialize;
use time::{Date, Duration};

use crate::{
    Error,
    date_range::one_month_before,
    expense::{Category, Expense},
    pagination::PaginationConfig,
};

/// The query parameters accepted by the expense list.
///
/// With no parameters set every expense is returned.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseQuery {
    /// Only include expenses in this category, "all" disables the filter.
    pub category: Option<String>,
    /// Only include expenses whose description contains this text, ignoring case.
    pub search: Option<String>,
    /// Only include expenses in this date range relative to today.
    pub range: Option<DatePreset>,
    /// The page to return, starting at 1.
    pub page: Option<u64>,
    /// The maximum number of expenses per page.
    pub per_page: Option<u64>,
}

/// Date windows relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePreset {
    /// No date filter.
    All,
    /// Only today.
    Today,
    /// The last seven days and anything later.
    Week,
    /// The last month and anything later.
    Month,
}

impl ExpenseQuery {
    /// Whether the client asked for a single page rather than the full list.
    pub fn is_paginated(&self) -> bool {
        self.page.is_some() || self.per_page.is_some()
    }

    /// Whether the filter depends on the current date.
    pub fn needs_today(&self) -> bool {
        matches!(
            self.range,
            Some(DatePreset::Today | DatePreset::Week | DatePreset::Month)
        )
    }

    fn category_filter(&self) -> Result<Option<Category>, Error> {
        match self.category.as_deref() {
            None | Some("all") | Some("") => Ok(None),
            Some(category) => category
                .parse()
                .map(Some)
                .map_err(|error: crate::expense::InvalidCategory| {
                    Error::InvalidQuery(error.to_string())
                }),
        }
    }
}

/// Keep the expenses that match every filter in `query`, preserving their order.
///
/// # Errors
/// Returns [Error::InvalidQuery] if the category filter is not a valid category.
pub fn filter_expenses(
    expenses: Vec<Expense>,
    query: &ExpenseQuery,
    today: Date,
) -> Result<Vec<Expense>, Error> {
    let category = query.category_filter()?;
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|search| !search.is_empty())
        .map(str::to_lowercase);
    let earliest = match query.range {
        None | Some(DatePreset::All) => None,
        Some(DatePreset::Today) => Some(today),
        Some(DatePreset::Week) => today.checked_sub(Duration::days(7)),
        Some(DatePreset::Month) => Some(one_month_before(today)),
    };

    Ok(expenses
        .into_iter()
        .filter(|expense| category.is_none_or(|category| expense.category == category))
        .filter(|expense| {
            search
                .as_deref()
                .is_none_or(|search| expense.description.to_lowercase().contains(search))
        })
        .filter(|expense| match query.range {
            Some(DatePreset::Today) => expense.date == today,
            _ => earliest.is_none_or(|earliest| expense.date >= earliest),
        })
        .collect())
}

/// One page of expenses.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// The expenses on the requested page.
    pub expenses: Vec<Expense>,
    /// The number of expenses across every page.
    pub total_count: usize,
    /// The number of pages.
    pub total_pages: u64,
}

/// Slice `expenses` into the page requested in `query`.
///
/// A page past the end is empty.
///
/// # Errors
/// Returns [Error::InvalidQuery] if the page or page size is zero.
pub fn paginate(
    expenses: Vec<Expense>,
    query: &ExpenseQuery,
    config: &PaginationConfig,
) -> Result<Page, Error> {
    let page = query.page.unwrap_or(config.default_page);
    let per_page = query.per_page.unwrap_or(config.default_page_size);

    if page == 0 {
        return Err(Error::InvalidQuery("page must be at least 1".to_owned()));
    }

    if per_page == 0 {
        return Err(Error::InvalidQuery("perPage must be at least 1".to_owned()));
    }

    let total_count = expenses.len();
    let total_pages = (total_count as u64).div_ceil(per_page);
    let offset = (page - 1).saturating_mul(per_page);

    let expenses = expenses
        .into_iter()
        .skip(usize::try_from(offset).unwrap_or(usize::MAX))
        .take(usize::try_from(per_page).unwrap_or(usize::MAX))
        .collect();

    Ok(Page {
        expenses,
        total_count,
        total_pages,
    })
}
