//! Route handlers for creating, reading, updating and deleting expenses.

use axum::{
    Json,
    extract::{
        FromRef, Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    database_id::ExpenseId,
    expense::{
        Category, ExpenseForm, SharedExpenseStore,
        query::{ExpenseQuery, filter_expenses, paginate},
        store::lock_store,
    },
    pagination::PaginationConfig,
    timezone::local_today,
};

/// The name of the response header holding the number of expenses across every page.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";
/// The name of the response header holding the number of pages.
pub const TOTAL_PAGES_HEADER: &str = "x-total-pages";

/// The state needed to manage expenses.
#[derive(Clone)]
pub struct ExpenseState {
    /// The store holding every expense.
    pub store: SharedExpenseStore,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The config that controls how to page the expense list.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for ExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// Parse the expense ID from a URL path segment.
///
/// # Errors
/// Returns [Error::InvalidExpenseId] if `text` is not an integer.
pub fn parse_expense_id(text: &str) -> Result<ExpenseId, Error> {
    text.parse()
        .map_err(|_| Error::InvalidExpenseId(text.to_owned()))
}

/// A route handler for listing expenses, most recent first.
///
/// Without query parameters every expense is returned. Filters and paging
/// are described by [ExpenseQuery]. When a page is requested, the total
/// number of matching expenses and pages are sent in the
/// [TOTAL_COUNT_HEADER] and [TOTAL_PAGES_HEADER] headers.
pub async fn list_expenses(
    State(state): State<ExpenseState>,
    query: Result<Query<ExpenseQuery>, QueryRejection>,
) -> Result<Response, Error> {
    let Query(query) = query?;

    let expenses = lock_store(&state.store)?.get_all()?;

    let today = if query.needs_today() {
        local_today(&state.local_timezone)?
    } else {
        time::OffsetDateTime::now_utc().date()
    };
    let expenses = filter_expenses(expenses, &query, today)?;

    if !query.is_paginated() {
        return Ok(Json(expenses).into_response());
    }

    let page = paginate(expenses, &query, &state.pagination_config)?;

    Ok((
        [
            (TOTAL_COUNT_HEADER, page.total_count.to_string()),
            (TOTAL_PAGES_HEADER, page.total_pages.to_string()),
        ],
        Json(page.expenses),
    )
        .into_response())
}

/// A route handler for getting a single expense by its ID.
pub async fn get_expense(
    State(state): State<ExpenseState>,
    Path(expense_id): Path<String>,
) -> Result<Response, Error> {
    let expense_id = parse_expense_id(&expense_id)?;

    lock_store(&state.store)?
        .get(expense_id)?
        .map(|expense| Json(expense).into_response())
        .ok_or(Error::NotFound)
}

/// A route handler for creating a new expense, responds with the created expense.
pub async fn create_expense(
    State(state): State<ExpenseState>,
    form: Result<Json<ExpenseForm>, JsonRejection>,
) -> Result<Response, Error> {
    let Json(form) = form?;
    let new_expense = form.validate()?;

    let expense = lock_store(&state.store)?.create(new_expense)?;
    tracing::info!("Created expense {}", expense.id);

    Ok((StatusCode::CREATED, Json(expense)).into_response())
}

/// A route handler for updating some or all of the fields of an expense.
pub async fn update_expense(
    State(state): State<ExpenseState>,
    Path(expense_id): Path<String>,
    form: Result<Json<ExpenseForm>, JsonRejection>,
) -> Result<Response, Error> {
    let expense_id = parse_expense_id(&expense_id)?;
    let Json(form) = form?;
    let changes = form.validate_partial()?;

    lock_store(&state.store)?
        .update(expense_id, changes)?
        .map(|expense| Json(expense).into_response())
        .ok_or(Error::NotFound)
}

/// A route handler for deleting an expense, responds with an empty body.
pub async fn delete_expense(
    State(state): State<ExpenseState>,
    Path(expense_id): Path<String>,
) -> Result<Response, Error> {
    let expense_id = parse_expense_id(&expense_id)?;

    if lock_store(&state.store)?.delete(expense_id)? {
        tracing::info!("Deleted expense {expense_id}");
        Ok(StatusCode::NO_CONTENT.into_response())
    } else {
        Err(Error::NotFound)
    }
}

/// A category and its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    /// The value used in forms and queries.
    pub value: Category,
    /// The human readable name.
    pub label: String,
}

/// A route handler for listing every category.
pub async fn list_categories() -> Json<Vec<CategoryOption>> {
    Json(
        Category::ALL
            .into_iter()
            .map(|category| CategoryOption {
                value: category,
                label: category.label().to_owned(),
            })
            .collect(),
    )
}
