//! Route handlers for the analytics API.

use axum::{
    Json,
    extract::{FromRef, State},
};
use rust_decimal::Decimal;

use crate::{
    AppState, Error,
    analytics::{FinancialSummary, MonthlyTrend, monthly_trends, summarize},
    expense::{CategoryTotal, SharedExpenseStore, lock_store},
    timezone::local_today,
};

/// The state needed to compute analytics.
#[derive(Clone)]
pub struct AnalyticsState {
    /// The store holding every expense.
    pub store: SharedExpenseStore,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The balance assumed to exist before any expenses were recorded.
    pub starting_balance: Decimal,
}

impl FromRef<AppState> for AnalyticsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
            starting_balance: state.starting_balance,
        }
    }
}

/// A route handler for the total and number of expenses per category.
pub async fn get_category_breakdown(
    State(state): State<AnalyticsState>,
) -> Result<Json<Vec<CategoryTotal>>, Error> {
    let totals = lock_store(&state.store)?.totals_by_category()?;

    Ok(Json(totals))
}

/// A route handler for the [FinancialSummary] as of today.
pub async fn get_summary(
    State(state): State<AnalyticsState>,
) -> Result<Json<FinancialSummary>, Error> {
    let today = local_today(&state.local_timezone)?;
    let store = lock_store(&state.store)?;

    summarize(&*store, today, state.starting_balance).map(Json)
}

/// A route handler for the spending in each month of the current year.
pub async fn get_monthly_trends(
    State(state): State<AnalyticsState>,
) -> Result<Json<Vec<MonthlyTrend>>, Error> {
    let today = local_today(&state.local_timezone)?;
    let store = lock_store(&state.store)?;

    monthly_trends(&*store, today.year()).map(Json)
}
