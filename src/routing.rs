//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    AppState,
    analytics::{get_category_breakdown, get_monthly_trends, get_summary},
    endpoints,
    error::ErrorResponse,
    expense::{
        create_expense, delete_expense, get_expense, list_categories, list_expenses,
        update_expense,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::EXPENSES, get(list_expenses).post(create_expense))
        .route(
            endpoints::EXPENSE,
            get(get_expense).patch(update_expense).delete(delete_expense),
        )
        .route(endpoints::CATEGORIES, get(list_categories))
        .route(endpoints::CATEGORY_BREAKDOWN, get(get_category_breakdown))
        .route(endpoints::SUMMARY, get(get_summary))
        .route(endpoints::MONTHLY_TRENDS, get(get_monthly_trends))
        .fallback(get_404_not_found)
        .with_state(state)
}

async fn get_404_not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Not found"))).into_response()
}
