//! Expense tracker is a JSON REST API for recording personal expenses and
//! summarising spending.
//!
//! Expenses are kept in an in-memory store and served over HTTP together with
//! derived analytics: spending per category, a financial summary with
//! period-over-period changes and monthly spending trends for the current year.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod analytics;
mod app_state;
mod date_range;
mod database_id;
pub mod endpoints;
mod error;
mod expense;
mod logging;
mod pagination;
mod routing;
mod timezone;

pub use analytics::{DEFAULT_STARTING_BALANCE, FinancialSummary, MonthlyTrend};
pub use app_state::AppState;
pub use database_id::ExpenseId;
pub use error::{Error, ErrorResponse};
pub use expense::{
    Category, CategoryOption, CategoryTotal, Expense, ExpenseChanges, ExpenseStore, FieldError,
    MemoryExpenseStore, NewExpense, TOTAL_COUNT_HEADER, TOTAL_PAGES_HEADER,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pagination::PaginationConfig;
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("Failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
