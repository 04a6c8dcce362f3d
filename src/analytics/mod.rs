//! Analytics derived from the expense store.
//!
//! The category breakdown comes straight from the store. The summary and the
//! monthly trends combine several store queries.

mod endpoints;
mod summary;
mod trends;

pub use endpoints::{get_category_breakdown, get_monthly_trends, get_summary};
pub use summary::{DEFAULT_STARTING_BALANCE, FinancialSummary, summarize};
pub use trends::{MonthlyTrend, monthly_trends};
