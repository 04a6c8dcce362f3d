//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;

use crate::{
    Error,
    analytics::DEFAULT_STARTING_BALANCE,
    expense::{ExpenseStore, SharedExpenseStore},
    pagination::PaginationConfig,
    timezone::get_local_offset,
};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The store that owns every expense.
    pub store: SharedExpenseStore,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The balance assumed to exist before any expenses were recorded.
    pub starting_balance: Decimal,

    /// The config that controls how to page the expense list.
    pub pagination_config: PaginationConfig,
}

impl AppState {
    /// Create a new [AppState] that owns `store`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an [Error::InvalidTimezoneError] if `local_timezone` is not a known timezone.
    pub fn new(
        store: impl ExpenseStore + Send + 'static,
        local_timezone: &str,
        starting_balance: Decimal,
        pagination_config: PaginationConfig,
    ) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        let store: SharedExpenseStore = Arc::new(Mutex::new(store));

        Ok(Self {
            store,
            local_timezone: local_timezone.to_owned(),
            starting_balance,
            pagination_config,
        })
    }

    /// Create a new [AppState] with the default starting balance and page size.
    ///
    /// # Errors
    /// Returns an [Error::InvalidTimezoneError] if `local_timezone` is not a known timezone.
    pub fn with_defaults(
        store: impl ExpenseStore + Send + 'static,
        local_timezone: &str,
    ) -> Result<Self, Error> {
        Self::new(
            store,
            local_timezone,
            Decimal::from(DEFAULT_STARTING_BALANCE),
            PaginationConfig::default(),
        )
    }
}
