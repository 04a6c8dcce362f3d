//! Database ID type definition.

/// Alias for the integer type used for expense IDs.
///
/// IDs start at 1 and are never reused, even after the expense is deleted.
pub type ExpenseId = i64;
