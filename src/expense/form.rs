//! Validation for the expense form sent by clients when creating or editing
//! expenses.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use time::{Date, macros::format_description};

use crate::{
    Error,
    expense::{Category, ExpenseChanges, NewExpense},
};

/// The longest description, in characters, that an expense may have.
pub const MAX_DESCRIPTION_LENGTH: usize = 255;

/// The raw, unvalidated fields of an expense.
///
/// Every field is optional so the same form can be used for partial updates.
/// A field that is absent is `None`, while a field sent as `null` is
/// `Some(Value::Null)` and fails validation. Values are kept as raw JSON so
/// that a value of the wrong type is reported against its field.
/// Unknown fields such as `id` or `createdAt` are ignored.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ExpenseForm {
    /// The amount spent, e.g. "12.5" or 12.5.
    #[serde(default, deserialize_with = "present")]
    pub amount: Option<Value>,
    /// One of the [Category] names.
    #[serde(default, deserialize_with = "present")]
    pub category: Option<Value>,
    /// What the money was spent on.
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Value>,
    /// The date in the format YYYY-MM-DD.
    #[serde(default, deserialize_with = "present")]
    pub date: Option<Value>,
}

/// Keep `null` as a value so it can be told apart from a missing field.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// A validation message for a single form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The name of the field that failed validation.
    pub field: String,
    /// A human readable explanation of what is wrong.
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_owned(),
            message: message.to_owned(),
        }
    }
}

impl ExpenseForm {
    /// Validate the form for creating a new expense, all fields are required.
    ///
    /// # Errors
    /// Returns [Error::Validation] listing every field that is missing or invalid.
    pub fn validate(self) -> Result<NewExpense, Error> {
        let mut errors = Vec::new();

        let amount = require(self.amount, "amount", &mut errors)
            .and_then(|amount| collect(parse_amount(amount), &mut errors));
        let category = require(self.category, "category", &mut errors)
            .and_then(|category| collect(parse_category(category), &mut errors));
        let description = require(self.description, "description", &mut errors)
            .and_then(|description| collect(parse_description(description), &mut errors));
        let date = require(self.date, "date", &mut errors)
            .and_then(|date| collect(parse_date(date), &mut errors));

        match (amount, category, description, date) {
            (Some(amount), Some(category), Some(description), Some(date)) if errors.is_empty() => {
                Ok(NewExpense {
                    amount,
                    category,
                    description,
                    date,
                })
            }
            _ => Err(Error::Validation(errors)),
        }
    }

    /// Validate the form for a partial update, only the supplied fields are checked.
    ///
    /// # Errors
    /// Returns [Error::Validation] listing every supplied field that is invalid.
    pub fn validate_partial(self) -> Result<ExpenseChanges, Error> {
        let mut errors = Vec::new();

        let changes = ExpenseChanges {
            amount: self
                .amount
                .and_then(|amount| collect(parse_amount(amount), &mut errors)),
            category: self
                .category
                .and_then(|category| collect(parse_category(category), &mut errors)),
            description: self
                .description
                .and_then(|description| collect(parse_description(description), &mut errors)),
            date: self
                .date
                .and_then(|date| collect(parse_date(date), &mut errors)),
        };

        if errors.is_empty() {
            Ok(changes)
        } else {
            Err(Error::Validation(errors))
        }
    }
}

fn require<T>(value: Option<T>, field: &str, errors: &mut Vec<FieldError>) -> Option<T> {
    if value.is_none() {
        errors.push(FieldError::new(field, required_message(field)));
    }

    value
}

fn collect<T>(result: Result<T, FieldError>, errors: &mut Vec<FieldError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            errors.push(error);
            None
        }
    }
}

fn required_message(field: &str) -> &'static str {
    match field {
        "amount" => "Amount is required",
        "category" => "Please select a category",
        "description" => "Description is required",
        "date" => "Date is required",
        _ => "This field is required",
    }
}

/// The text of a JSON string field, `null` counts as missing.
fn expect_text(value: Value, field: &str, type_message: &str) -> Result<String, FieldError> {
    match value {
        Value::String(text) => Ok(text),
        Value::Null => Err(FieldError::new(field, required_message(field))),
        _ => Err(FieldError::new(field, type_message)),
    }
}

/// The largest amount that fits in a numeric(10, 2) column.
fn max_amount() -> Decimal {
    Decimal::new(9_999_999_999, 2)
}

/// Whether `text` is a plain decimal number, optionally in scientific notation.
///
/// Rejects forms that [Decimal::from_str] would otherwise accept, such as
/// digit groups separated by underscores.
fn is_number_text<'a>(text: &'a str) -> bool {
    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(index) => (&text[..index], Some(&text[index + 1..])),
        None => (text, None),
    };

    let unsigned = |text: &'a str| -> &'a str { text.strip_prefix(['+', '-']).unwrap_or(text) };

    let mantissa = unsigned(mantissa);
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let mantissa_is_valid = !(whole.is_empty() && fraction.is_empty())
        && whole.chars().all(|c| c.is_ascii_digit())
        && fraction.chars().all(|c| c.is_ascii_digit());

    let exponent_is_valid = exponent.is_none_or(|exponent| {
        let digits = unsigned(exponent);
        !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
    });

    mantissa_is_valid && exponent_is_valid
}

/// Parse an amount and canonicalize it to exactly two decimal places.
fn parse_amount(value: Value) -> Result<Decimal, FieldError> {
    let invalid = || FieldError::new("amount", "Amount must be a positive number");

    let text = match value {
        Value::Number(number) => number.to_string(),
        value => expect_text(value, "amount", "Amount must be a positive number")?,
    };
    let text = text.trim();

    if text.is_empty() {
        return Err(FieldError::new("amount", required_message("amount")));
    }

    if !is_number_text(text) {
        return Err(invalid());
    }

    let amount = Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| invalid())?;

    let mut amount = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    amount.rescale(2);

    if amount <= Decimal::ZERO {
        return Err(invalid());
    }

    if amount > max_amount() {
        return Err(FieldError::new("amount", "Amount is too large"));
    }

    Ok(amount)
}

fn parse_category(value: Value) -> Result<Category, FieldError> {
    let text = expect_text(value, "category", "Invalid category")?;

    if text.is_empty() {
        return Err(FieldError::new("category", required_message("category")));
    }

    text.parse()
        .map_err(|_| FieldError::new("category", "Invalid category"))
}

fn parse_description(value: Value) -> Result<String, FieldError> {
    let text = expect_text(value, "description", "Description must be text")?;
    let length = text.chars().count();

    if length == 0 {
        Err(FieldError::new("description", required_message("description")))
    } else if length > MAX_DESCRIPTION_LENGTH {
        Err(FieldError::new("description", "Description too long"))
    } else {
        Ok(text)
    }
}

fn parse_date(value: Value) -> Result<Date, FieldError> {
    let invalid_message = "Date must be a valid date in YYYY-MM-DD format";
    let text = expect_text(value, "date", invalid_message)?;

    if text.is_empty() {
        return Err(FieldError::new("date", required_message("date")));
    }

    Date::parse(&text, format_description!("[year]-[month]-[day]"))
        .map_err(|_| FieldError::new("date", invalid_message))
}
