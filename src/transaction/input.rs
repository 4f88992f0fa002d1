//! Request bodies for creating and updating transactions.
//!
//! The dashboard form and other clients send loosely typed JSON, e.g. the
//! amount as a string or the date as a full timestamp. These types accept
//! that input and convert it into the strictly typed models in [super::core].

use axum::extract::rejection::JsonRejection;
use serde::Deserialize;
use time::{
    Date, OffsetDateTime, format_description::well_known::Rfc3339, macros::format_description,
};

use crate::{
    Error,
    transaction::core::{NewTransaction, TransactionPatch},
};

/// An amount as sent by a client: either a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    /// A JSON number, e.g. `42.5`.
    Number(f64),
    /// A string containing a number, e.g. `"42.5"`.
    Text(String),
}

impl AmountInput {
    /// Coerce the input to a finite number.
    ///
    /// Returns `Ok(None)` for a blank string, which is how an empty form
    /// input arrives.
    fn into_amount(self) -> Result<Option<f64>, Error> {
        let amount = match self {
            AmountInput::Number(number) => number,
            AmountInput::Text(text) if text.trim().is_empty() => return Ok(None),
            AmountInput::Text(text) => text.trim().parse::<f64>().map_err(|_| {
                Error::InvalidBody(format!("amount \"{text}\" is not a number"))
            })?,
        };

        if !amount.is_finite() {
            return Err(Error::InvalidBody("amount must be a finite number".to_owned()));
        }

        Ok(Some(amount))
    }
}

/// Parse a date sent by a client.
///
/// Accepts an ISO 8601 calendar date (`2024-03-01`) or an RFC 3339 timestamp
/// (`2024-03-01T00:00:00.000Z`), in which case the time is discarded.
///
/// Returns `Ok(None)` for a blank string.
fn parse_date_input(text: &str) -> Result<Option<Date>, Error> {
    let text = text.trim();

    if text.is_empty() {
        return Ok(None);
    }

    let invalid = || Error::InvalidBody(format!("date \"{text}\" is not an ISO 8601 date"));

    // Dates are stored as text and sorted lexically, so only four digit years are allowed.
    if !text.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let date = match Date::parse(text, format_description!("[year]-[month]-[day]")) {
        Ok(date) => date,
        Err(_) => OffsetDateTime::parse(text, &Rfc3339)
            .map(|date_time| date_time.date())
            .map_err(|_| invalid())?,
    };

    if !(0..=9999).contains(&date.year()) {
        return Err(invalid());
    }

    Ok(Some(date))
}

fn non_blank(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// The JSON body for creating a transaction.
///
/// Every field is optional here so that a missing field can be reported by
/// name rather than as a generic deserialization error.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTransactionBody {
    /// The value of the transaction.
    pub amount: Option<AmountInput>,
    /// The date when the transaction ocurred.
    pub date: Option<String>,
    /// Text detailing the transaction.
    pub description: Option<String>,
}

impl TryFrom<CreateTransactionBody> for NewTransaction {
    type Error = Error;

    fn try_from(body: CreateTransactionBody) -> Result<Self, Self::Error> {
        let amount = match body.amount {
            Some(amount) => amount.into_amount()?,
            None => None,
        }
        .ok_or(Error::MissingField("amount"))?;

        let date = match body.date {
            Some(date) => parse_date_input(&date)?,
            None => None,
        }
        .ok_or(Error::MissingField("date"))?;

        let description = body
            .description
            .and_then(non_blank)
            .ok_or(Error::MissingField("description"))?;

        Ok(NewTransaction {
            amount,
            date,
            description,
        })
    }
}

/// The JSON body for updating a transaction.
///
/// Fields that are absent or `null` are left unchanged. Unknown fields,
/// including `id`, are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTransactionBody {
    /// The new value of the transaction.
    pub amount: Option<AmountInput>,
    /// The new date of the transaction.
    pub date: Option<String>,
    /// The new description of the transaction.
    pub description: Option<String>,
}

impl TryFrom<UpdateTransactionBody> for TransactionPatch {
    type Error = Error;

    fn try_from(body: UpdateTransactionBody) -> Result<Self, Self::Error> {
        let amount = match body.amount {
            Some(amount) => Some(
                amount
                    .into_amount()?
                    .ok_or_else(|| Error::InvalidBody("amount cannot be empty".to_owned()))?,
            ),
            None => None,
        };

        let date = match body.date {
            Some(date) => Some(
                parse_date_input(&date)?
                    .ok_or_else(|| Error::InvalidBody("date cannot be empty".to_owned()))?,
            ),
            None => None,
        };

        let description = match body.description {
            Some(description) => Some(
                non_blank(description)
                    .ok_or_else(|| Error::InvalidBody("description cannot be empty".to_owned()))?,
            ),
            None => None,
        };

        Ok(TransactionPatch {
            amount,
            date,
            description,
        })
    }
}

/// Convert the rejection from axum's `Json` extractor into an [Error].
pub fn body_rejection(rejection: JsonRejection) -> Error {
    tracing::debug!("Rejected request body: {rejection}");
    Error::InvalidBody(rejection.body_text())
}
