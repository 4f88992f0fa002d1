//! Defines the core data models and database queries for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Connection, Row, ToSql,
    types::{FromSql, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// The identifier the database assigns to a transaction when it is created.
///
/// Well-formed IDs are positive integers. Use [str::parse] to validate an ID
/// taken from a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(i64);

impl TransactionId {
    /// Wrap a raw database ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw database ID.
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TransactionId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidTransactionId(s.to_owned());

        // Only plain decimal digits, so "+1", " 1" and "1e3" are all rejected.
        if s.is_empty() || !s.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(invalid());
        }

        match s.parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(invalid()),
        }
    }
}

impl ToSql for TransactionId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}

impl FromSql for TransactionId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(Self)
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// When the transaction happened, serialized as `YYYY-MM-DD`.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
}

/// The fields needed to insert a new [Transaction].
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The monetary amount of the transaction.
    pub amount: f64,
    /// The date when the transaction occurred.
    pub date: Date,
    /// A human-readable description of the transaction.
    pub description: String,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [NewTransaction] for discoverability.
    pub fn build(amount: f64, date: Date, description: &str) -> NewTransaction {
        NewTransaction {
            amount,
            date,
            description: description.to_owned(),
        }
    }
}

/// A partial update to a [Transaction].
///
/// Fields set to `None` keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    /// The new amount.
    pub amount: Option<f64>,
    /// The new date.
    pub date: Option<Date>,
    /// The new description.
    pub description: Option<String>,
}

impl TransactionPatch {
    /// Whether the patch names no fields at all.
    pub fn is_empty(&self) -> bool {
        self.amount.is_none() && self.date.is_none() && self.description.is_none()
    }

    /// Return a copy of `transaction` with the fields of this patch merged in.
    pub fn apply(&self, transaction: &Transaction) -> Transaction {
        Transaction {
            id: transaction.id,
            amount: self.amount.unwrap_or(transaction.amount),
            date: self.date.unwrap_or(transaction.date),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| transaction.description.clone()),
        }
    }
}

/// The acknowledgement returned after inserting a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    /// Whether the write was acknowledged by the database.
    pub acknowledged: bool,
    /// The ID assigned to the new transaction.
    pub inserted_id: TransactionId,
}

/// The acknowledgement returned after updating a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    /// Whether the write was acknowledged by the database.
    pub acknowledged: bool,
    /// How many transactions matched the ID.
    pub matched_count: usize,
    /// How many transactions were changed.
    pub modified_count: usize,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn create_transaction(
    transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (amount, date, description)
             VALUES (?1, ?2, ?3)
             RETURNING id, amount, date, description",
        )?
        .query_row(
            (transaction.amount, transaction.date, transaction.description),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare("SELECT id, amount, date, description FROM \"transaction\" WHERE id = :id")?
        .query_one(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Retrieve every transaction, newest first.
///
/// Transactions on the same date are ordered by ID, most recently created first.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn list_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, amount, date, description FROM \"transaction\"
             ORDER BY date DESC, id DESC",
        )?
        .query_map([], map_transaction_row)?
        .map(|result| result.map_err(Error::from))
        .collect()
}

/// Merge `patch` into the transaction with the given `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - [Error::NoChanges] if `patch` is empty or would not change any field,
/// - or [Error::SqlError] there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    patch: &TransactionPatch,
    connection: &Connection,
) -> Result<UpdateResult, Error> {
    let current = get_transaction(id, connection)?;
    let updated = patch.apply(&current);

    if patch.is_empty() || updated == current {
        return Err(Error::NoChanges);
    }

    let rows_affected = connection.execute(
        "UPDATE \"transaction\"
        SET \
            amount = ?1, \
            date = ?2, \
            description = ?3 \
        WHERE id = ?4;",
        (updated.amount, updated.date, &updated.description, id),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(UpdateResult {
        acknowledged: true,
        matched_count: rows_affected,
        modified_count: rows_affected,
    })
}

type RowsAffected = usize;

/// Delete the transaction with the given `id`.
///
/// Returns the number of deleted rows, which is zero if no transaction has the ID.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM \"transaction\" WHERE id = :id", &[(":id", &id)])
        .map_err(|err| err.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                description TEXT NOT NULL
                )",
        (),
    )?;

    // Index used when listing transactions newest first.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let date = row.get(2)?;
    let description = row.get(3)?;

    Ok(Transaction {
        id,
        amount,
        date,
        description,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod id_tests {
    use crate::{Error, transaction::TransactionId};

    #[test]
    fn parses_positive_integers() {
        assert_eq!("1".parse::<TransactionId>(), Ok(TransactionId::new(1)));
        assert_eq!("42".parse::<TransactionId>(), Ok(TransactionId::new(42)));
    }

    #[test]
    fn rejects_malformed_ids() {
        for id in ["", "0", "-1", "+1", " 1", "1.0", "abc", "65f1c0ffee", "99999999999999999999"] {
            assert_eq!(
                id.parse::<TransactionId>(),
                Err(Error::InvalidTransactionId(id.to_owned())),
                "want {id:?} to be rejected"
            );
        }
    }
}
