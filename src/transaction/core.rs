//! Defines the core data models and database queries for transactions.

use rusqlite::{Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, session::SessionId};

// ============================================================================
// MODELS
// ============================================================================

/// Alias for the type used for transaction IDs.
pub type TransactionId = Uuid;

/// The direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in. Stored with a positive amount.
    Credit,
    /// Money going out. Stored with a negative amount.
    Debit,
}

impl TransactionKind {
    /// Apply the sign this kind implies to an unsigned `magnitude`.
    pub fn signed(self, magnitude: f64) -> f64 {
        match self {
            TransactionKind::Credit => magnitude,
            TransactionKind::Debit => -magnitude,
        }
    }
}

/// A single signed monetary ledger entry.
///
/// Rows are immutable once stored: there are no update or delete operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Text detailing the transaction.
    pub title: String,
    /// The amount of money spent or earned in this transaction. Positive
    /// values are credits, negative values are debits.
    pub amount: f64,
    /// The session that owns this row.
    pub session_id: SessionId,
    /// When the row was stored.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The data needed to insert a transaction row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// Text detailing the transaction.
    pub title: String,
    /// The unsigned size of the transaction. The stored sign is derived from
    /// `kind`.
    pub amount: f64,
    /// Whether the transaction adds money to or removes money from the
    /// ledger.
    pub kind: TransactionKind,
    /// The session that will own the new row.
    pub session_id: SessionId,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Insert a new transaction into the database.
///
/// The row gets a freshly generated ID, the amount signed according to the
/// transaction kind, and the current UTC time as its creation timestamp.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO transactions (id, title, amount, session_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, title, amount, session_id, created_at",
        )?
        .query_row(
            (
                Uuid::new_v4().to_string(),
                new_transaction.title,
                new_transaction.kind.signed(new_transaction.amount),
                new_transaction.session_id.as_str(),
                OffsetDateTime::now_utc(),
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve all transactions owned by `session_id`, in insertion order.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn list_transactions(
    session_id: &SessionId,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let transactions = connection
        .prepare(
            "SELECT id, title, amount, session_id, created_at FROM transactions
             WHERE session_id = :session_id",
        )?
        .query_map(&[(":session_id", session_id.as_str())], map_transaction_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(transactions)
}

/// Retrieve the transaction matching both `id` and `session_id`.
///
/// Returns `None` when no such row exists. A row owned by another session and
/// a row that does not exist are indistinguishable to the caller, so token
/// holders cannot probe for other sessions' rows.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_transaction(
    id: TransactionId,
    session_id: &SessionId,
    connection: &Connection,
) -> Result<Option<Transaction>, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, title, amount, session_id, created_at FROM transactions
             WHERE id = :id AND session_id = :session_id",
        )?
        .query_row(
            &[
                (":id", id.to_string().as_str()),
                (":session_id", session_id.as_str()),
            ],
            map_transaction_row,
        )
        .optional()?;

    Ok(transaction)
}

/// Sum the amounts of all transactions owned by `session_id`.
///
/// Sums to zero when the session has no transactions.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn summarize_transactions(
    session_id: &SessionId,
    connection: &Connection,
) -> Result<f64, Error> {
    let amount = connection.query_row(
        "SELECT COALESCE(SUM(amount), 0.0) FROM transactions WHERE session_id = :session_id",
        &[(":session_id", session_id.as_str())],
        |row| row.get(0),
    )?;

    Ok(amount)
}

/// Create the transactions table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                amount REAL NOT NULL,
                session_id TEXT NOT NULL,
                created_at TEXT NOT NULL
                )",
        (),
    )?;

    // Every read path filters by session.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transactions_session_id ON transactions(session_id);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id_text: String = row.get(0)?;
    let id = Uuid::parse_str(&id_text).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(error))
    })?;
    let title = row.get(1)?;
    let amount = row.get(2)?;
    let session_id = SessionId::new(row.get::<_, String>(3)?);
    let created_at = row.get(4)?;

    Ok(Transaction {
        id,
        title,
        amount,
        session_id,
        created_at,
    })
}

// ============================================================================
// TESTS
// ============================================================================
