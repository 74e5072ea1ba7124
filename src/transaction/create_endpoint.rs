//! Defines the endpoint for creating a new transaction.

use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    session::ensure_session,
    transaction::{
        TransactionKind,
        core::{NewTransaction, create_transaction},
    },
};

/// The request body for creating a transaction.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTransactionBody {
    /// Text detailing the transaction.
    pub title: String,
    /// The unsigned size of the transaction.
    pub amount: f64,
    /// Whether the transaction is a credit or a debit.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

/// A route handler for creating a new transaction.
///
/// Clients without a session get one set up: the response carries a
/// persistent session cookie unless the request already presented one.
/// Creating is intentionally not idempotent, a repeated identical request
/// inserts another row.
///
/// Responds 201 with an empty body on success.
pub async fn create_transaction_endpoint(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<CreateTransactionBody>,
) -> Result<(CookieJar, StatusCode), Error> {
    let (jar, session_id) = ensure_session(jar);

    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLock
    })?;

    create_transaction(
        NewTransaction {
            title: body.title,
            amount: body.amount,
            kind: body.kind,
            session_id,
        },
        &connection,
    )?;

    Ok((jar, StatusCode::CREATED))
}
