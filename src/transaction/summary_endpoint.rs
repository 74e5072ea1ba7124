//! Defines the endpoint for the running balance of a session.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, session::SessionId, transaction::core::summarize_transactions};

/// The running balance of a session's ledger.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// The signed sum of the session's transaction amounts.
    pub amount: f64,
}

/// The response body for the summary endpoint.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// The running balance for the requesting session.
    pub summary: Summary,
}

/// A route handler for the running balance of a session.
///
/// Requires a session cookie; requests without one are rejected with 401
/// before this handler runs. The balance is zero for a session without
/// transactions.
pub async fn summarize_transactions_endpoint(
    State(state): State<AppState>,
    session_id: SessionId,
) -> Result<Json<SummaryResponse>, Error> {
    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLock
    })?;

    let amount = summarize_transactions(&session_id, &connection)?;

    Ok(Json(SummaryResponse {
        summary: Summary { amount },
    }))
}
