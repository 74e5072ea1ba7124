//! Defines the endpoint for getting a single transaction by its ID.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    session::SessionId,
    transaction::{Transaction, TransactionId, core::get_transaction},
};

/// The response body for the single transaction endpoint.
///
/// The `transaction` key is omitted entirely when no row matches, so the
/// client receives `{}` rather than an explicit null or a 404.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TransactionResponse {
    /// The requested transaction, if the requesting session owns it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction: Option<Transaction>,
}

/// A route handler for getting a transaction by its ID.
///
/// Requires a session cookie. The path parameter must be a well-formed UUID;
/// anything else is rejected with a 400 before this handler runs.
///
/// Responds 200 with an empty object both when the ID does not exist and
/// when the row belongs to another session, so a token holder cannot tell
/// the two cases apart.
pub async fn get_transaction_endpoint(
    State(state): State<AppState>,
    session_id: SessionId,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<TransactionResponse>, Error> {
    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLock
    })?;

    let transaction = get_transaction(transaction_id, &session_id, &connection)?;

    Ok(Json(TransactionResponse { transaction }))
}

#[cfg(test)]
mod get_endpoint_tests {
    use axum::http::StatusCode;
    use axum_extra::extract::cookie::Cookie;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;
    use uuid::Uuid;

    use crate::{
        AppState, build_router,
        endpoints::{self, format_endpoint},
        session::COOKIE_SESSION,
        transaction::{
            TransactionId, get_endpoint::TransactionResponse,
            list_endpoint::TransactionsResponse,
        },
    };

    fn get_test_server() -> TestServer {
        let connection =
            Connection::open_in_memory().expect("Could not open database in memory.");
        let state = AppState::new(connection).expect("Could not initialize database.");

        TestServer::new(build_router(state))
    }

    /// Create a transaction under `session` and return its ID via the list
    /// endpoint, since the create endpoint intentionally returns no body.
    async fn create_transaction(server: &TestServer, session: &str) -> TransactionId {
        server
            .post(endpoints::TRANSACTIONS)
            .add_cookie(Cookie::new(COOKIE_SESSION, session.to_owned()))
            .json(&json!({ "title": "Groceries", "amount": 42, "type": "debit" }))
            .await
            .assert_status(StatusCode::CREATED);

        let body = server
            .get(endpoints::TRANSACTIONS)
            .add_cookie(Cookie::new(COOKIE_SESSION, session.to_owned()))
            .await
            .json::<TransactionsResponse>();

        body.transactions
            .last()
            .expect("expected the created transaction to be listed")
            .id
    }

    #[tokio::test]
    async fn get_returns_owned_transaction() {
        let server = get_test_server();
        let id = create_transaction(&server, "session-a").await;

        let response = server
            .get(&format_endpoint(endpoints::TRANSACTION, id))
            .add_cookie(Cookie::new(COOKIE_SESSION, "session-a"))
            .await;

        response.assert_status_ok();
        let body = response.json::<TransactionResponse>();
        let transaction = body.transaction.expect("expected a transaction in the body");
        assert_eq!(transaction.id, id);
        assert_eq!(transaction.title, "Groceries");
        assert_eq!(transaction.amount, -42.0);
    }

    #[tokio::test]
    async fn get_unknown_id_returns_empty_object() {
        let server = get_test_server();

        let response = server
            .get(&format_endpoint(endpoints::TRANSACTION, Uuid::new_v4()))
            .add_cookie(Cookie::new(COOKIE_SESSION, "session-a"))
            .await;

        response.assert_status_ok();
        response.assert_text("{}");
    }

    #[tokio::test]
    async fn get_other_sessions_transaction_returns_empty_object() {
        let server = get_test_server();
        let id = create_transaction(&server, "session-a").await;

        let response = server
            .get(&format_endpoint(endpoints::TRANSACTION, id))
            .add_cookie(Cookie::new(COOKIE_SESSION, "session-b"))
            .await;

        // Indistinguishable from an ID that does not exist.
        response.assert_status_ok();
        response.assert_text("{}");
    }

    #[tokio::test]
    async fn get_with_malformed_id_is_rejected() {
        let server = get_test_server();

        let response = server
            .get("/transactions/not-a-uuid")
            .add_cookie(Cookie::new(COOKIE_SESSION, "session-a"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_without_session_cookie_fails() {
        let server = get_test_server();

        let response = server
            .get(&format_endpoint(endpoints::TRANSACTION, Uuid::new_v4()))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}
