//! Defines the endpoint for listing a session's transactions.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    session::SessionId,
    transaction::{Transaction, core::list_transactions},
};

/// The response body for the transaction list endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionsResponse {
    /// All transactions owned by the requesting session.
    pub transactions: Vec<Transaction>,
}

/// A route handler for listing all of a session's transactions.
///
/// Requires a session cookie; requests without one are rejected with 401
/// before this handler runs.
pub async fn list_transactions_endpoint(
    State(state): State<AppState>,
    session_id: SessionId,
) -> Result<Json<TransactionsResponse>, Error> {
    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLock
    })?;

    let transactions = list_transactions(&session_id, &connection)?;

    Ok(Json(TransactionsResponse { transactions }))
}

#[cfg(test)]
mod list_endpoint_tests {
    use axum::http::StatusCode;
    use axum_extra::extract::cookie::Cookie;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{
        AppState, build_router, endpoints, session::COOKIE_SESSION,
        transaction::list_endpoint::TransactionsResponse,
    };

    fn get_test_server() -> TestServer {
        let connection =
            Connection::open_in_memory().expect("Could not open database in memory.");
        let state = AppState::new(connection).expect("Could not initialize database.");

        TestServer::new(build_router(state))
    }

    async fn create_transaction(server: &TestServer, session: &str, title: &str, amount: f64) {
        server
            .post(endpoints::TRANSACTIONS)
            .add_cookie(Cookie::new(COOKIE_SESSION, session.to_owned()))
            .json(&json!({ "title": title, "amount": amount, "type": "credit" }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    #[tokio::test]
    async fn list_returns_created_transactions() {
        let server = get_test_server();
        for i in 1..=3 {
            create_transaction(&server, "session-a", &format!("entry {i}"), i as f64).await;
        }

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_cookie(Cookie::new(COOKIE_SESSION, "session-a"))
            .await;

        response.assert_status_ok();
        let body = response.json::<TransactionsResponse>();
        assert_eq!(
            body.transactions.len(),
            3,
            "got {} transactions, want 3",
            body.transactions.len()
        );
    }

    #[tokio::test]
    async fn list_excludes_other_sessions() {
        let server = get_test_server();
        create_transaction(&server, "session-a", "mine", 10.0).await;
        create_transaction(&server, "session-b", "theirs", 20.0).await;

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_cookie(Cookie::new(COOKIE_SESSION, "session-a"))
            .await;

        response.assert_status_ok();
        let body = response.json::<TransactionsResponse>();
        assert_eq!(body.transactions.len(), 1);
        assert_eq!(body.transactions[0].title, "mine");
    }

    #[tokio::test]
    async fn list_returns_empty_sequence_for_fresh_session() {
        let server = get_test_server();

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_cookie(Cookie::new(COOKIE_SESSION, "session-a"))
            .await;

        response.assert_status_ok();
        let body = response.json::<TransactionsResponse>();
        assert!(body.transactions.is_empty());
    }

    #[tokio::test]
    async fn list_without_session_cookie_fails() {
        let server = get_test_server();

        let response = server.get(endpoints::TRANSACTIONS).await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}
