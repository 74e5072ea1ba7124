//! Application router configuration.

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    AppState, endpoints,
    transaction::{
        create_transaction_endpoint, get_transaction_endpoint, list_transactions_endpoint,
        summarize_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// The read routes require a session cookie and answer 401 without one; the
/// create route instead sets up a session for clients that lack one.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index))
        .route(
            endpoints::TRANSACTIONS,
            post(create_transaction_endpoint).get(list_transactions_endpoint),
        )
        .route(
            endpoints::TRANSACTION_SUMMARY,
            get(summarize_transactions_endpoint),
        )
        .route(endpoints::TRANSACTION, get(get_transaction_endpoint))
        .with_state(state)
}

/// The root path '/' responds with a plain greeting, useful as a liveness
/// check.
async fn get_index() -> &'static str {
    "Hello world!"
}

#[cfg(test)]
mod root_route_tests {
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{AppState, build_router, endpoints};

    #[tokio::test]
    async fn root_responds_with_greeting() {
        let connection =
            Connection::open_in_memory().expect("Could not open database in memory.");
        let state = AppState::new(connection).expect("Could not initialize database.");
        let server =
            TestServer::new(build_router(state));

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_ok();
        response.assert_text("Hello world!");
    }
}
