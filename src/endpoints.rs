//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/transactions/{transaction_id}',
//! use [format_endpoint].

use crate::transaction::TransactionId;

/// The root route which returns a plain greeting.
pub const ROOT: &str = "/";
/// The route to create and list transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route to get a single transaction.
pub const TRANSACTION: &str = "/transactions/{transaction_id}";
/// The route to get the running balance for a session.
pub const TRANSACTION_SUMMARY: &str = "/transactions/summary";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace and ends with a
/// right brace, e.g. '{transaction_id}' in [TRANSACTION]. This function
/// assumes an endpoint path contains at most one parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: TransactionId) -> String {
    match (endpoint_path.find('{'), endpoint_path.rfind('}')) {
        (Some(start), Some(end)) if start < end => {
            format!("{}{}{}", &endpoint_path[..start], id, &endpoint_path[end + 1..])
        }
        _ => endpoint_path.to_owned(),
    }
}
