//! Transaction management for the ledger API.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the database functions for storing and
//!   querying rows
//! - The request handlers for creating, listing, getting, and summarizing a
//!   session's transactions

mod core;
mod create_endpoint;
mod get_endpoint;
mod list_endpoint;
mod summary_endpoint;

pub use core::{Transaction, TransactionId, TransactionKind, create_transaction_table};
pub use create_endpoint::{CreateTransactionBody, create_transaction_endpoint};
pub use get_endpoint::{TransactionResponse, get_transaction_endpoint};
pub use list_endpoint::{TransactionsResponse, list_transactions_endpoint};
pub use summary_endpoint::{Summary, SummaryResponse, summarize_transactions_endpoint};
