//! Homeledger is the storage and aggregation core of a personal finance
//! tracker for a small household.
//!
//! This library provides an owner-scoped SQLite transaction store and a pure
//! aggregation engine that turns a transaction set into dashboard-ready
//! derived data: summary totals, a per-category expense breakdown with
//! deterministic chart colors, a per-tag drill-down within one category, and
//! a zero-filled monthly trend series. The chart functions map those
//! aggregates onto ECharts specifications.

#![warn(missing_docs)]

mod dashboard;
mod database_id;
mod db;
mod transaction;

pub use dashboard::{
    CATEGORY_COLORS, CategorySlice, Summary, TagSlice, TrendPoint, UNTAGGED_LABEL,
    category_pie_chart, monthly_trend, summarize, tag_breakdown, tag_breakdown_chart,
    trend_bar_chart,
};
pub use database_id::{DatabaseId, OwnerId, TransactionId};
pub use db::initialize as initialize_db;
pub use transaction::{
    Transaction, TransactionBuilder, TransactionKind, count_transactions, create_transaction,
    delete_transaction, get_transaction, transactions_for_owner,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A negative amount was used to create a transaction.
    ///
    /// Amounts are stored without a sign; whether money came in or went out
    /// is recorded by the transaction kind instead.
    #[error("transaction amounts must not be negative, got {0}")]
    NegativeAmount(f64),

    /// The requested resource was not found.
    ///
    /// Callers should check that the ID is correct and that the resource has
    /// been created. Internally, this error may occur when a query returns no
    /// rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}
