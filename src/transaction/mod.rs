//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - The `TransactionKind` enum separating income from expenses
//! - Database functions for storing, listing, and deleting transactions

mod core;

pub use core::{
    Transaction, TransactionBuilder, TransactionKind, count_transactions, create_transaction,
    create_transaction_table, delete_transaction, get_transaction, transactions_for_owner,
};
