//! Database ID type definitions.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;

/// The ID of a stored transaction.
pub type TransactionId = i64;

/// The ID of the user that owns a set of transactions.
pub type OwnerId = i64;
