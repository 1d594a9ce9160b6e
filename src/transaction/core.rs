//! Defines the core data models and database queries for transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    database_id::{OwnerId, TransactionId},
};

// ============================================================================
// MODELS
// ============================================================================

/// Whether a transaction brought money in or spent it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Money earned, e.g. a salary payment.
    Income,
    /// Money spent, e.g. groceries or rent.
    Expense,
}

impl TransactionKind {
    /// The string stored in the database for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "INCOME",
            TransactionKind::Expense => "EXPENSE",
        }
    }

    fn from_db(value: &str) -> Option<Self> {
        match value {
            "INCOME" => Some(TransactionKind::Income),
            "EXPENSE" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Every transaction belongs to exactly one owner. Transactions are immutable
/// once created and are removed only by deletion.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The ID of the user that owns this transaction.
    pub owner_id: OwnerId,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned in this transaction.
    ///
    /// Amounts are non-negative; [kind](Transaction::kind) records the
    /// direction of the money flow.
    pub amount: f64,
    /// Whether this transaction is income or an expense.
    pub kind: TransactionKind,
    /// The top-level classification of the transaction, e.g. "Food".
    ///
    /// Any string is accepted; the closed set a UI may suggest is not
    /// enforced here.
    pub category: String,
    /// An optional finer-grained label within the category, e.g. "Lunch".
    pub tag: Option<String>,
    /// When the transaction happened.
    pub date: Date,
    /// Whether this transaction repeats every month.
    ///
    /// Informational only. Recurring transactions are aggregated exactly like
    /// any other transaction.
    pub is_recurring: bool,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        owner_id: OwnerId,
        amount: f64,
        kind: TransactionKind,
        category: &str,
        date: Date,
    ) -> TransactionBuilder {
        TransactionBuilder {
            owner_id,
            amount,
            kind,
            category: category.to_owned(),
            description: String::new(),
            tag: None,
            date,
            is_recurring: false,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// Optional fields default to empty or unset. Pass the builder to
/// [create_transaction] to store the transaction and receive the finished
/// [Transaction] with its assigned ID.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The ID of the user that will own the transaction.
    pub owner_id: OwnerId,
    /// The monetary amount of the transaction.
    ///
    /// Must not be negative; [create_transaction] rejects negative amounts.
    pub amount: f64,
    /// Whether the transaction is income or an expense.
    pub kind: TransactionKind,
    /// The category of the transaction, e.g. "Food", "Transport", "Housing".
    pub category: String,
    /// A human-readable description of the transaction.
    pub description: String,
    /// An optional sub-label within the category.
    pub tag: Option<String>,
    /// The date when the transaction occurred.
    pub date: Date,
    /// Whether the transaction repeats every month.
    pub is_recurring: bool,
}

impl TransactionBuilder {
    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set the tag for the transaction.
    pub fn tag(mut self, tag: Option<&str>) -> Self {
        self.tag = tag.map(str::to_owned);
        self
    }

    /// Mark the transaction as recurring.
    pub fn recurring(mut self, is_recurring: bool) -> Self {
        self.is_recurring = is_recurring;
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database from a builder.
///
/// # Errors
/// This function will return a:
/// - [Error::NegativeAmount] if the builder's amount is negative,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    // Validated here so the aggregation engine can assume non-negative input.
    if builder.amount < 0.0 {
        return Err(Error::NegativeAmount(builder.amount));
    }

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (owner_id, description, amount, kind, category, tag, date, is_recurring)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             RETURNING id, owner_id, description, amount, kind, category, tag, date, is_recurring",
        )?
        .query_row(
            (
                builder.owner_id,
                builder.description,
                builder.amount,
                builder.kind.as_str(),
                builder.category,
                builder.tag,
                builder.date,
                builder.is_recurring,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, owner_id, description, amount, kind, category, tag, date, is_recurring
             FROM \"transaction\" WHERE id = :id",
        )?
        .query_one(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Delete a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingTransaction] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_deleted = connection.execute("DELETE FROM \"transaction\" WHERE id = ?1", (id,))?;

    if rows_deleted == 0 {
        return Err(Error::DeleteMissingTransaction);
    }

    Ok(())
}

/// Retrieve all transactions belonging to `owner_id`, newest first.
///
/// This is the list operation the dashboard aggregations consume. Rows from
/// other owners are never returned.
///
/// Rows whose stored kind or date cannot be decoded are skipped with a
/// warning, so a single bad historical record does not block a dashboard
/// render.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is a SQL error.
pub fn transactions_for_owner(
    owner_id: OwnerId,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let mut statement = connection.prepare(
        "SELECT id, owner_id, description, amount, kind, category, tag, date, is_recurring
         FROM \"transaction\"
         WHERE owner_id = :owner_id
         ORDER BY date DESC, id DESC",
    )?;

    let rows = statement.query_map(&[(":owner_id", &owner_id)], |row| {
        let id: TransactionId = row.get(0)?;
        Ok((id, map_transaction_row(row)))
    })?;

    let mut transactions = Vec::new();

    for row in rows {
        let (id, maybe_transaction) = row?;

        match maybe_transaction {
            Ok(transaction) => transactions.push(transaction),
            Err(
                error @ (rusqlite::Error::FromSqlConversionFailure(..)
                | rusqlite::Error::InvalidColumnType(..)),
            ) => {
                tracing::warn!("skipping malformed transaction row {id}: {error}");
            }
            Err(error) => return Err(error.into()),
        }
    }

    Ok(transactions)
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                owner_id INTEGER NOT NULL,
                description TEXT NOT NULL,
                amount REAL NOT NULL,
                kind TEXT NOT NULL,
                category TEXT NOT NULL,
                tag TEXT,
                date TEXT NOT NULL,
                is_recurring INTEGER NOT NULL DEFAULT 0
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0)",
        (),
    )?;

    // Composite index used by the owner-scoped dashboard query.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_owner_date ON \"transaction\"(owner_id, date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let raw_kind: String = row.get(4)?;
    let kind = TransactionKind::from_db(&raw_kind).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            rusqlite::types::Type::Text,
            format!("unknown transaction kind {raw_kind:?}").into(),
        )
    })?;

    Ok(Transaction {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        description: row.get(2)?,
        amount: row.get(3)?,
        kind,
        category: row.get(5)?,
        tag: row.get(6)?,
        date: row.get(7)?,
        is_recurring: row.get(8)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        transaction::{
            Transaction, TransactionKind, count_transactions, create_transaction,
            delete_transaction, get_transaction, transactions_for_owner,
        },
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();

        let result = create_transaction(
            Transaction::build(
                1,
                12.3,
                TransactionKind::Expense,
                "Food",
                date!(2025 - 10 - 05),
            )
            .description("Lunch at the corner cafe")
            .tag(Some("Lunch")),
            &conn,
        );

        match result {
            Ok(transaction) => {
                assert!(transaction.id > 0);
                assert_eq!(transaction.owner_id, 1);
                assert_eq!(transaction.amount, 12.3);
                assert_eq!(transaction.kind, TransactionKind::Expense);
                assert_eq!(transaction.category, "Food");
                assert_eq!(transaction.tag.as_deref(), Some("Lunch"));
                assert_eq!(transaction.date, date!(2025 - 10 - 05));
                assert!(!transaction.is_recurring);
            }
            Err(error) => panic!("Unexpected error: {error}"),
        }
    }

    #[test]
    fn create_fails_on_negative_amount() {
        let conn = get_test_connection();

        let result = create_transaction(
            Transaction::build(
                1,
                -12.3,
                TransactionKind::Expense,
                "Food",
                date!(2025 - 10 - 05),
            ),
            &conn,
        );

        assert_eq!(result, Err(Error::NegativeAmount(-12.3)));
    }

    #[test]
    fn create_stores_recurring_flag() {
        let conn = get_test_connection();

        let transaction = create_transaction(
            Transaction::build(
                1,
                1200.0,
                TransactionKind::Expense,
                "Housing",
                date!(2025 - 10 - 01),
            )
            .recurring(true),
            &conn,
        )
        .unwrap();

        let stored = get_transaction(transaction.id, &conn).unwrap();

        assert!(stored.is_recurring);
    }

    #[test]
    fn get_transaction_by_id_succeeds() {
        let conn = get_test_connection();
        let transaction = create_transaction(
            Transaction::build(
                1,
                45.0,
                TransactionKind::Income,
                "Salary",
                date!(2025 - 09 - 30),
            ),
            &conn,
        )
        .unwrap();

        let selected_transaction = get_transaction(transaction.id, &conn);

        assert_eq!(Ok(transaction), selected_transaction);
    }

    #[test]
    fn get_transaction_fails_on_invalid_id() {
        let conn = get_test_connection();
        let transaction = create_transaction(
            Transaction::build(
                1,
                45.0,
                TransactionKind::Income,
                "Salary",
                date!(2025 - 09 - 30),
            ),
            &conn,
        )
        .unwrap();

        let maybe_transaction = get_transaction(transaction.id + 654, &conn);

        assert_eq!(maybe_transaction, Err(Error::NotFound));
    }

    #[test]
    fn delete_removes_transaction() {
        let conn = get_test_connection();
        let transaction = create_transaction(
            Transaction::build(
                1,
                45.0,
                TransactionKind::Expense,
                "Food",
                date!(2025 - 09 - 30),
            ),
            &conn,
        )
        .unwrap();

        delete_transaction(transaction.id, &conn).unwrap();

        assert_eq!(get_transaction(transaction.id, &conn), Err(Error::NotFound));
    }

    #[test]
    fn delete_fails_on_missing_transaction() {
        let conn = get_test_connection();

        let result = delete_transaction(1337, &conn);

        assert_eq!(result, Err(Error::DeleteMissingTransaction));
    }

    #[test]
    fn transactions_for_owner_excludes_other_owners() {
        let conn = get_test_connection();
        let want = create_transaction(
            Transaction::build(
                1,
                45.0,
                TransactionKind::Expense,
                "Food",
                date!(2025 - 09 - 30),
            ),
            &conn,
        )
        .unwrap();
        create_transaction(
            Transaction::build(
                2,
                99.0,
                TransactionKind::Expense,
                "Food",
                date!(2025 - 09 - 30),
            ),
            &conn,
        )
        .unwrap();

        let got = transactions_for_owner(1, &conn).unwrap();

        assert_eq!(got, vec![want]);
    }

    #[test]
    fn transactions_for_owner_orders_newest_first() {
        let conn = get_test_connection();
        let dates = [
            date!(2025 - 08 - 15),
            date!(2025 - 10 - 01),
            date!(2025 - 09 - 20),
        ];

        let mut want = Vec::new();
        for date in dates {
            want.push(
                create_transaction(
                    Transaction::build(1, 10.0, TransactionKind::Expense, "Food", date),
                    &conn,
                )
                .unwrap(),
            );
        }
        want.sort_by(|a, b| b.date.cmp(&a.date));

        let got = transactions_for_owner(1, &conn).unwrap();

        assert_eq!(got, want, "transactions were not sorted newest first");
    }

    #[test]
    fn transactions_for_owner_skips_malformed_rows() {
        let conn = get_test_connection();
        let want = create_transaction(
            Transaction::build(
                1,
                45.0,
                TransactionKind::Expense,
                "Food",
                date!(2025 - 09 - 30),
            ),
            &conn,
        )
        .unwrap();

        // Simulate bad historical rows written by an older version.
        conn.execute(
            "INSERT INTO \"transaction\" (owner_id, description, amount, kind, category, tag, date, is_recurring)
             VALUES (1, '', 10.0, 'TRANSFER', 'Food', NULL, '2025-09-01', 0)",
            (),
        )
        .unwrap();
        conn.execute(
            "INSERT INTO \"transaction\" (owner_id, description, amount, kind, category, tag, date, is_recurring)
             VALUES (1, '', 10.0, 'EXPENSE', 'Food', NULL, 'not-a-date', 0)",
            (),
        )
        .unwrap();

        let got = transactions_for_owner(1, &conn).unwrap();

        assert_eq!(got, vec![want]);
    }

    #[test]
    fn get_count() {
        let conn = get_test_connection();
        let today = date!(2025 - 10 - 05);
        let want_count = 20;
        for i in 1..=want_count {
            create_transaction(
                Transaction::build(1, i as f64, TransactionKind::Expense, "Food", today),
                &conn,
            )
            .expect("Could not create transaction");
        }

        let got_count = count_transactions(&conn).expect("Could not get count");

        assert_eq!(want_count, got_count);
    }
}
