//! Defines the core data model and database queries for transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, account::AccountId, category};

// ============================================================================
// MODELS
// ============================================================================

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Built in memory by the statement pipeline with a client-generated identity;
/// the identity is discarded and regenerated when the transaction is saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The client-visible identifier, a UUID string.
    pub id: String,
    /// The account this transaction was imported against, if any.
    #[serde(default)]
    pub account_id: Option<AccountId>,
    /// When the transaction happened, as an RFC-3339 instant.
    ///
    /// Rows whose source date was absent or unparseable carry the sentinel
    /// strings "No Date" and "Invalid Date" instead, so a human can spot and
    /// correct them before saving.
    pub date: String,
    /// An optional display name, usually inherited from a template.
    #[serde(default)]
    pub name: Option<String>,
    /// The cleaned description used as the transaction's vendor identity.
    ///
    /// Never empty for built transactions: rows without a usable description
    /// carry the "No Description" sentinel.
    pub description: String,
    /// The amount of money spent or earned in this transaction.
    ///
    /// Negative values are spending, positive values income; the sign is
    /// preserved from the source and no currency conversion is performed.
    pub amount: f64,
    /// The category tag, e.g. "groceries".
    #[serde(default = "default_category")]
    pub category: String,
    /// Whether this is a recurring payment such as rent or a subscription.
    #[serde(default)]
    pub is_reoccuring: bool,
}

fn default_category() -> String {
    category::GENERAL.to_owned()
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Persist a transaction, discarding its client-side identity.
///
/// The stored row gets a freshly generated identity; the returned transaction
/// carries it.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error, e.g. the account
/// reference does not exist.
pub fn create_transaction(
    transaction: &Transaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let id = Uuid::new_v4().to_string();

    connection
        .prepare(
            "INSERT INTO \"transaction\"
             (id, account_id, date, name, description, amount, category, is_reoccuring)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?
        .execute((
            &id,
            transaction.account_id,
            &transaction.date,
            &transaction.name,
            &transaction.description,
            transaction.amount,
            &transaction.category,
            transaction.is_reoccuring,
        ))?;

    Ok(Transaction {
        id,
        ..transaction.clone()
    })
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_transaction(id: &str, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, account_id, date, name, description, amount, category, is_reoccuring
             FROM \"transaction\" WHERE id = ?1",
        )?
        .query_row([id], map_transaction_row)?;

    Ok(transaction)
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u64, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get::<_, i64>(0).map(|count| count as u64)
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
                id TEXT PRIMARY KEY,
                account_id INTEGER,
                date TEXT NOT NULL,
                name TEXT,
                description TEXT NOT NULL,
                amount REAL NOT NULL,
                category TEXT NOT NULL DEFAULT 'general',
                is_reoccuring INTEGER NOT NULL DEFAULT 0,
                FOREIGN KEY(account_id) REFERENCES account(id) ON UPDATE CASCADE ON DELETE SET NULL
                )",
        (),
    )?;

    // Composite index used by the date-bounded list queries.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date, id);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let account_id = row.get(1)?;
    let date = row.get(2)?;
    let name = row.get(3)?;
    let description = row.get(4)?;
    let amount = row.get(5)?;
    let category = row.get(6)?;
    let is_reoccuring = row.get(7)?;

    Ok(Transaction {
        id,
        account_id,
        date,
        name,
        description,
        amount,
        category,
        is_reoccuring,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        db::initialize,
        transaction::{Transaction, count_transactions, create_transaction, get_transaction},
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn sample_transaction() -> Transaction {
        Transaction {
            id: "temp-client-id".to_owned(),
            account_id: None,
            date: "2024-01-05T00:00:00Z".to_owned(),
            name: Some("Tim Hortons".to_owned()),
            description: "tim hortons".to_owned(),
            amount: -12.50,
            category: "take_out".to_owned(),
            is_reoccuring: false,
        }
    }

    #[test]
    fn create_regenerates_identity() {
        let conn = get_test_connection();
        let transaction = sample_transaction();

        let saved = create_transaction(&transaction, &conn).expect("Could not save transaction");

        assert_ne!(saved.id, transaction.id);
        assert_eq!(saved.amount, transaction.amount);
    }

    #[test]
    fn saved_transaction_round_trips_by_id() {
        let conn = get_test_connection();
        let transaction = sample_transaction();

        let saved = create_transaction(&transaction, &conn).expect("Could not save transaction");
        let got = get_transaction(&saved.id, &conn).expect("Could not fetch transaction");

        assert_eq!(saved, got);
        assert_eq!(got.description, transaction.description);
        assert_eq!(got.amount, transaction.amount);
        assert_eq!(got.date, transaction.date);
        assert_eq!(got.category, transaction.category);
        assert_eq!(got.is_reoccuring, transaction.is_reoccuring);
    }

    #[test]
    fn get_missing_transaction_is_not_found() {
        let conn = get_test_connection();

        let result = get_transaction("does-not-exist", &conn);

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn get_count() {
        let conn = get_test_connection();
        let want_count = 20;
        for _ in 0..want_count {
            create_transaction(&sample_transaction(), &conn)
                .expect("Could not create transaction");
        }

        let got_count = count_transactions(&conn).expect("Could not get count");

        assert_eq!(want_count, got_count);
    }
}
