//! Creates the application's database schema.

use rusqlite::Connection;

use crate::{
    Error, account::create_account_table, template::create_template_table,
    transaction::create_transaction_table,
};

/// Create the application's tables in the database if they do not exist.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", "ON")?;

    create_account_table(connection)?;
    create_transaction_table(connection)?;
    create_template_table(connection)?;

    Ok(())
}

#[cfg(test)]
mod initialize_tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).expect("Could not initialize database");

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
                 AND name IN ('account', 'transaction', 'transaction_template')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).expect("Could not initialize database");
        initialize(&conn).expect("Second initialize failed");
    }
}
