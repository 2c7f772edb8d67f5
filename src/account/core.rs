//! Defines the account model and its database queries.
//!
//! Accounts are owned by the storage layer; the ingestion pipeline only
//! threads an account id through to the transactions it builds.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::Error;

/// The database id of an account.
pub type AccountId = i64;

/// A bank account or credit card that statements are imported against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// The id for the account.
    pub id: AccountId,
    /// The display name of the account.
    pub name: String,
    /// The institution the account is held with.
    #[serde(default)]
    pub company: Option<String>,
    /// The kind of account, e.g. "chequing", "credit_card".
    #[serde(rename = "type", default)]
    pub account_type: Option<String>,
}

/// The fields needed to create an account.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewAccount {
    /// The display name of the account.
    pub name: String,
    /// The institution the account is held with.
    #[serde(default)]
    pub company: Option<String>,
    /// The kind of account.
    #[serde(rename = "type", default)]
    pub account_type: Option<String>,
}

/// Create the account table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_account_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS account (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            company TEXT,
            \"type\" TEXT
        )",
        (),
    )?;

    Ok(())
}

/// Map a database row to an Account.
pub fn map_row_to_account(row: &Row) -> Result<Account, rusqlite::Error> {
    let id = row.get(0)?;
    let name = row.get(1)?;
    let company = row.get(2)?;
    let account_type = row.get(3)?;

    Ok(Account {
        id,
        name,
        company,
        account_type,
    })
}

/// Get every account, ordered by name.
///
/// # Errors
/// Returns an [Error::SqlError] if the query fails.
pub fn get_all_accounts(connection: &Connection) -> Result<Vec<Account>, Error> {
    connection
        .prepare("SELECT id, name, company, \"type\" FROM account ORDER BY name ASC")?
        .query_map([], map_row_to_account)?
        .map(|account_result| account_result.map_err(Error::SqlError))
        .collect()
}

/// Create a new account.
///
/// # Errors
/// Returns an [Error::SqlError] if the insert fails.
pub fn create_account(new_account: &NewAccount, connection: &Connection) -> Result<Account, Error> {
    let account = connection
        .prepare(
            "INSERT INTO account (name, company, \"type\") VALUES (?1, ?2, ?3)
             RETURNING id, name, company, \"type\"",
        )?
        .query_row(
            (
                &new_account.name,
                &new_account.company,
                &new_account.account_type,
            ),
            map_row_to_account,
        )?;

    Ok(account)
}

#[cfg(test)]
mod account_tests {
    use rusqlite::Connection;

    use crate::db::initialize;

    use super::{NewAccount, create_account, get_all_accounts};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn create_assigns_sequential_ids() {
        let conn = get_test_connection();

        let first = create_account(
            &NewAccount {
                name: "Chequing".to_owned(),
                company: Some("RBC".to_owned()),
                account_type: Some("chequing".to_owned()),
            },
            &conn,
        )
        .expect("Could not create account");
        let second = create_account(
            &NewAccount {
                name: "Visa".to_owned(),
                company: None,
                account_type: None,
            },
            &conn,
        )
        .expect("Could not create account");

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn accounts_list_in_name_order() {
        let conn = get_test_connection();
        for name in ["Visa", "Chequing", "Savings"] {
            create_account(
                &NewAccount {
                    name: name.to_owned(),
                    company: None,
                    account_type: None,
                },
                &conn,
            )
            .expect("Could not create account");
        }

        let accounts = get_all_accounts(&conn).expect("Could not list accounts");

        let names: Vec<&str> = accounts.iter().map(|account| account.name.as_str()).collect();
        assert_eq!(names, ["Chequing", "Savings", "Visa"]);
    }

    #[test]
    fn no_accounts_is_an_empty_list() {
        let conn = get_test_connection();

        let accounts = get_all_accounts(&conn).expect("Could not list accounts");

        assert!(accounts.is_empty());
    }
}
