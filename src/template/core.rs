//! Defines the transaction template model and its database queries.
//!
//! A template records the name, category, and recurrence the user last chose
//! for a given cleaned description. At most one template exists per distinct
//! description; saving a batch overwrites the templates of every description
//! it contains, which is what makes categorization sticky across uploads.

use std::collections::HashSet;

use rusqlite::{Connection, Row};

use crate::{Error, transaction::Transaction};

/// A stored description-to-labels mapping used to auto-fill repeat vendors.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionTemplate {
    /// The cleaned description this template is keyed on.
    pub description: String,
    /// The display name to apply, if one was recorded.
    pub name: Option<String>,
    /// The category to apply, if one was recorded.
    pub category: Option<String>,
    /// The recurrence flag to apply, if one was recorded.
    pub is_reoccuring: Option<bool>,
}

/// The outcome of a template lookup that completed without error.
#[derive(Debug, PartialEq)]
pub enum TemplateLookup {
    /// A template exists for the description.
    Found(TransactionTemplate),
    /// No template has been stored for the description.
    NotFound,
}

/// Look up the template stored for an exact `description`.
///
/// # Errors
/// Returns an [Error::SqlError] if the query itself fails; a description with
/// no template is [TemplateLookup::NotFound], not an error.
pub fn find_template(description: &str, connection: &Connection) -> Result<TemplateLookup, Error> {
    let result = connection
        .prepare(
            "SELECT description, name, category, is_reoccuring FROM transaction_template
             WHERE description = ?1",
        )?
        .query_row([description], map_template_row);

    match result {
        Ok(template) => Ok(TemplateLookup::Found(template)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(TemplateLookup::NotFound),
        Err(error) => Err(error.into()),
    }
}

/// Upsert one template per unique description in the batch.
///
/// The batch is deduplicated by description with the first occurrence, in
/// input order, winning; each surviving entry overwrites any existing
/// template for that description. Returns how many templates were written.
///
/// # Errors
/// Returns an [Error::SqlError] if an upsert fails.
pub fn upsert_templates(
    transactions: &[Transaction],
    connection: &Connection,
) -> Result<usize, Error> {
    let mut stmt = connection.prepare(
        "INSERT INTO transaction_template (description, name, category, is_reoccuring)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(description) DO UPDATE SET
             name = excluded.name,
             category = excluded.category,
             is_reoccuring = excluded.is_reoccuring",
    )?;

    let mut seen = HashSet::new();
    let mut written = 0;

    for transaction in transactions {
        if !seen.insert(transaction.description.as_str()) {
            continue;
        }

        stmt.execute((
            &transaction.description,
            &transaction.name,
            &transaction.category,
            transaction.is_reoccuring,
        ))?;
        written += 1;
    }

    Ok(written)
}

/// Create the transaction template table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_template_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transaction_template (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL UNIQUE,
                name TEXT,
                category TEXT,
                is_reoccuring INTEGER
                )",
        (),
    )?;

    Ok(())
}

fn map_template_row(row: &Row) -> Result<TransactionTemplate, rusqlite::Error> {
    let description = row.get(0)?;
    let name = row.get(1)?;
    let category = row.get(2)?;
    let is_reoccuring = row.get(3)?;

    Ok(TransactionTemplate {
        description,
        name,
        category,
        is_reoccuring,
    })
}

#[cfg(test)]
mod template_store_tests {
    use rusqlite::Connection;

    use crate::{
        db::initialize,
        template::core::{TemplateLookup, find_template, upsert_templates},
        transaction::Transaction,
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn transaction_with(description: &str, name: Option<&str>, category: &str) -> Transaction {
        Transaction {
            id: "client-id".to_owned(),
            account_id: None,
            date: "2024-01-05T00:00:00Z".to_owned(),
            name: name.map(str::to_owned),
            description: description.to_owned(),
            amount: -10.0,
            category: category.to_owned(),
            is_reoccuring: false,
        }
    }

    #[test]
    fn missing_template_is_not_found() {
        let conn = get_test_connection();

        let lookup = find_template("netflix", &conn).expect("Lookup failed");

        assert_eq!(lookup, TemplateLookup::NotFound);
    }

    #[test]
    fn upsert_then_find_round_trips() {
        let conn = get_test_connection();
        let batch = [transaction_with(
            "netflix",
            Some("Netflix"),
            "entertainment",
        )];

        let written = upsert_templates(&batch, &conn).expect("Could not write templates");
        assert_eq!(written, 1);

        let lookup = find_template("netflix", &conn).expect("Lookup failed");
        let TemplateLookup::Found(template) = lookup else {
            panic!("want template, got NotFound");
        };
        assert_eq!(template.name.as_deref(), Some("Netflix"));
        assert_eq!(template.category.as_deref(), Some("entertainment"));
        assert_eq!(template.is_reoccuring, Some(false));
    }

    #[test]
    fn first_occurrence_per_description_wins() {
        let conn = get_test_connection();
        let batch = [
            transaction_with("netflix", Some("Netflix"), "entertainment"),
            transaction_with("netflix", Some("Not Netflix"), "bills"),
        ];

        let written = upsert_templates(&batch, &conn).expect("Could not write templates");
        assert_eq!(written, 1);

        let TemplateLookup::Found(template) =
            find_template("netflix", &conn).expect("Lookup failed")
        else {
            panic!("want template, got NotFound");
        };
        assert_eq!(template.name.as_deref(), Some("Netflix"));
        assert_eq!(template.category.as_deref(), Some("entertainment"));
    }

    #[test]
    fn later_batch_overwrites_existing_template() {
        let conn = get_test_connection();

        upsert_templates(
            &[transaction_with("netflix", Some("Netflix"), "entertainment")],
            &conn,
        )
        .expect("Could not write templates");
        upsert_templates(
            &[transaction_with("netflix", Some("Netflix HH"), "bills")],
            &conn,
        )
        .expect("Could not write templates");

        let TemplateLookup::Found(template) =
            find_template("netflix", &conn).expect("Lookup failed")
        else {
            panic!("want template, got NotFound");
        };
        assert_eq!(template.name.as_deref(), Some("Netflix HH"));
        assert_eq!(template.category.as_deref(), Some("bills"));
    }

    #[test]
    fn templates_for_distinct_descriptions_coexist() {
        let conn = get_test_connection();
        let batch = [
            transaction_with("netflix", Some("Netflix"), "entertainment"),
            transaction_with("tim hortons", None, "take_out"),
        ];

        let written = upsert_templates(&batch, &conn).expect("Could not write templates");

        assert_eq!(written, 2);
        assert!(matches!(
            find_template("tim hortons", &conn),
            Ok(TemplateLookup::Found(_))
        ));
    }
}
