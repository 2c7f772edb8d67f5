//! Applies stored templates to freshly built transactions so repeat vendors
//! inherit the labels the user chose for them last time.

use rusqlite::Connection;

use crate::{
    template::core::{TemplateLookup, TransactionTemplate, find_template},
    transaction::Transaction,
};

/// Overlay stored templates onto a batch of transactions.
///
/// Each transaction is looked up by its exact description. The output keeps
/// the input order, and no lookup outcome can fail the batch: a lookup error
/// is logged and that transaction passes through unchanged, the same as
/// having no template.
pub fn apply_templates(transactions: Vec<Transaction>, connection: &Connection) -> Vec<Transaction> {
    transactions
        .into_iter()
        .map(|transaction| match find_template(&transaction.description, connection) {
            Ok(TemplateLookup::Found(template)) => overlay_template(transaction, template),
            Ok(TemplateLookup::NotFound) => transaction,
            Err(error) => {
                tracing::warn!(
                    "template lookup failed for \"{}\", treating as no template: {error}",
                    transaction.description
                );
                transaction
            }
        })
        .collect()
}

/// Merge a template into a transaction.
///
/// Name and category only overwrite when the template actually carries a
/// non-empty value, so an absent template field never erases the builder's
/// default. The recurrence flag comes from the template when it recorded one,
/// otherwise the transaction keeps its own.
fn overlay_template(mut transaction: Transaction, template: TransactionTemplate) -> Transaction {
    if let Some(name) = template.name.filter(|name| !name.is_empty()) {
        transaction.name = Some(name);
    }

    if let Some(category) = template.category.filter(|category| !category.is_empty()) {
        transaction.category = category;
    }

    transaction.is_reoccuring = template.is_reoccuring.unwrap_or(transaction.is_reoccuring);

    transaction
}

#[cfg(test)]
mod apply_templates_tests {
    use rusqlite::Connection;

    use crate::{
        db::initialize,
        template::{
            core::TransactionTemplate,
            matcher::{apply_templates, overlay_template},
        },
        transaction::Transaction,
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn built_transaction(description: &str) -> Transaction {
        Transaction {
            id: "client-id".to_owned(),
            account_id: None,
            date: "2024-01-05T00:00:00Z".to_owned(),
            name: None,
            description: description.to_owned(),
            amount: -22.99,
            category: "general".to_owned(),
            is_reoccuring: false,
        }
    }

    fn store_template(conn: &Connection, template: &TransactionTemplate) {
        conn.execute(
            "INSERT INTO transaction_template (description, name, category, is_reoccuring)
             VALUES (?1, ?2, ?3, ?4)",
            (
                &template.description,
                &template.name,
                &template.category,
                template.is_reoccuring,
            ),
        )
        .expect("Could not insert template");
    }

    #[test]
    fn matching_template_fills_name_category_and_recurrence() {
        let conn = get_test_connection();
        store_template(
            &conn,
            &TransactionTemplate {
                description: "netflix".to_owned(),
                name: Some("Netflix".to_owned()),
                category: Some("entertainment".to_owned()),
                is_reoccuring: Some(true),
            },
        );

        let got = apply_templates(vec![built_transaction("netflix")], &conn);

        assert_eq!(got[0].name.as_deref(), Some("Netflix"));
        assert_eq!(got[0].category, "entertainment");
        assert!(got[0].is_reoccuring);
    }

    #[test]
    fn transactions_without_templates_pass_through_unchanged() {
        let conn = get_test_connection();

        let transaction = built_transaction("mystery vendor");
        let got = apply_templates(vec![transaction.clone()], &conn);

        assert_eq!(got, vec![transaction]);
    }

    #[test]
    fn output_order_matches_input_order() {
        let conn = get_test_connection();
        store_template(
            &conn,
            &TransactionTemplate {
                description: "netflix".to_owned(),
                name: Some("Netflix".to_owned()),
                category: Some("entertainment".to_owned()),
                is_reoccuring: Some(true),
            },
        );

        let batch = vec![
            built_transaction("tim hortons"),
            built_transaction("netflix"),
            built_transaction("monthly rent"),
        ];
        let got = apply_templates(batch, &conn);

        let descriptions: Vec<&str> = got.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(descriptions, ["tim hortons", "netflix", "monthly rent"]);
    }

    #[test]
    fn empty_template_name_does_not_erase_default() {
        let transaction = built_transaction("netflix");
        let template = TransactionTemplate {
            description: "netflix".to_owned(),
            name: Some(String::new()),
            category: None,
            is_reoccuring: None,
        };

        let got = overlay_template(transaction, template);

        assert_eq!(got.name, None);
        assert_eq!(got.category, "general");
        assert!(!got.is_reoccuring);
    }

    #[test]
    fn template_without_recurrence_keeps_transaction_value() {
        let mut transaction = built_transaction("gym");
        transaction.is_reoccuring = true;
        let template = TransactionTemplate {
            description: "gym".to_owned(),
            name: Some("Gym".to_owned()),
            category: None,
            is_reoccuring: None,
        };

        let got = overlay_template(transaction, template);

        assert!(got.is_reoccuring);
        assert_eq!(got.name.as_deref(), Some("Gym"));
    }
}
