//! Database query helpers for filtered transaction listings.

use rusqlite::{Connection, params_from_iter};

use crate::{Error, transaction::core::{Transaction, map_transaction_row}};

/// The filters a list request can apply to the transaction set.
///
/// All filters are optional and combine with AND; the same filter set drives
/// the paginated listing, the summary aggregate, and the CSV export so the
/// three views never disagree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    /// Case-insensitive substring match against name and description.
    pub search: Option<String>,
    /// Inclusive lower date bound, as an RFC-3339 instant or calendar date.
    pub start_date: Option<String>,
    /// Inclusive upper date bound.
    pub end_date: Option<String>,
    /// Categories to include. Empty means all categories.
    pub categories: Vec<String>,
}

impl TransactionFilter {
    /// Build the WHERE clause and its positional parameters.
    ///
    /// Returns an empty clause when no filter is set. Date bounds compare as
    /// strings, which is correct because dates are stored as RFC-3339 text.
    fn where_clause(&self) -> (String, Vec<String>) {
        let mut clauses = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(search) = self.search.as_deref().filter(|search| !search.is_empty()) {
            params.push(format!("%{search}%"));
            let name_param = params.len();
            params.push(format!("%{search}%"));
            let description_param = params.len();
            clauses.push(format!(
                "(name LIKE ?{name_param} OR description LIKE ?{description_param})"
            ));
        }

        if let Some(start_date) = &self.start_date {
            params.push(start_date.clone());
            clauses.push(format!("date >= ?{}", params.len()));
        }

        if let Some(end_date) = &self.end_date {
            params.push(end_date.clone());
            clauses.push(format!("date <= ?{}", params.len()));
        }

        if !self.categories.is_empty() {
            let placeholders: Vec<String> = self
                .categories
                .iter()
                .map(|category| {
                    params.push(category.clone());
                    format!("?{}", params.len())
                })
                .collect();
            clauses.push(format!("category IN ({})", placeholders.join(", ")));
        }

        if clauses.is_empty() {
            (String::new(), params)
        } else {
            (format!("WHERE {}", clauses.join(" AND ")), params)
        }
    }
}

/// Count the transactions matching `filter`.
///
/// # Errors
/// Returns an [Error::SqlError] if the query fails.
pub fn count_filtered_transactions(
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<u64, Error> {
    let (where_clause, params) = filter.where_clause();
    let query = format!("SELECT COUNT(id) FROM \"transaction\" {where_clause}");

    connection
        .prepare(&query)?
        .query_row(params_from_iter(params), |row| {
            row.get::<_, i64>(0).map(|count| count as u64)
        })
        .map_err(|error| error.into())
}

/// Get one page of the transactions matching `filter`, newest first.
///
/// Transactions are ordered by date descending, then id, to keep the order
/// stable across requests.
///
/// # Errors
/// Returns an [Error::SqlError] if the query fails.
pub fn get_filtered_transactions_page(
    filter: &TransactionFilter,
    page_size: u64,
    offset: u64,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let (where_clause, params) = filter.where_clause();
    let query = format!(
        "SELECT id, account_id, date, name, description, amount, category, is_reoccuring
         FROM \"transaction\" {where_clause}
         ORDER BY date DESC, id ASC LIMIT {page_size} OFFSET {offset}"
    );

    collect_transactions(&query, params, connection)
}

/// Get all transactions matching `filter`, newest first and unpaginated.
///
/// Feeds the summary aggregate and the CSV download, both of which must cover
/// the full filtered set rather than the current page.
///
/// # Errors
/// Returns an [Error::SqlError] if the query fails.
pub fn get_filtered_transactions(
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let (where_clause, params) = filter.where_clause();
    let query = format!(
        "SELECT id, account_id, date, name, description, amount, category, is_reoccuring
         FROM \"transaction\" {where_clause}
         ORDER BY date DESC, id ASC"
    );

    collect_transactions(&query, params, connection)
}

fn collect_transactions(
    query: &str,
    params: Vec<String>,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(query)?
        .query_map(params_from_iter(params), map_transaction_row)?
        .map(|transaction_result| transaction_result.map_err(Error::SqlError))
        .collect()
}
