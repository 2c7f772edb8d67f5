//! Route handler for listing, filtering, summarizing, and downloading
//! transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error, category,
    pagination::{PageMetadata, PaginationConfig},
    transaction::{
        Transaction,
        csv_export::{csv_download_response, transactions_to_csv},
        query::{
            TransactionFilter, count_filtered_transactions, get_filtered_transactions,
            get_filtered_transactions_page,
        },
        summary::{Summary, summarize},
    },
};

/// The state needed for the transaction list and save routes.
#[derive(Debug, Clone)]
pub struct TransactionState {
    /// The database connection for querying transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The query parameters accepted by the transaction list route.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Substring to match against name and description.
    pub search: Option<String>,
    /// Inclusive lower date bound.
    pub start_date: Option<String>,
    /// Inclusive upper date bound.
    pub end_date: Option<String>,
    /// Comma-separated category keys to include.
    pub category: Option<String>,
    /// The page to return, starting at 1.
    pub page: Option<u64>,
    /// How many rows per page.
    pub page_size: Option<u64>,
    /// When true, return the full filtered set as a CSV attachment.
    #[serde(default)]
    pub download: bool,
    /// When true, include a summary computed over the full filtered set.
    #[serde(default)]
    pub summary: bool,
}

/// One page of transactions with its paging metadata and optional summary.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    /// The page of transactions.
    pub data: Vec<Transaction>,
    /// Paging metadata for the full filtered set.
    pub metadata: PageMetadata,
    /// The summary over the full filtered set, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
}

/// A route handler for listing transactions.
///
/// Filters, the summary, and the CSV download all run over the same filtered
/// set: the summary and download ignore pagination by design so they reflect
/// every matching row, not just the visible page.
pub async fn list_transactions_endpoint(
    State(state): State<TransactionState>,
    Query(params): Query<ListParams>,
) -> Result<Response, Response> {
    let filter = build_filter(&params);

    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError.into_response()
    })?;

    if params.download {
        let transactions =
            get_filtered_transactions(&filter, &connection).map_err(IntoResponse::into_response)?;
        let csv = transactions_to_csv(&transactions).map_err(IntoResponse::into_response)?;

        return Ok(csv_download_response(csv));
    }

    let config = &state.pagination_config;
    let page = params.page.unwrap_or(config.default_page).max(1);
    let page_size = params
        .page_size
        .unwrap_or(config.default_page_size)
        .clamp(1, config.max_page_size);
    let offset = (page - 1) * page_size;

    let total_count =
        count_filtered_transactions(&filter, &connection).map_err(IntoResponse::into_response)?;
    let data = get_filtered_transactions_page(&filter, page_size, offset, &connection)
        .map_err(IntoResponse::into_response)?;

    let summary = if params.summary {
        let all = get_filtered_transactions(&filter, &connection)
            .map_err(IntoResponse::into_response)?;
        Some(summarize(&all))
    } else {
        None
    };

    Ok(Json(ListResponse {
        data,
        metadata: PageMetadata::new(total_count, page, page_size),
        summary,
    })
    .into_response())
}

fn build_filter(params: &ListParams) -> TransactionFilter {
    let categories: Vec<String> = params
        .category
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|category| !category.is_empty())
        .map(str::to_owned)
        .collect();

    for category_key in &categories {
        if !category::is_known_category(category_key) {
            tracing::warn!("filtering on unknown category \"{category_key}\"");
        }
    }

    TransactionFilter {
        search: params.search.clone(),
        start_date: params.start_date.clone(),
        end_date: params.end_date.clone(),
        categories,
    }
}
