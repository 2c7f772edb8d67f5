//! Route handler for persisting a reviewed batch of transactions.
//!
//! Saving is also when template write-back happens: the first occurrence of
//! each unique description in the batch becomes (or overwrites) the template
//! for that description, so the next upload of the same vendor inherits the
//! labels chosen here.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    template::upsert_templates,
    transaction::{
        Transaction, core::create_transaction, list_endpoint::TransactionState,
        upload_endpoint::TransactionBatch,
    },
};

/// A route handler for saving a batch of transactions.
///
/// Each transaction's temporary client identity is discarded and a fresh one
/// generated on insert. The inserts and the template write-back run inside
/// one SQL transaction, so a failure leaves nothing half-committed.
pub async fn save_transactions_endpoint(
    State(state): State<TransactionState>,
    Json(transactions): Json<Vec<Transaction>>,
) -> Result<Response, Response> {
    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError.into_response()
    })?;

    let tx = connection.unchecked_transaction().map_err(|error| {
        tracing::error!("could not start transaction: {error}");
        Error::from(error).into_response()
    })?;

    let mut saved = Vec::with_capacity(transactions.len());

    for transaction in &transactions {
        let transaction = create_transaction(transaction, &tx)
            .inspect_err(|error| tracing::error!("Failed to save transaction: {error}"))
            .map_err(IntoResponse::into_response)?;
        saved.push(transaction);
    }

    let templates_written = upsert_templates(&transactions, &tx)
        .inspect_err(|error| tracing::error!("Failed to write templates: {error}"))
        .map_err(IntoResponse::into_response)?;

    tx.commit().map_err(|error| {
        tracing::error!("could not commit transaction: {error}");
        Error::from(error).into_response()
    })?;

    tracing::info!(
        "Saved {} transactions and {} templates",
        saved.len(),
        templates_written
    );

    Ok((StatusCode::CREATED, Json(TransactionBatch { data: saved })).into_response())
}
