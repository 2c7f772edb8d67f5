//! Route handler for uploading a statement file.
//!
//! The upload runs the whole ingestion pipeline (decode, resolve, normalize,
//! build, template-match) and returns the resulting transactions for review.
//! Nothing is persisted here; the client saves the reviewed batch separately.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Multipart, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Serialize;

use crate::{
    AppState, Error,
    account::AccountId,
    statement::{build_transactions, decode_statement},
    template::apply_templates,
    transaction::Transaction,
};

/// The state needed for uploading statements.
#[derive(Debug, Clone)]
pub struct UploadState {
    /// The database connection for the template lookups.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UploadState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The body returned by upload and save: the affected transactions.
#[derive(Debug, Serialize)]
pub struct TransactionBatch {
    /// The transactions in the batch.
    pub data: Vec<Transaction>,
}

/// A route handler for uploading a statement file.
///
/// Expects a multipart form with a `file` field holding the statement and an
/// optional `account` field holding an account id. Returns the built and
/// template-matched transactions without persisting them.
pub async fn upload_transactions_endpoint(
    State(state): State<UploadState>,
    mut multipart: Multipart,
) -> Result<Response, Response> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut account: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|error| {
        Error::MultipartError(error.to_string()).into_response()
    })? {
        match field.name() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("statement").to_owned();
                let bytes = field.bytes().await.map_err(|error| {
                    tracing::error!("Could not read data from multipart form field: {error}");
                    Error::MultipartError(
                        "Could not read data from multipart form field.".to_owned(),
                    )
                    .into_response()
                })?;

                tracing::debug!(
                    "Received file '{}' that is {} bytes",
                    file_name,
                    bytes.len()
                );

                file = Some((file_name, bytes.to_vec()));
            }
            Some("account") => {
                account = Some(field.text().await.map_err(|error| {
                    Error::MultipartError(error.to_string()).into_response()
                })?);
            }
            _ => {}
        }
    }

    let Some((file_name, bytes)) = file else {
        return Err(Error::MissingFile.into_response());
    };

    let rows =
        decode_statement(&bytes, &file_name).map_err(IntoResponse::into_response)?;

    // A non-numeric account field is treated the same as no account.
    let account_id = account
        .as_deref()
        .and_then(|value| value.trim().parse::<AccountId>().ok());

    let transactions = build_transactions(&rows, account_id);

    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError.into_response()
    })?;

    let transactions = apply_templates(transactions, &connection);

    tracing::info!(
        "Upload of '{}' produced {} transactions",
        file_name,
        transactions.len()
    );

    Ok(Json(TransactionBatch { data: transactions }).into_response())
}
