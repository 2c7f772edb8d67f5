//! Moneta is a personal finance ledger served as a JSON REST API.
//!
//! Bank and credit card statement exports (CSV, XLS, or XLSX) are uploaded,
//! normalized into canonical transactions, matched against previously stored
//! vendor templates so repeat vendors keep their names and categories, then
//! persisted and served back as paginated, filterable and summarized views.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod account;
mod app_state;
mod category;
mod db;
mod endpoints;
mod pagination;
mod routing;
mod statement;
mod template;
mod transaction;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use pagination::PaginationConfig;
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The upload form did not contain a statement file.
    #[error("No file uploaded")]
    MissingFile,

    /// The uploaded file is not one of the supported statement formats.
    #[error("unsupported statement format: {0}")]
    UnsupportedFormat(String),

    /// The file claimed a supported format but its contents could not be read
    /// as a table.
    #[error("could not read the statement: {0}")]
    InvalidSheet(String),

    /// The multipart form could not be parsed.
    #[error("could not parse multipart form: {0}")]
    MultipartError(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while rendering transactions as CSV.
    #[error("could not render CSV: {0}")]
    CsvError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status_code, message) = match &self {
            Error::MissingFile => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::UnsupportedFormat(_) | Error::InvalidSheet(_) | Error::MultipartError(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            Error::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            Error::DatabaseLockError => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            // Any errors that are not handled above are not intended to be shown to the client.
            Error::SqlError(_) | Error::CsvError(_) => {
                tracing::error!("An unexpected error occurred: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                )
            }
        };

        (status_code, Json(json!({ "error": message }))).into_response()
    }
}
