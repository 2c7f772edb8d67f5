//! Route handlers for listing and creating accounts.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    account::core::{NewAccount, create_account, get_all_accounts},
};

/// The state needed for the account routes.
#[derive(Debug, Clone)]
pub struct AccountState {
    /// The database connection for managing accounts.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for AccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that returns every account as a JSON array.
pub async fn get_accounts_endpoint(State(state): State<AccountState>) -> Result<Response, Response> {
    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError.into_response()
    })?;

    let accounts = get_all_accounts(&connection).map_err(IntoResponse::into_response)?;

    Ok(Json(accounts).into_response())
}

/// A route handler that creates an account and returns it.
pub async fn create_account_endpoint(
    State(state): State<AccountState>,
    Json(new_account): Json<NewAccount>,
) -> Result<Response, Response> {
    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError.into_response()
    })?;

    let account = create_account(&new_account, &connection).map_err(IntoResponse::into_response)?;

    Ok((StatusCode::CREATED, Json(account)).into_response())
}
