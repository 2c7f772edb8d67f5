//! Application router configuration.

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    AppState,
    account::{create_account_endpoint, get_accounts_endpoint},
    endpoints,
    transaction::{
        list_transactions_endpoint, save_transactions_endpoint, upload_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::ACCOUNTS_API,
            get(get_accounts_endpoint).post(create_account_endpoint),
        )
        .route(
            endpoints::TRANSACTIONS_API,
            get(list_transactions_endpoint).post(save_transactions_endpoint),
        )
        .route(
            endpoints::UPLOAD_TRANSACTIONS_API,
            post(upload_transactions_endpoint),
        )
        .with_state(state)
}
