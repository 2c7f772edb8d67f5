//! Transaction management for the finance ledger.
//!
//! This module contains everything related to transactions:
//! - The canonical `Transaction` model and its database functions
//! - Filtered list queries and the financial summary aggregate
//! - Route handlers for uploading, saving, listing, and downloading

mod core;
mod csv_export;
mod list_endpoint;
mod query;
mod save_endpoint;
mod summary;
mod upload_endpoint;

pub use core::{Transaction, create_transaction_table};
pub use list_endpoint::{TransactionState, list_transactions_endpoint};
pub use save_endpoint::save_transactions_endpoint;
pub use summary::{Summary, summarize};
pub use upload_endpoint::{UploadState, upload_transactions_endpoint};

#[cfg(test)]
pub use core::{count_transactions, create_transaction, get_transaction};
