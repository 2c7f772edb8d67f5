//! The API endpoint URIs.

/// The route to list accounts or create one.
pub const ACCOUNTS_API: &str = "/api/accounts";
/// The route to list or save transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to upload a statement file for normalization.
pub const UPLOAD_TRANSACTIONS_API: &str = "/api/transactions/upload";
