//! Accounts that statements are imported against.

mod core;
mod endpoints;

pub use core::{Account, AccountId, NewAccount, create_account_table, get_all_accounts};
pub use endpoints::{AccountState, create_account_endpoint, get_accounts_endpoint};
