//! Assembles canonical transactions from decoded statement rows.
//!
//! A row is never dropped: unresolvable cells become the documented sentinel
//! values ("No Date", "Invalid Date", NaN amounts) so malformed rows surface
//! visibly in the review step instead of disappearing.

use time::{
    Date, OffsetDateTime, format_description::BorrowedFormatItem,
    format_description::well_known::Rfc3339, macros::format_description,
};
use uuid::Uuid;

use crate::{
    account::AccountId,
    category,
    statement::{
        columns::resolve_columns,
        decode::{CellValue, RawRow, excel_serial_to_date},
        normalize::normalize_description,
    },
    transaction::Transaction,
};

/// The date used when a row has no date cell at all.
pub const NO_DATE: &str = "No Date";

/// The date used when a row's date cell could not be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

/// Build canonical transactions from decoded statement rows.
///
/// Every row produces a transaction with a fresh identity, the default
/// category, and `is_reoccuring` false; the optional `account_id` is attached
/// to each one. Amounts that are missing or non-numeric come out as NaN,
/// which callers must treat as an error condition before persistence.
pub fn build_transactions(rows: &[RawRow], account_id: Option<AccountId>) -> Vec<Transaction> {
    rows.iter()
        .map(|row| {
            let columns = resolve_columns(row);

            Transaction {
                id: Uuid::new_v4().to_string(),
                account_id,
                date: date_to_instant(columns.date),
                name: None,
                description: normalize_description(columns.description),
                amount: parse_amount(columns.amount),
                category: category::GENERAL.to_owned(),
                is_reoccuring: false,
            }
        })
        .collect()
}

fn parse_amount(value: Option<&CellValue>) -> f64 {
    match value {
        Some(CellValue::Number(amount)) => *amount,
        Some(CellValue::Text(text)) => text.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// Serialize a raw date cell as an RFC-3339 instant at UTC midnight, or one
/// of the sentinels when the cell is absent ([NO_DATE]) or unparseable
/// ([INVALID_DATE]).
fn date_to_instant(value: Option<&CellValue>) -> String {
    let Some(value) = value else {
        return NO_DATE.to_owned();
    };

    let date = match value {
        CellValue::Date(date) => Some(*date),
        CellValue::Number(serial) => excel_serial_to_date(*serial),
        CellValue::Text(text) => parse_date_text(text.trim()),
    };

    match date {
        Some(date) => match date.midnight().assume_utc().format(&Rfc3339) {
            Ok(instant) => instant,
            Err(_) => INVALID_DATE.to_owned(),
        },
        None => INVALID_DATE.to_owned(),
    }
}

const ISO_DATE: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");
const SLASH_DATE: &[BorrowedFormatItem] = format_description!("[year]/[month]/[day]");
const US_DATE: &[BorrowedFormatItem] = format_description!("[month]/[day]/[year]");
const DMY_DATE: &[BorrowedFormatItem] = format_description!("[day]-[month]-[year]");

fn parse_date_text(text: &str) -> Option<Date> {
    if let Ok(instant) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(instant.date());
    }

    let formats = [ISO_DATE, SLASH_DATE, US_DATE, DMY_DATE];
    formats
        .into_iter()
        .find_map(|format| Date::parse(text, format).ok())
}
