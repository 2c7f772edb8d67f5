//! Statement ingestion: decoding tabular exports, resolving bank-specific
//! columns, and normalizing vendor descriptions into canonical transactions.

mod build;
mod columns;
mod decode;
mod normalize;

pub use build::{INVALID_DATE, NO_DATE, build_transactions};
pub use columns::{CanonicalColumn, ResolvedColumns, resolve_columns};
pub use decode::{CellValue, RawRow, decode_statement};
pub use normalize::{NO_DESCRIPTION, normalize_description};
