//! Maps each bank's idiosyncratic column headers onto the canonical fields a
//! transaction needs, using case-insensitive alias lookup.
//!
//! Resolution is driven entirely by the alias table: no statement layout is
//! special-cased, so a new bank export works as long as its headers match an
//! alias.

use crate::statement::decode::{CellValue, RawRow};

/// The semantic role a source column fills, regardless of its header text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalColumn {
    /// When the transaction happened.
    Date,
    /// How much money moved.
    Amount,
    /// What the transaction was for.
    Description,
}

impl CanonicalColumn {
    /// The recognized header aliases for this column, lowercased.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            CanonicalColumn::Date => &["date", "transaction date"],
            CanonicalColumn::Amount => &["amount", "cad$"],
            CanonicalColumn::Description => &["description", "description 1"],
        }
    }
}

/// The cells of one row that resolved to a canonical column, if any did.
///
/// A `None` field means no header in the row matched any alias; downstream
/// stages apply the documented fallback rather than dropping the row.
#[derive(Debug, PartialEq)]
pub struct ResolvedColumns<'a> {
    /// The raw date cell.
    pub date: Option<&'a CellValue>,
    /// The raw amount cell.
    pub amount: Option<&'a CellValue>,
    /// The raw description cell.
    pub description: Option<&'a CellValue>,
}

/// Resolve a row's columns against the alias table.
///
/// For each canonical column, the row's own columns are scanned in insertion
/// order and the first one whose lowercased header matches any alias wins, so
/// a row with ambiguous duplicate headers resolves by its own column order.
pub fn resolve_columns(row: &RawRow) -> ResolvedColumns<'_> {
    ResolvedColumns {
        date: row.first_match(CanonicalColumn::Date.aliases()),
        amount: row.first_match(CanonicalColumn::Amount.aliases()),
        description: row.first_match(CanonicalColumn::Description.aliases()),
    }
}
