//! The single source-of-truth category table.
//!
//! The normalizer, builder, summarizer, and list filters all share this
//! table so category keys cannot drift between call sites.

/// The category assigned to transactions that nothing else has claimed.
pub const GENERAL: &str = "general";

/// The category whose transactions are skipped by every financial aggregate.
pub const EXCLUDED: &str = "excluded";

/// Every category key with its display label.
pub const CATEGORIES: &[(&str, &str)] = &[
    ("bills", "Bills"),
    ("cash", "Cash"),
    ("charity", "Charity"),
    ("take_out", "Eating Out"),
    ("education", "Education"),
    ("entertainment", "Entertainment"),
    (EXCLUDED, "Excluded"),
    (GENERAL, "General"),
    ("groceries", "Groceries"),
    ("holidays", "Holidays"),
    ("housing", "Housing"),
    ("income", "Income"),
    ("investments", "Investments"),
    ("personal", "Personal Care"),
    ("shopping", "Shopping"),
    ("transport", "Transport"),
];

/// Whether `key` is one of the known category keys.
pub fn is_known_category(key: &str) -> bool {
    CATEGORIES.iter().any(|(category, _)| *category == key)
}
