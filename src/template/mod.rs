//! Transaction templates: the store of per-description labels and the
//! matcher that overlays them onto freshly built transactions.

mod core;
mod matcher;

pub use core::{
    TemplateLookup, TransactionTemplate, create_template_table, find_template, upsert_templates,
};
pub use matcher::apply_templates;
