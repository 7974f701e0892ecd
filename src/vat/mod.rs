//! German VAT rate replacement
//!
//! Bulk-rewrites German tax rates across all tax categories of a project:
//! the standard rate 19% becomes 16% and the reduced rate 7% becomes 5%.
//! Categories are scanned with cursor pagination over the GraphQL
//! transport; updates go through the REST write-back surface.
//!
//! Rates that do not match either known amount, and amounts that appear on
//! more than one German rate, are special cases that must be resolved by
//! hand; they are reported and skipped rather than guessed at.

mod replace;
mod types;

pub use replace::{fetch_tax_categories, run_vat_replacement, tax_category_query, VatReport};
pub use types::{plan_replacements, CategoryRef, RateChange, Replacement, ReplacementPlan, TaxCategory, TaxRate};

/// Standard German VAT: 19% down to 16%
pub const STANDARD: RateChange = RateChange {
    label: "standard",
    old: 0.19,
    new: 0.16,
};

/// Reduced German VAT: 7% down to 5%
pub const REDUCED: RateChange = RateChange {
    label: "reduced",
    old: 0.07,
    new: 0.05,
};

#[cfg(test)]
mod tests;
