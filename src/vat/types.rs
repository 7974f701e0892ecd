//! Tax category types and replacement planning

use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// One VAT change: rates at `old` are rewritten to `new`
#[derive(Debug, Clone, Copy)]
pub struct RateChange {
    /// Human label used in reports ("standard", "reduced")
    pub label: &'static str,
    /// Amount to look for
    pub old: f64,
    /// Amount to write
    pub new: f64,
}

/// A tax category as returned by the GraphQL transport
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxCategory {
    pub id: String,
    pub version: i64,
    pub name: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub rates: Vec<TaxRate>,
}

/// One tax rate inside a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRate {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub amount: f64,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default)]
    pub included_in_price: bool,
}

/// The category a rate belongs to, as needed for the update call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRef {
    pub id: String,
    pub version: i64,
    pub name: String,
}

/// One planned `replaceTaxRate` update
#[derive(Debug, Clone)]
pub struct Replacement {
    /// Category carrying the rate
    pub category: CategoryRef,
    /// The rate being replaced
    pub rate_id: String,
    /// The update action to send
    pub action: JsonValue,
}

impl Replacement {
    /// The full update body (version + actions) for preview output
    pub fn update_body(&self) -> JsonValue {
        json!({
            "version": self.category.version,
            "actions": [self.action],
        })
    }
}

/// Outcome of planning: the updates to issue plus everything that needs a
/// human decision instead
#[derive(Debug, Clone, Default)]
pub struct ReplacementPlan {
    pub replacements: Vec<Replacement>,
    pub warnings: Vec<String>,
}

fn amounts_match(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Plan the German VAT replacements across all categories.
///
/// Collects the German rates, flags the ones with unexpected amounts and
/// any amount that occurs on more than one rate, and builds one
/// `replaceTaxRate` action per remaining rate.
pub fn plan_replacements(categories: &[TaxCategory]) -> ReplacementPlan {
    let mut plan = ReplacementPlan::default();

    let german_rates: Vec<(CategoryRef, &TaxRate)> = categories
        .iter()
        .flat_map(|category| {
            let category_ref = CategoryRef {
                id: category.id.clone(),
                version: category.version,
                name: category.name.clone(),
            };
            category
                .rates
                .iter()
                .filter(|rate| rate.country == "DE")
                .map(move |rate| (category_ref.clone(), rate))
        })
        .collect();

    if german_rates.is_empty() {
        plan.warnings.push(
            "No German tax rate found; there is nothing to be done for VAT in this project"
                .to_string(),
        );
        return plan;
    }

    for (category, rate) in &german_rates {
        let known = amounts_match(rate.amount, super::STANDARD.old)
            || amounts_match(rate.amount, super::REDUCED.old);
        if !known {
            plan.warnings.push(format!(
                "Rate '{}' in category '{}' has amount {}; not a known VAT amount, update it manually",
                rate.name, category.name, rate.amount
            ));
        }
    }

    for change in [super::STANDARD, super::REDUCED] {
        let matching: Vec<&(CategoryRef, &TaxRate)> = german_rates
            .iter()
            .filter(|(_, rate)| amounts_match(rate.amount, change.old))
            .collect();

        if matching.len() > 1 {
            plan.warnings.push(format!(
                "{} German rates have the {} VAT amount {}; ambiguous, update them manually",
                matching.len(),
                change.label,
                change.old
            ));
            continue;
        }

        for (category, rate) in matching {
            let Some(rate_id) = rate.id.clone() else {
                plan.warnings.push(format!(
                    "Rate '{}' in category '{}' has no id; cannot build an update action",
                    rate.name, category.name
                ));
                continue;
            };

            let action = json!({
                "action": "replaceTaxRate",
                "taxRateId": rate_id,
                "taxRate": {
                    "name": rate.name,
                    "amount": change.new,
                    "includedInPrice": rate.included_in_price,
                    "country": rate.country,
                },
            });

            plan.replacements.push(Replacement {
                category: category.clone(),
                rate_id,
                action,
            });
        }
    }

    plan
}
