use super::*;
use crate::query::DEFAULT_PAGE_SIZE;
use pretty_assertions::assert_eq;
use serde_json::json;

fn category(id: &str, version: i64, name: &str, rates: Vec<TaxRate>) -> TaxCategory {
    serde_json::from_value(json!({
        "id": id,
        "version": version,
        "name": name,
        "rates": rates,
    }))
    .unwrap()
}

fn rate(id: Option<&str>, name: &str, amount: f64, country: &str) -> TaxRate {
    TaxRate {
        id: id.map(String::from),
        name: name.to_string(),
        amount,
        country: country.to_string(),
        state: None,
        included_in_price: true,
    }
}

#[test]
fn test_query_targets_graphql_tax_categories() {
    let definition = tax_category_query();
    assert_eq!(definition.endpoint, "taxCategories");
    assert_eq!(definition.limit, 500);
    assert_ne!(definition.limit, DEFAULT_PAGE_SIZE);
    let document = definition.document.as_deref().unwrap();
    assert!(document.contains("taxCategories"));
    assert!(document.contains("includedInPrice"));
    assert!(document.contains("$where"));
}

#[test]
fn test_plans_standard_and_reduced_replacements() {
    let categories = vec![
        category(
            "cat-1",
            7,
            "Standard",
            vec![rate(Some("r-1"), "19% MwSt", 0.19, "DE")],
        ),
        category(
            "cat-2",
            3,
            "Reduced",
            vec![rate(Some("r-2"), "7% MwSt", 0.07, "DE")],
        ),
    ];

    let plan = plan_replacements(&categories);

    assert!(plan.warnings.is_empty());
    assert_eq!(plan.replacements.len(), 2);

    let standard = &plan.replacements[0];
    assert_eq!(standard.category.id, "cat-1");
    assert_eq!(standard.category.version, 7);
    assert_eq!(standard.rate_id, "r-1");
    assert_eq!(
        standard.action,
        json!({
            "action": "replaceTaxRate",
            "taxRateId": "r-1",
            "taxRate": {
                "name": "19% MwSt",
                "amount": 0.16,
                "includedInPrice": true,
                "country": "DE",
            },
        })
    );

    let reduced = &plan.replacements[1];
    assert_eq!(reduced.rate_id, "r-2");
    assert_eq!(reduced.action["taxRate"]["amount"], json!(0.05));
}

#[test]
fn test_non_german_rates_are_ignored() {
    let categories = vec![category(
        "cat-1",
        1,
        "Standard",
        vec![
            rate(Some("r-at"), "20% USt", 0.20, "AT"),
            rate(Some("r-fr"), "TVA", 0.19, "FR"),
        ],
    )];

    let plan = plan_replacements(&categories);

    assert!(plan.replacements.is_empty());
    assert_eq!(plan.warnings.len(), 1);
    assert!(plan.warnings[0].contains("No German tax rate"));
}

#[test]
fn test_unknown_amount_is_warned_and_skipped() {
    let categories = vec![category(
        "cat-1",
        1,
        "Custom",
        vec![
            rate(Some("r-1"), "10% special", 0.10, "DE"),
            rate(Some("r-2"), "19% MwSt", 0.19, "DE"),
        ],
    )];

    let plan = plan_replacements(&categories);

    assert_eq!(plan.replacements.len(), 1);
    assert_eq!(plan.replacements[0].rate_id, "r-2");
    assert_eq!(plan.warnings.len(), 1);
    assert!(plan.warnings[0].contains("10% special"));
    assert!(plan.warnings[0].contains("manually"));
}

#[test]
fn test_duplicate_amount_is_ambiguous() {
    let categories = vec![
        category(
            "cat-1",
            1,
            "Standard A",
            vec![rate(Some("r-1"), "19% MwSt", 0.19, "DE")],
        ),
        category(
            "cat-2",
            1,
            "Standard B",
            vec![rate(Some("r-2"), "19% MwSt", 0.19, "DE")],
        ),
    ];

    let plan = plan_replacements(&categories);

    assert!(plan.replacements.is_empty());
    assert_eq!(plan.warnings.len(), 1);
    assert!(plan.warnings[0].contains("2 German rates"));
    assert!(plan.warnings[0].contains("standard"));
}

#[test]
fn test_rate_without_id_is_warned_and_skipped() {
    let categories = vec![category(
        "cat-1",
        1,
        "Standard",
        vec![rate(None, "19% MwSt", 0.19, "DE")],
    )];

    let plan = plan_replacements(&categories);

    assert!(plan.replacements.is_empty());
    assert_eq!(plan.warnings.len(), 1);
    assert!(plan.warnings[0].contains("no id"));
}

#[test]
fn test_update_body_shape() {
    let categories = vec![category(
        "cat-1",
        12,
        "Standard",
        vec![rate(Some("r-1"), "19% MwSt", 0.19, "DE")],
    )];

    let plan = plan_replacements(&categories);
    let body = plan.replacements[0].update_body();

    assert_eq!(body["version"], json!(12));
    assert_eq!(body["actions"].as_array().unwrap().len(), 1);
    assert_eq!(body["actions"][0]["action"], json!("replaceTaxRate"));
}

#[test]
fn test_category_without_rates_deserializes() {
    let parsed: TaxCategory = serde_json::from_value(json!({
        "id": "cat-1",
        "version": 1,
        "name": "Empty",
        "key": "empty",
        "description": "no rates yet",
    }))
    .unwrap();

    assert!(parsed.rates.is_empty());
    assert_eq!(parsed.key.as_deref(), Some("empty"));
}
