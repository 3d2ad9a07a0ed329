//! RMA Schema Documentation
//!
//! Self-documenting schema for the cost configuration and the formula
//! catalog. Generated from the same data the evaluator runs on, so the
//! docs cannot drift from the formulas.

use serde::{Deserialize, Serialize};

use super::config::CostConfig;
use crate::core::money::format_currency;
use crate::models::ItemRecord;
use crate::rma::{catalog, RmaCategory, RmaFormula, Term};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Worked example for a formula
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormulaExample {
    /// Scenario description
    pub scenario: String,
    /// Input values as (name, value) pairs
    pub inputs: Vec<(String, String)>,
    /// Calculation with values substituted
    pub calculation: String,
    /// Final result, formatted as currency
    pub result: String,
}

/// Documentation for one RMA formula
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormulaDoc {
    /// RMA type display name
    pub name: String,

    pub category: RmaCategory,

    /// Formula in plain text
    pub formula: String,

    /// Every input read, including admin_cost
    pub inputs: Vec<String>,

    /// Whether the formula needs item attributes
    pub references_item: bool,

    pub example: Option<FormulaExample>,
}

/// Documentation for one `CostConfig` field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfigFieldDoc {
    /// Field name (e.g., "qc_cost")
    pub name: String,

    /// Human-readable name (e.g., "QC Cost")
    pub display_name: String,

    pub description: String,

    pub default_value: String,

    /// How the value enters a formula
    pub unit: String,

    /// Names of formulas that read the field
    pub used_by: Vec<String>,
}

/// Complete formula schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RmaSchemaDoc {
    pub version: String,
    pub generated_at: String,
    pub formulas: Vec<FormulaDoc>,
}

/// Complete config schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostConfigSchemaDoc {
    pub version: String,
    pub generated_at: String,
    pub fields: Vec<ConfigFieldDoc>,
}

/// Trait for types that can provide field-level schema documentation
pub trait ConfigSchemaDocumented {
    fn schema_docs() -> Vec<ConfigFieldDoc>;
}

// ============================================================================
// IMPLEMENTATIONS
// ============================================================================

const SCHEMA_VERSION: &str = "1.0";
const GENERATED_AT: &str = "2025-01-01T00:00:00Z"; // Static for determinism

fn field_text(name: &str) -> (&'static str, &'static str, &'static str) {
    match name {
        "outbound_shipping" => (
            "Outbound Shipping",
            "Shipping cost per unit sent out to the customer.",
            "currency per unit",
        ),
        "return_shipping" => (
            "Return Shipping",
            "Shipping cost per unit returned by the customer.",
            "currency per unit",
        ),
        "replacement_shipping" => (
            "Replacement Shipping",
            "Shipping cost per replacement or repaired unit sent back.",
            "currency per unit",
        ),
        "qc_cost" => (
            "QC Cost",
            "Quality-control inspection cost per unit processed.",
            "currency per unit",
        ),
        "admin_cost" => (
            "Admin Cost",
            "Flat administrative fee per RMA event. Not scaled by quantity.",
            "currency per event",
        ),
        "repair_material" => (
            "Repair Material",
            "Material cost per unit repaired.",
            "currency per unit",
        ),
        "repair_labor" => (
            "Repair Labor",
            "Labor cost per unit repaired.",
            "currency per unit",
        ),
        other => unreachable!("config field '{}' has no documentation", other),
    }
}

impl ConfigSchemaDocumented for CostConfig {
    fn schema_docs() -> Vec<ConfigFieldDoc> {
        CostConfig::default()
            .fields()
            .into_iter()
            .map(|(name, default)| {
                let (display_name, description, unit) = field_text(name);
                let used_by = catalog()
                    .iter()
                    .filter(|f| f.inputs().contains(&name))
                    .map(|f| f.name().to_string())
                    .collect();
                ConfigFieldDoc {
                    name: name.to_string(),
                    display_name: display_name.to_string(),
                    description: description.to_string(),
                    default_value: default.to_string(),
                    unit: unit.to_string(),
                    used_by,
                }
            })
            .collect()
    }
}

impl RmaFormula {
    /// Documentation entry with a worked example against a reference item
    /// (price 100, standard cost 40, qty 1, default config)
    pub fn schema_doc(&self) -> FormulaDoc {
        FormulaDoc {
            name: self.name().to_string(),
            category: self.category(),
            formula: self.formula_text(),
            inputs: self.inputs().into_iter().map(String::from).collect(),
            references_item: self.references_item(),
            example: self.worked_example(),
        }
    }

    fn worked_example(&self) -> Option<FormulaExample> {
        let item = ItemRecord::new("REFERENCE", 100.into(), 40.into());
        let config = CostConfig::default();
        let qty = rust_decimal::Decimal::ONE;

        let mut inputs = Vec::new();
        let mut parts = Vec::new();
        for (multiplier, term) in self.terms() {
            let value = term.resolve(&item, &config).ok()?;
            if !matches!(term, Term::Flat(_)) {
                let entry = (term.input_name().to_string(), value.to_string());
                if !inputs.contains(&entry) {
                    inputs.push(entry);
                }
            }
            parts.push(match multiplier {
                1 => value.to_string(),
                n => format!("{} * {}", n, value),
            });
        }
        inputs.push(("qty".to_string(), qty.to_string()));
        inputs.push(("admin_cost".to_string(), config.admin_cost.to_string()));

        let cost = self.compute(&item, qty, &config).ok()?;
        Some(FormulaExample {
            scenario: "Reference item (price 100, standard cost 40), qty 1, default config"
                .to_string(),
            inputs,
            calculation: format!(
                "({}) * {} + {} = {}",
                parts.join(" + "),
                qty,
                config.admin_cost,
                cost
            ),
            result: format_currency(cost),
        })
    }
}

/// Formula catalog documentation as pretty JSON
pub fn get_rma_schema() -> String {
    let schema = RmaSchemaDoc {
        version: SCHEMA_VERSION.to_string(),
        generated_at: GENERATED_AT.to_string(),
        formulas: catalog().iter().map(RmaFormula::schema_doc).collect(),
    };

    serde_json::to_string_pretty(&schema).expect("Schema serialization should not fail")
}

/// Cost config field documentation as pretty JSON
pub fn get_cost_config_schema() -> String {
    let schema = CostConfigSchemaDoc {
        version: SCHEMA_VERSION.to_string(),
        generated_at: GENERATED_AT.to_string(),
        fields: CostConfig::schema_docs(),
    };

    serde_json::to_string_pretty(&schema).expect("Schema serialization should not fail")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_to_json() {
        let json = serde_json::to_string(&RmaCategory::Replacement).unwrap();
        assert_eq!(json, "\"Replacement\"");
    }

    #[test]
    fn test_formula_docs_cover_catalog() {
        let schema: RmaSchemaDoc = serde_json::from_str(&get_rma_schema()).unwrap();
        assert_eq!(schema.formulas.len(), catalog().len());
        assert_eq!(schema.version, "1.0");

        for doc in &schema.formulas {
            assert!(!doc.formula.is_empty(), "{} has empty formula", doc.name);
            assert!(
                doc.inputs.contains(&"admin_cost".to_string()),
                "{} does not list admin_cost",
                doc.name
            );
            let example = doc.example.as_ref().unwrap();
            assert!(!example.calculation.is_empty(), "{} example has empty calculation", doc.name);
            assert!(example.result.starts_with('$'), "{} result not currency", doc.name);
        }
    }

    #[test]
    fn test_worked_example_matches_reference_scenario() {
        let doc = RmaFormula::find("Credit for Return of Functional Product")
            .unwrap()
            .schema_doc();
        let example = doc.example.unwrap();
        assert_eq!(example.calculation, "(100 + 0 + 0 + 5) * 1 + 20 = 125");
        assert_eq!(example.result, "$125.00");
        assert!(doc.references_item);
    }

    #[test]
    fn test_config_docs_match_defaults() {
        let docs = CostConfig::schema_docs();
        assert_eq!(docs.len(), 7);

        let qc = docs.iter().find(|d| d.name == "qc_cost").unwrap();
        assert_eq!(qc.default_value, "5");
        assert_eq!(qc.display_name, "QC Cost");

        let admin = docs.iter().find(|d| d.name == "admin_cost").unwrap();
        assert_eq!(admin.default_value, "20");
        assert_eq!(admin.used_by.len(), catalog().len());

        for doc in &docs {
            assert!(!doc.description.is_empty(), "{} has empty description", doc.name);
            assert!(!doc.display_name.contains('_'), "{} display_name contains underscore", doc.name);
        }
    }

    #[test]
    fn test_every_config_field_has_text() {
        for (name, _) in CostConfig::default().fields() {
            let (display_name, description, unit) = field_text(name);
            assert!(!display_name.is_empty(), "{} has no display name", name);
            assert!(!description.is_empty(), "{} has no description", name);
            assert!(!unit.is_empty(), "{} has no unit", name);
        }
    }

    #[test]
    #[should_panic(expected = "has no documentation")]
    fn test_unknown_config_field_panics() {
        field_text("restocking_fee");
    }

    #[test]
    fn test_return_shipping_used_by_credit_returns_only() {
        let docs = CostConfig::schema_docs();
        let ret = docs.iter().find(|d| d.name == "return_shipping").unwrap();
        assert_eq!(
            ret.used_by,
            vec![
                "Credit for Return of Functional Product".to_string(),
                "Credit Issued – Scrapped at ALPHA".to_string(),
            ]
        );
    }

    #[test]
    fn test_schemas_are_deterministic() {
        assert_eq!(get_rma_schema(), get_rma_schema());
        assert_eq!(get_cost_config_schema(), get_cost_config_schema());
    }
}
