//! RMA Formula Catalog
//!
//! Every RMA type is a linear cost function:
//!
//! ```text
//! cost = (sum of per-unit terms) * qty + admin_cost
//! ```
//!
//! Per-unit terms draw on the item (regular price, standard cost) and the
//! `CostConfig`. The admin fee is a flat per-event add-on and is never
//! scaled by quantity.
//!
//! Each entry carries an explicit category tag. Categories are never
//! inferred from the display name.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::costs::CostConfig;
use crate::error::RmaError;
use crate::models::ItemRecord;

/// Coarse grouping of RMA types, used for filtering and color-coding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RmaCategory {
    /// Customer is credited
    Credit,
    /// Customer receives a replacement unit
    Replacement,
    /// Returned unit is repaired
    Repair,
    /// Logistics-only and claim dispositions
    Other,
}

impl RmaCategory {
    /// All categories in display order
    pub const ALL: [RmaCategory; 4] = [
        RmaCategory::Credit,
        RmaCategory::Replacement,
        RmaCategory::Repair,
        RmaCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RmaCategory::Credit => "Credit",
            RmaCategory::Replacement => "Replacement",
            RmaCategory::Repair => "Repair",
            RmaCategory::Other => "Other",
        }
    }
}

impl fmt::Display for RmaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RmaCategory {
    type Err = RmaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RmaCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                RmaError::invalid_input(
                    "category",
                    format!("unknown category '{}' (expected credit, replacement, repair or other)", s),
                )
            })
    }
}

/// One per-unit input of a formula
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    /// Item regular price
    Price,
    /// Item standard cost
    StandardCost,
    OutboundShipping,
    ReturnShipping,
    ReplacementShipping,
    /// QC inspection cost
    Qc,
    RepairMaterial,
    RepairLabor,
    /// Fixed per-unit amount (label or box materials)
    Flat(Decimal),
}

impl Term {
    /// Input name as it appears in formula text and schema docs
    pub fn input_name(&self) -> &'static str {
        match self {
            Term::Price => "regular_price",
            Term::StandardCost => "standard_cost",
            Term::OutboundShipping => "outbound_shipping",
            Term::ReturnShipping => "return_shipping",
            Term::ReplacementShipping => "replacement_shipping",
            Term::Qc => "qc_cost",
            Term::RepairMaterial => "repair_material",
            Term::RepairLabor => "repair_labor",
            Term::Flat(_) => "flat",
        }
    }

    /// True for terms read from the item rather than the config
    pub fn is_item_attribute(&self) -> bool {
        matches!(self, Term::Price | Term::StandardCost)
    }

    /// Resolve the term's per-unit value
    ///
    /// # Errors
    /// `RmaError::InvalidInput` when an item attribute the term needs is
    /// missing, malformed or negative.
    pub fn resolve(&self, item: &ItemRecord, config: &CostConfig) -> Result<Decimal, RmaError> {
        match self {
            Term::Price => item.regular_price().require("regular_price"),
            Term::StandardCost => item.standard_cost().require("standard_cost"),
            Term::OutboundShipping => Ok(config.outbound_shipping),
            Term::ReturnShipping => Ok(config.return_shipping),
            Term::ReplacementShipping => Ok(config.replacement_shipping),
            Term::Qc => Ok(config.qc_cost),
            Term::RepairMaterial => Ok(config.repair_material),
            Term::RepairLabor => Ok(config.repair_labor),
            Term::Flat(amount) => Ok(*amount),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Flat(amount) => write!(f, "{}", amount),
            other => f.write_str(other.input_name()),
        }
    }
}

/// A named RMA cost formula
///
/// Terms are `(multiplier, term)` pairs summed per unit before scaling by
/// quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RmaFormula {
    name: &'static str,
    category: RmaCategory,
    terms: &'static [(u32, Term)],
}

impl RmaFormula {
    pub const fn new(
        name: &'static str,
        category: RmaCategory,
        terms: &'static [(u32, Term)],
    ) -> Self {
        Self {
            name,
            category,
            terms,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn category(&self) -> RmaCategory {
        self.category
    }

    pub fn terms(&self) -> &'static [(u32, Term)] {
        self.terms
    }

    /// Look up a catalog entry by exact name
    pub fn find(name: &str) -> Option<&'static RmaFormula> {
        catalog().iter().find(|f| f.name == name)
    }

    /// Sum of per-unit terms, before quantity and admin fee
    ///
    /// # Errors
    /// `RmaError::InvalidInput` for an unusable item attribute or on
    /// arithmetic overflow.
    pub fn per_unit_cost(&self, item: &ItemRecord, config: &CostConfig) -> Result<Decimal, RmaError> {
        self.terms
            .iter()
            .try_fold(Decimal::ZERO, |acc, (multiplier, term)| {
                let value = term.resolve(item, config)?;
                Decimal::from(*multiplier)
                    .checked_mul(value)
                    .and_then(|scaled| acc.checked_add(scaled))
                    .ok_or_else(|| overflow(self.name))
            })
    }

    /// Total cost for `qty` units
    ///
    /// `(per-unit terms) * qty + admin_cost`. Quantity is used as given;
    /// fractional quantities are never truncated.
    ///
    /// # Errors
    /// `RmaError::InvalidInput` if `qty <= 0`, if an item attribute the
    /// formula references is absent or non-numeric, or on overflow.
    ///
    /// # Example
    /// ```
    /// use rma_calculator_core_rs::{CostConfig, ItemRecord, RmaFormula};
    /// use rust_decimal::Decimal;
    ///
    /// let item = ItemRecord::new("SKU-1", Decimal::from(100), Decimal::from(40));
    /// let formula = RmaFormula::find("Credit Only – Scrapped at Customer").unwrap();
    /// let cost = formula.compute(&item, Decimal::ONE, &CostConfig::default()).unwrap();
    /// assert_eq!(cost, Decimal::from(120));
    /// ```
    pub fn compute(
        &self,
        item: &ItemRecord,
        qty: Decimal,
        config: &CostConfig,
    ) -> Result<Decimal, RmaError> {
        check_positive_qty(qty)?;
        let per_unit = self.per_unit_cost(item, config)?;
        per_unit
            .checked_mul(qty)
            .and_then(|scaled| scaled.checked_add(config.admin_cost))
            .ok_or_else(|| overflow(self.name))
    }

    /// Names of every input the formula reads, in term order, including
    /// `admin_cost`. Flat amounts are not listed.
    pub fn inputs(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        for (_, term) in self.terms {
            if matches!(term, Term::Flat(_)) {
                continue;
            }
            let name = term.input_name();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names.push("admin_cost");
        names
    }

    /// True if evaluating the formula needs an item attribute
    pub fn references_item(&self) -> bool {
        self.terms.iter().any(|(_, term)| term.is_item_attribute())
    }

    /// Human-readable formula, e.g.
    /// `(regular_price + qc_cost) * qty + admin_cost`
    pub fn formula_text(&self) -> String {
        let parts: Vec<String> = self
            .terms
            .iter()
            .map(|(multiplier, term)| match multiplier {
                1 => term.to_string(),
                n => format!("{} * {}", n, term),
            })
            .collect();
        format!("({}) * qty + admin_cost", parts.join(" + "))
    }
}

/// Reject `qty <= 0` on field `qty`
pub(crate) fn check_positive_qty(qty: Decimal) -> Result<(), RmaError> {
    if qty <= Decimal::ZERO {
        return Err(RmaError::invalid_input(
            "qty",
            format!("must be greater than zero, got {}", qty),
        ));
    }
    Ok(())
}

fn overflow(name: &str) -> RmaError {
    RmaError::invalid_input("cost", format!("arithmetic overflow evaluating '{}'", name))
}

/// The canonical formula catalog, in declaration order
static RMA_CATALOG: [RmaFormula; 10] = [
    RmaFormula::new(
        "Credit for Return of Functional Product",
        RmaCategory::Credit,
        &[
            (1, Term::Price),
            (1, Term::ReturnShipping),
            (1, Term::OutboundShipping),
            (1, Term::Qc),
        ],
    ),
    RmaFormula::new(
        "Credit Only – Scrapped at Customer",
        RmaCategory::Credit,
        &[(1, Term::Price)],
    ),
    RmaFormula::new(
        "Credit Issued – Scrapped at ALPHA",
        RmaCategory::Credit,
        &[
            (1, Term::Price),
            (1, Term::ReturnShipping),
            (1, Term::OutboundShipping),
            (1, Term::Qc),
            (1, Term::StandardCost),
        ],
    ),
    // The bad unit is scrapped and a new one sent: standard cost counted twice
    RmaFormula::new(
        "Replacement – Non-Functional Return",
        RmaCategory::Replacement,
        &[
            (2, Term::StandardCost),
            (1, Term::OutboundShipping),
            (1, Term::ReplacementShipping),
            (2, Term::Qc),
        ],
    ),
    RmaFormula::new(
        "Replacement – Good & Resellable Return",
        RmaCategory::Replacement,
        &[
            (1, Term::OutboundShipping),
            (1, Term::ReplacementShipping),
            (2, Term::Qc),
        ],
    ),
    RmaFormula::new(
        "Repair (IDF/RMA)",
        RmaCategory::Repair,
        &[
            (1, Term::RepairMaterial),
            (1, Term::RepairLabor),
            (1, Term::Qc),
            (1, Term::ReplacementShipping),
        ],
    ),
    RmaFormula::new(
        "Shipping Labels Only",
        RmaCategory::Other,
        &[
            (1, Term::OutboundShipping),
            (1, Term::Qc),
            (1, Term::Flat(Decimal::ONE)),
        ],
    ),
    RmaFormula::new(
        "Shipping Box and Labels Only",
        RmaCategory::Other,
        &[
            (1, Term::OutboundShipping),
            (1, Term::Qc),
            (1, Term::Flat(Decimal::TWO)),
        ],
    ),
    RmaFormula::new(
        "Non-Warranty Claim",
        RmaCategory::Other,
        &[
            (1, Term::RepairMaterial),
            (1, Term::RepairLabor),
            (1, Term::OutboundShipping),
            (1, Term::ReplacementShipping),
            (1, Term::Qc),
        ],
    ),
    RmaFormula::new(
        "Shipment Not Received",
        RmaCategory::Other,
        &[
            (1, Term::StandardCost),
            (1, Term::OutboundShipping),
            (1, Term::Qc),
        ],
    ),
];

/// The fixed RMA formula catalog, in declaration order
pub fn catalog() -> &'static [RmaFormula] {
    &RMA_CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemAttribute;
    use rust_decimal_macros::dec;

    fn reference_item() -> ItemRecord {
        ItemRecord::new("REF", dec!(100), dec!(40))
    }

    #[test]
    fn test_catalog_has_ten_unique_names() {
        let names: Vec<&str> = catalog().iter().map(|f| f.name()).collect();
        assert_eq!(names.len(), 10);
        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), 10, "Duplicate formula name in catalog");
    }

    #[test]
    fn test_category_counts() {
        let count = |cat: RmaCategory| catalog().iter().filter(|f| f.category() == cat).count();
        assert_eq!(count(RmaCategory::Credit), 3);
        assert_eq!(count(RmaCategory::Replacement), 2);
        assert_eq!(count(RmaCategory::Repair), 1);
        assert_eq!(count(RmaCategory::Other), 4);
    }

    #[test]
    fn test_category_tag_independent_of_name() {
        // Reads repair terms but is tagged Other
        let claim = RmaFormula::find("Non-Warranty Claim").unwrap();
        assert_eq!(claim.category(), RmaCategory::Other);
        let scrapped = RmaFormula::find("Credit Issued – Scrapped at ALPHA").unwrap();
        assert_eq!(scrapped.category(), RmaCategory::Credit);
    }

    #[test]
    fn test_compute_scenario_defaults() {
        let item = reference_item();
        let config = CostConfig::default();
        let cost = |name: &str| {
            RmaFormula::find(name)
                .unwrap()
                .compute(&item, dec!(1), &config)
                .unwrap()
        };
        assert_eq!(cost("Credit for Return of Functional Product"), dec!(125.00));
        assert_eq!(cost("Credit Only – Scrapped at Customer"), dec!(120.00));
        assert_eq!(cost("Credit Issued – Scrapped at ALPHA"), dec!(165));
        assert_eq!(cost("Replacement – Non-Functional Return"), dec!(110));
        assert_eq!(cost("Replacement – Good & Resellable Return"), dec!(30));
        assert_eq!(cost("Repair (IDF/RMA)"), dec!(65.00));
        assert_eq!(cost("Shipping Labels Only"), dec!(26));
        assert_eq!(cost("Shipping Box and Labels Only"), dec!(27));
        assert_eq!(cost("Non-Warranty Claim"), dec!(65));
        assert_eq!(cost("Shipment Not Received"), dec!(65.00));
    }

    #[test]
    fn test_compute_fractional_qty_not_truncated() {
        let formula = RmaFormula::find("Credit Only – Scrapped at Customer").unwrap();
        let cost = formula
            .compute(&reference_item(), dec!(0.5), &CostConfig::default())
            .unwrap();
        assert_eq!(cost, dec!(70));
    }

    #[test]
    fn test_compute_rejects_non_positive_qty() {
        let formula = &catalog()[0];
        for qty in [dec!(0), dec!(-1)] {
            let err = formula
                .compute(&reference_item(), qty, &CostConfig::default())
                .unwrap_err();
            assert!(matches!(err, RmaError::InvalidInput { ref field, .. } if field == "qty"));
        }
    }

    #[test]
    fn test_positive_qty_error_shared_across_entry_points() {
        let expected = RmaError::invalid_input("qty", "must be greater than zero, got 0");
        assert_eq!(check_positive_qty(dec!(0)).unwrap_err(), expected);
        assert!(check_positive_qty(dec!(0.001)).is_ok());

        let config = CostConfig::default();
        let compute_err = catalog()[0]
            .compute(&reference_item(), dec!(0), &config)
            .unwrap_err();
        let evaluate_err =
            crate::rma::evaluate(&reference_item(), dec!(0), &config).unwrap_err();
        let policy_err = crate::costs::QuantityPolicy::Integral
            .check(dec!(0))
            .unwrap_err();
        assert_eq!(compute_err, expected);
        assert_eq!(evaluate_err, expected);
        assert_eq!(policy_err, expected);
    }

    #[test]
    fn test_missing_attribute_only_fails_formulas_that_reference_it() {
        let item = ItemRecord::from_attributes("X", dec!(100).into(), ItemAttribute::Missing);
        let config = CostConfig::default();

        let credit_only = RmaFormula::find("Credit Only – Scrapped at Customer").unwrap();
        assert_eq!(credit_only.compute(&item, dec!(1), &config), Ok(dec!(120)));

        let missing = RmaFormula::find("Shipment Not Received").unwrap();
        let err = missing.compute(&item, dec!(1), &config).unwrap_err();
        assert!(matches!(err, RmaError::InvalidInput { ref field, .. } if field == "standard_cost"));
    }

    #[test]
    fn test_formula_text_and_inputs() {
        let formula = RmaFormula::find("Replacement – Good & Resellable Return").unwrap();
        assert_eq!(
            formula.formula_text(),
            "(outbound_shipping + replacement_shipping + 2 * qc_cost) * qty + admin_cost"
        );
        assert_eq!(
            formula.inputs(),
            vec!["outbound_shipping", "replacement_shipping", "qc_cost", "admin_cost"]
        );
        assert!(!formula.references_item());

        let labels = RmaFormula::find("Shipping Labels Only").unwrap();
        assert_eq!(
            labels.formula_text(),
            "(outbound_shipping + qc_cost + 1) * qty + admin_cost"
        );
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("credit".parse::<RmaCategory>(), Ok(RmaCategory::Credit));
        assert_eq!(" REPAIR ".parse::<RmaCategory>(), Ok(RmaCategory::Repair));
        assert!("refund".parse::<RmaCategory>().is_err());
    }
}
