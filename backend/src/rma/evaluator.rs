//! RMA Evaluator
//!
//! Applies every catalog formula to one item, quantity and config.
//! Pure: no I/O, no shared state. Either every formula succeeds or the
//! whole call fails; partial result lists are never returned.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::formula::{catalog, check_positive_qty, RmaCategory, RmaFormula};
use crate::costs::CostConfig;
use crate::error::RmaError;
use crate::models::ItemRecord;

/// One evaluated RMA type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RmaResult {
    /// RMA type display name
    pub name: String,
    pub category: RmaCategory,
    /// Exact total cost (round only for display)
    pub cost: Decimal,
}

impl RmaResult {
    pub fn new(name: impl Into<String>, category: RmaCategory, cost: Decimal) -> Self {
        Self {
            name: name.into(),
            category,
            cost,
        }
    }
}

/// Evaluate the full formula catalog
///
/// Results come back in catalog declaration order, one per formula. They
/// are not sorted by cost.
///
/// # Errors
/// `RmaError::InvalidInput` if `qty <= 0`, if any config field is
/// negative, or if an item attribute referenced by any formula is missing
/// or non-numeric.
///
/// # Example
/// ```
/// use rma_calculator_core_rs::{evaluate, CostConfig, ItemRecord};
/// use rust_decimal::Decimal;
///
/// let item = ItemRecord::new("SKU-1", Decimal::from(100), Decimal::from(40));
/// let results = evaluate(&item, Decimal::ONE, &CostConfig::default()).unwrap();
/// assert_eq!(results.len(), 10);
/// assert_eq!(results[0].name, "Credit for Return of Functional Product");
/// assert_eq!(results[0].cost, Decimal::from(125));
/// ```
pub fn evaluate(
    item: &ItemRecord,
    qty: Decimal,
    config: &CostConfig,
) -> Result<Vec<RmaResult>, RmaError> {
    evaluate_formulas(catalog(), item, qty, config)
}

/// Evaluate an explicit list of formulas (same rules as [`evaluate`])
pub fn evaluate_formulas(
    formulas: &[RmaFormula],
    item: &ItemRecord,
    qty: Decimal,
    config: &CostConfig,
) -> Result<Vec<RmaResult>, RmaError> {
    check_positive_qty(qty)?;
    config.validate()?;

    let results = formulas
        .iter()
        .map(|formula| {
            formula
                .compute(item, qty, config)
                .map(|cost| RmaResult::new(formula.name(), formula.category(), cost))
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        item_id = item.id(),
        %qty,
        formulas = results.len(),
        "evaluated RMA formulas"
    );
    Ok(results)
}
