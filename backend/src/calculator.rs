//! Calculator facade
//!
//! Wires item lookup, quantity policy, config overrides and the evaluator
//! into one call. Holds no mutable state; every quote is independent.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::costs::{CostConfig, CostOverrides, QuantityPolicy};
use crate::error::RmaError;
use crate::items::ItemLookup;
use crate::models::ItemRecord;
use crate::rma::{evaluate, CategoryFilter, RankedView, RmaResult};

/// Evaluated costs for one item and quantity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub item: ItemRecord,
    pub qty: Decimal,
    /// Effective config after overrides
    pub config: CostConfig,
    /// One entry per formula, in catalog order
    pub results: Vec<RmaResult>,
}

impl Quote {
    pub fn item_id(&self) -> &str {
        self.item.id()
    }

    /// Filtered, min/max-flagged view of the results
    pub fn view(&self, filter: CategoryFilter) -> RankedView<'_> {
        RankedView::build(&self.results, filter)
    }
}

/// Looks up items and evaluates the RMA catalog against them
///
/// # Example
/// ```
/// use rma_calculator_core_rs::{CostOverrides, ItemCatalog, ItemRecord, RmaCalculator};
/// use rust_decimal::Decimal;
///
/// let catalog = ItemCatalog::from_records(vec![
///     ItemRecord::new("SKU-1", Decimal::from(100), Decimal::from(40)),
/// ]);
/// let calculator = RmaCalculator::new(catalog);
/// let quote = calculator.quote("SKU-1", Decimal::ONE, &CostOverrides::default()).unwrap();
/// assert_eq!(quote.results.len(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct RmaCalculator<L: ItemLookup> {
    lookup: L,
    base_config: CostConfig,
    quantity_policy: QuantityPolicy,
}

impl<L: ItemLookup> RmaCalculator<L> {
    /// Calculator with default config and fractional quantity policy
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            base_config: CostConfig::default(),
            quantity_policy: QuantityPolicy::default(),
        }
    }

    pub fn with_config(mut self, config: CostConfig) -> Self {
        self.base_config = config;
        self
    }

    pub fn with_quantity_policy(mut self, policy: QuantityPolicy) -> Self {
        self.quantity_policy = policy;
        self
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    pub fn base_config(&self) -> &CostConfig {
        &self.base_config
    }

    pub fn quantity_policy(&self) -> QuantityPolicy {
        self.quantity_policy
    }

    /// Evaluate every RMA type for `item_id` at `qty`
    ///
    /// Steps: lookup, quantity policy, override merge and validation,
    /// evaluation. The first failure aborts the quote.
    ///
    /// # Errors
    /// - `RmaError::ItemNotFound` for an unknown identifier
    /// - `RmaError::InvalidInput` for a rejected quantity, a negative
    ///   config value or an unusable item attribute
    pub fn quote(
        &self,
        item_id: &str,
        qty: Decimal,
        overrides: &CostOverrides,
    ) -> Result<Quote, RmaError> {
        let item = self.lookup.get_item(item_id)?;
        self.quantity_policy.check(qty)?;

        let config = self.base_config.with_overrides(overrides);
        config.validate()?;

        let results = evaluate(item, qty, &config)?;
        Ok(Quote {
            item: item.clone(),
            qty,
            config,
            results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::ItemCatalog;
    use rust_decimal_macros::dec;

    fn calculator() -> RmaCalculator<ItemCatalog> {
        RmaCalculator::new(ItemCatalog::from_records(vec![ItemRecord::new(
            "1001",
            dec!(100),
            dec!(40),
        )]))
    }

    #[test]
    fn test_quote_unknown_item() {
        let err = calculator()
            .quote("9999", dec!(1), &CostOverrides::default())
            .unwrap_err();
        assert_eq!(
            err,
            RmaError::ItemNotFound {
                item_id: "9999".to_string()
            }
        );
    }

    #[test]
    fn test_quote_applies_overrides() {
        let overrides = CostOverrides {
            qc_cost: Some(dec!(10.50)),
            ..CostOverrides::default()
        };
        let quote = calculator().quote("1001", dec!(1), &overrides).unwrap();
        assert_eq!(quote.config.qc_cost, dec!(10.50));
        // (100 + 0 + 0 + 10.50) * 1 + 20
        assert_eq!(quote.results[0].cost, dec!(130.50));
    }

    #[test]
    fn test_quote_enforces_quantity_policy() {
        let calc = calculator().with_quantity_policy(QuantityPolicy::Integral);
        let err = calc.quote("1001", dec!(2.5), &CostOverrides::default()).unwrap_err();
        assert!(matches!(err, RmaError::InvalidInput { ref field, .. } if field == "qty"));
        assert!(calc.quote("1001", dec!(2), &CostOverrides::default()).is_ok());
    }

    #[test]
    fn test_quote_rejects_negative_override() {
        let overrides = CostOverrides {
            outbound_shipping: Some(dec!(-1)),
            ..CostOverrides::default()
        };
        let err = calculator().quote("1001", dec!(1), &overrides).unwrap_err();
        assert!(matches!(err, RmaError::InvalidInput { ref field, .. } if field == "outbound_shipping"));
    }
}
