//! Cost Configuration
//!
//! Per-unit ancillary costs and the flat admin fee applied by every RMA
//! formula. Supplied explicitly to each evaluation; nothing here is
//! process-global. All monetary values are `Decimal` currency units.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::RmaError;
use crate::rma::formula::check_positive_qty;

/// Cost Configuration
///
/// Defaults: all shipping legs 0, QC 5, admin 20, repair material 5,
/// repair labor 35. Shipping varies by deployment; see
/// [`CostConfig::warehouse_preset`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostConfig {
    /// Outbound shipping per unit. Default: 0
    pub outbound_shipping: Decimal,

    /// Return shipping per unit (customer back to us). Default: 0
    pub return_shipping: Decimal,

    /// Replacement shipping per unit. Default: 0
    pub replacement_shipping: Decimal,

    /// Quality-control inspection per unit processed. Default: 5
    pub qc_cost: Decimal,

    /// Flat fee per RMA event, not scaled by quantity. Default: 20
    pub admin_cost: Decimal,

    /// Repair material per unit. Default: 5
    pub repair_material: Decimal,

    /// Repair labor per unit. Default: 35
    pub repair_labor: Decimal,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            outbound_shipping: Decimal::ZERO,
            return_shipping: Decimal::ZERO,
            replacement_shipping: Decimal::ZERO,
            qc_cost: Decimal::from(5),
            admin_cost: Decimal::from(20),
            repair_material: Decimal::from(5),
            repair_labor: Decimal::from(35),
        }
    }
}

impl CostConfig {
    /// Shipping and QC constants observed in the warehouse deployment
    /// (outbound 5, return 10, replacement 15, QC 10.50)
    pub fn warehouse_preset() -> Self {
        Self {
            outbound_shipping: Decimal::from(5),
            return_shipping: Decimal::from(10),
            replacement_shipping: Decimal::from(15),
            qc_cost: Decimal::new(1050, 2),
            ..Self::default()
        }
    }

    /// Field names and values in declaration order
    pub fn fields(&self) -> [(&'static str, Decimal); 7] {
        [
            ("outbound_shipping", self.outbound_shipping),
            ("return_shipping", self.return_shipping),
            ("replacement_shipping", self.replacement_shipping),
            ("qc_cost", self.qc_cost),
            ("admin_cost", self.admin_cost),
            ("repair_material", self.repair_material),
            ("repair_labor", self.repair_labor),
        ]
    }

    /// Check every field is non-negative
    ///
    /// # Errors
    /// `RmaError::InvalidInput` naming the first negative field.
    pub fn validate(&self) -> Result<(), RmaError> {
        for (name, value) in self.fields() {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(RmaError::invalid_input(
                    name,
                    format!("must be non-negative, got {}", value),
                ));
            }
        }
        Ok(())
    }

    /// Return a copy with every `Some` override applied
    pub fn with_overrides(&self, overrides: &CostOverrides) -> Self {
        Self {
            outbound_shipping: overrides.outbound_shipping.unwrap_or(self.outbound_shipping),
            return_shipping: overrides.return_shipping.unwrap_or(self.return_shipping),
            replacement_shipping: overrides
                .replacement_shipping
                .unwrap_or(self.replacement_shipping),
            qc_cost: overrides.qc_cost.unwrap_or(self.qc_cost),
            admin_cost: overrides.admin_cost.unwrap_or(self.admin_cost),
            repair_material: overrides.repair_material.unwrap_or(self.repair_material),
            repair_labor: overrides.repair_labor.unwrap_or(self.repair_labor),
        }
    }
}

/// Optional per-field overrides of a base `CostConfig`
///
/// Missing fields fall back to the base value. Deserializes from partial
/// JSON such as `{"qc_cost": 10.5}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostOverrides {
    pub outbound_shipping: Option<Decimal>,
    pub return_shipping: Option<Decimal>,
    pub replacement_shipping: Option<Decimal>,
    pub qc_cost: Option<Decimal>,
    pub admin_cost: Option<Decimal>,
    pub repair_material: Option<Decimal>,
    pub repair_labor: Option<Decimal>,
}

impl CostOverrides {
    /// Layer `other` on top of `self`; fields set in `other` win
    pub fn merge(&self, other: &CostOverrides) -> CostOverrides {
        CostOverrides {
            outbound_shipping: other.outbound_shipping.or(self.outbound_shipping),
            return_shipping: other.return_shipping.or(self.return_shipping),
            replacement_shipping: other.replacement_shipping.or(self.replacement_shipping),
            qc_cost: other.qc_cost.or(self.qc_cost),
            admin_cost: other.admin_cost.or(self.admin_cost),
            repair_material: other.repair_material.or(self.repair_material),
            repair_labor: other.repair_labor.or(self.repair_labor),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == CostOverrides::default()
    }
}

/// Which quantities a deployment accepts
///
/// The evaluator itself only requires `qty > 0` and never truncates; this
/// policy is enforced by the calculator facade before evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuantityPolicy {
    /// Whole units only, at least 1
    Integral,
    /// Any quantity at or above `min`
    Fractional { min: Decimal },
}

impl Default for QuantityPolicy {
    fn default() -> Self {
        QuantityPolicy::Fractional {
            min: Decimal::new(1, 2), // 0.01
        }
    }
}

impl QuantityPolicy {
    /// Check `qty` against the policy
    ///
    /// # Errors
    /// `RmaError::InvalidInput` on field `qty`.
    pub fn check(&self, qty: Decimal) -> Result<(), RmaError> {
        check_positive_qty(qty)?;
        match self {
            QuantityPolicy::Integral => {
                if qty.fract() != Decimal::ZERO {
                    return Err(RmaError::invalid_input(
                        "qty",
                        format!("must be a whole number of units, got {}", qty),
                    ));
                }
            }
            QuantityPolicy::Fractional { min } => {
                if qty < *min {
                    return Err(RmaError::invalid_input(
                        "qty",
                        format!("must be at least {}, got {}", min, qty),
                    ));
                }
            }
        }
        Ok(())
    }
}
