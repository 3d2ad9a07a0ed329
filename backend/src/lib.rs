//! RMA Calculator Core - Rust Engine
//!
//! Cost calculator for Return Merchandise Authorization scenarios. Given
//! an item's regular price and standard cost, a quantity and a small set
//! of per-unit ancillary costs, evaluates a fixed catalog of named RMA
//! cost formulas and ranks the results.
//!
//! # Architecture
//!
//! - **core**: Decimal money parsing and currency display
//! - **models**: Domain types (ItemRecord)
//! - **items**: Read-only item catalog and CSV loader
//! - **costs**: Cost configuration, quantity policy, schema docs
//! - **rma**: Formula catalog, evaluator, ranking/grouping views
//! - **calculator**: Lookup + policy + evaluation facade
//!
//! # Critical Invariants
//!
//! 1. All money values are `Decimal`, never float
//! 2. Evaluation is pure: same inputs, same outputs, no hidden state
//! 3. Evaluation is atomic: all formulas succeed or the call fails

// Module declarations
pub mod calculator;
pub mod core;
pub mod costs;
pub mod error;
pub mod items;
pub mod models;
pub mod rma;

// Re-exports for convenience
pub use calculator::{Quote, RmaCalculator};
pub use crate::core::money::{format_currency, parse_amount};
pub use costs::{get_cost_config_schema, get_rma_schema, CostConfig, CostOverrides, QuantityPolicy};
pub use error::RmaError;
pub use items::{ItemCatalog, ItemLookup};
pub use models::{ItemAttribute, ItemRecord};
pub use rma::{
    catalog, cost_extremes, evaluate, filter_by_category, group_by_category, CategoryFilter,
    CostExtremes, Highlight, RankedRow, RankedView, RmaCategory, RmaFormula, RmaResult, Term,
};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn rma_calculator_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::py_evaluate_rma, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::py_get_rma_schema, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::py_get_cost_config_schema, m)?)?;
    Ok(())
}
