//! Python bindings
//!
//! Minimal surface: evaluate the catalog for one item and export the
//! schema docs. Catalog loading and presentation stay on the Python side.

pub mod types;

use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::costs::{get_cost_config_schema, get_rma_schema, CostConfig, CostOverrides};
use crate::models::ItemRecord;
use crate::rma::evaluate;

/// Evaluate every RMA formula
///
/// Returns a list of `(name, category, cost)` string triples in catalog
/// order. `config` is an optional dict of `CostConfig` field overrides.
#[pyfunction]
#[pyo3(name = "evaluate_rma", signature = (price, std_cost, qty, config=None))]
pub fn py_evaluate_rma(
    price: &Bound<'_, PyAny>,
    std_cost: &Bound<'_, PyAny>,
    qty: &Bound<'_, PyAny>,
    config: Option<&Bound<'_, PyDict>>,
) -> PyResult<Vec<(String, String, String)>> {
    let item = ItemRecord::from_attributes(
        "python",
        types::extract_attribute(price)?,
        types::extract_attribute(std_cost)?,
    );
    let qty = types::extract_decimal(qty, "qty")?;
    let overrides = match config {
        Some(dict) => types::parse_cost_overrides(dict)?,
        None => CostOverrides::default(),
    };
    let config = CostConfig::default().with_overrides(&overrides);

    let results = evaluate(&item, qty, &config).map_err(types::to_py_err)?;
    Ok(results
        .into_iter()
        .map(|r| (r.name, r.category.to_string(), r.cost.to_string()))
        .collect())
}

/// Get the RMA formula schema documentation as a JSON string.
#[pyfunction]
#[pyo3(name = "get_rma_schema")]
pub fn py_get_rma_schema() -> PyResult<String> {
    Ok(get_rma_schema())
}

/// Get the cost config schema documentation as a JSON string.
#[pyfunction]
#[pyo3(name = "get_cost_config_schema")]
pub fn py_get_cost_config_schema() -> PyResult<String> {
    Ok(get_cost_config_schema())
}
