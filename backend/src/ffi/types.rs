//! Type conversion utilities for FFI boundary
//!
//! Decimal values cross the boundary as text: any Python object is read
//! through `str()` and parsed, so `10.5`, `"10.50"` and `Decimal("10.5")`
//! all work.

use pyo3::prelude::*;
use pyo3::types::PyDict;
use rust_decimal::Decimal;

use crate::core::money::parse_amount;
use crate::costs::CostOverrides;
use crate::error::RmaError;
use crate::models::ItemAttribute;

/// Map library errors onto Python exception types
pub fn to_py_err(err: RmaError) -> PyErr {
    match err {
        RmaError::ItemNotFound { .. } => {
            PyErr::new::<pyo3::exceptions::PyKeyError, _>(err.to_string())
        }
        RmaError::CatalogRead(_) => PyErr::new::<pyo3::exceptions::PyIOError, _>(err.to_string()),
        _ => PyErr::new::<pyo3::exceptions::PyValueError, _>(err.to_string()),
    }
}

/// Parse a Python value into a `Decimal`
///
/// # Errors
/// Returns PyValueError naming `field` if the value is not numeric.
pub fn extract_decimal(value: &Bound<'_, PyAny>, field: &str) -> PyResult<Decimal> {
    let text = value.str()?.to_string();
    parse_amount(&text).ok_or_else(|| {
        to_py_err(RmaError::invalid_input(
            field,
            format!("'{}' is not a number", text),
        ))
    })
}

/// Parse a Python value into an item attribute (None -> Missing)
pub fn extract_attribute(value: &Bound<'_, PyAny>) -> PyResult<ItemAttribute> {
    if value.is_none() {
        return Ok(ItemAttribute::Missing);
    }
    Ok(ItemAttribute::parse(&value.str()?.to_string()))
}

/// Extract an optional decimal field from a Python dict
fn extract_optional_decimal(dict: &Bound<'_, PyDict>, key: &str) -> PyResult<Option<Decimal>> {
    match dict.get_item(key)? {
        Some(value) if !value.is_none() => Ok(Some(extract_decimal(&value, key)?)),
        _ => Ok(None),
    }
}

/// Convert a Python dict of config overrides to `CostOverrides`
///
/// Unknown keys are rejected so that typos do not silently fall back to
/// defaults.
pub fn parse_cost_overrides(dict: &Bound<'_, PyDict>) -> PyResult<CostOverrides> {
    const KNOWN: [&str; 7] = [
        "outbound_shipping",
        "return_shipping",
        "replacement_shipping",
        "qc_cost",
        "admin_cost",
        "repair_material",
        "repair_labor",
    ];
    for key in dict.keys() {
        let key: String = key.extract()?;
        if !KNOWN.contains(&key.as_str()) {
            return Err(PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "Unknown cost config field '{}'",
                key
            )));
        }
    }

    Ok(CostOverrides {
        outbound_shipping: extract_optional_decimal(dict, "outbound_shipping")?,
        return_shipping: extract_optional_decimal(dict, "return_shipping")?,
        replacement_shipping: extract_optional_decimal(dict, "replacement_shipping")?,
        qc_cost: extract_optional_decimal(dict, "qc_cost")?,
        admin_cost: extract_optional_decimal(dict, "admin_cost")?,
        repair_material: extract_optional_decimal(dict, "repair_material")?,
        repair_labor: extract_optional_decimal(dict, "repair_labor")?,
    })
}
