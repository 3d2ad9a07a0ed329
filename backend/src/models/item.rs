//! Item model
//!
//! One catalog entry: an identifier, the two numeric attributes every
//! cost formula draws on (regular price, standard cost) and any number of
//! display-only attributes carried through from the source unmodified.
//!
//! No invariant ties standard cost to regular price; margin can be
//! negative and is never validated.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::money::parse_amount;
use crate::error::RmaError;

/// A numeric item attribute as read from the catalog source
///
/// Absence and malformed text are kept distinct from zero so that a
/// formula referencing the attribute fails instead of silently pricing
/// at $0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemAttribute {
    /// Parsed numeric value
    Value(Decimal),
    /// Cell was empty or column value absent
    Missing,
    /// Cell held text that is not a number (raw text kept for reporting)
    Malformed(String),
}

impl ItemAttribute {
    /// Parse a raw cell. Empty text becomes `Missing`.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return ItemAttribute::Missing;
        }
        match parse_amount(raw) {
            Some(value) => ItemAttribute::Value(value),
            None => ItemAttribute::Malformed(raw.trim().to_string()),
        }
    }

    /// The numeric value, if present and well-formed
    pub fn value(&self) -> Option<Decimal> {
        match self {
            ItemAttribute::Value(v) => Some(*v),
            _ => None,
        }
    }

    /// Require a usable non-negative value for `field`
    ///
    /// # Errors
    /// `RmaError::InvalidInput` when the attribute is missing, malformed
    /// or negative.
    pub fn require(&self, field: &str) -> Result<Decimal, RmaError> {
        match self {
            ItemAttribute::Value(v) if v.is_sign_negative() && !v.is_zero() => Err(
                RmaError::invalid_input(field, format!("must be non-negative, got {}", v)),
            ),
            ItemAttribute::Value(v) => Ok(*v),
            ItemAttribute::Missing => Err(RmaError::invalid_input(field, "value is missing")),
            ItemAttribute::Malformed(raw) => Err(RmaError::invalid_input(
                field,
                format!("'{}' is not a number", raw),
            )),
        }
    }
}

impl From<Decimal> for ItemAttribute {
    fn from(value: Decimal) -> Self {
        ItemAttribute::Value(value)
    }
}

/// A catalog item
///
/// # Example
/// ```
/// use rma_calculator_core_rs::ItemRecord;
/// use rust_decimal::Decimal;
///
/// let item = ItemRecord::new("SKU-100", Decimal::from(100), Decimal::from(40))
///     .with_attribute("onhand", "12");
/// assert_eq!(item.id(), "SKU-100");
/// assert_eq!(item.margin(), Some(Decimal::from(60)));
/// assert_eq!(item.attribute("onhand"), Some("12"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Unique lookup key
    id: String,

    /// Nominal resale price
    regular_price: ItemAttribute,

    /// Internal cost basis
    standard_cost: ItemAttribute,

    /// Display-only columns as (header, value), in source column order
    display_attributes: Vec<(String, String)>,
}

impl ItemRecord {
    /// Create an item with both numeric attributes present
    pub fn new(id: impl Into<String>, regular_price: Decimal, standard_cost: Decimal) -> Self {
        Self::from_attributes(id, regular_price.into(), standard_cost.into())
    }

    /// Create an item from already-classified attributes
    pub fn from_attributes(
        id: impl Into<String>,
        regular_price: ItemAttribute,
        standard_cost: ItemAttribute,
    ) -> Self {
        Self {
            id: id.into(),
            regular_price,
            standard_cost,
            display_attributes: Vec::new(),
        }
    }

    /// Attach a display-only attribute (builder style)
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_attribute(name, value);
        self
    }

    pub(crate) fn push_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.display_attributes.push((name.into(), value.into()));
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn regular_price(&self) -> &ItemAttribute {
        &self.regular_price
    }

    pub fn standard_cost(&self) -> &ItemAttribute {
        &self.standard_cost
    }

    pub fn display_attributes(&self) -> &[(String, String)] {
        &self.display_attributes
    }

    /// Look up a display attribute by header name (exact match)
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.display_attributes
            .iter()
            .find(|(header, _)| header == name)
            .map(|(_, value)| value.as_str())
    }

    /// Regular price minus standard cost, when both are numeric
    pub fn margin(&self) -> Option<Decimal> {
        Some(self.regular_price.value()? - self.standard_cost.value()?)
    }
}
