//! Error taxonomy for catalog loading, item lookup and cost evaluation
//!
//! Each failure class is a distinct variant so callers can tell
//! "no such item" from "bad quantity" from "catalog unusable".

use thiserror::Error;

/// Errors surfaced by the RMA calculator
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RmaError {
    /// Catalog source lacks one or more required columns.
    ///
    /// `missing` lists every absent column (normalized name), in the
    /// order the columns are required.
    #[error("Missing required columns in item catalog: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    /// Requested identifier has no matching catalog row
    #[error("Item '{item_id}' not found in catalog")]
    ItemNotFound { item_id: String },

    /// Non-positive quantity, negative config value, or an item attribute
    /// that is absent or non-numeric where a formula needs it
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// Catalog source could not be read (I/O or malformed CSV structure)
    #[error("Failed to read item catalog: {0}")]
    CatalogRead(String),
}

impl RmaError {
    /// Shorthand for building an `InvalidInput` error
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        RmaError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<csv::Error> for RmaError {
    fn from(err: csv::Error) -> Self {
        RmaError::CatalogRead(err.to_string())
    }
}

impl From<std::io::Error> for RmaError {
    fn from(err: std::io::Error) -> Self {
        RmaError::CatalogRead(err.to_string())
    }
}
