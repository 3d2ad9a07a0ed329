//! Cost Configuration and Schema Documentation
//!
//! This module provides:
//! - Per-evaluation cost configuration (`CostConfig`, `CostOverrides`)
//! - Quantity acceptance policy (`QuantityPolicy`)
//! - Self-documenting schema for config fields and RMA formulas (`schema_docs`)

pub mod config;
pub mod schema_docs;

// Re-exports
pub use config::{CostConfig, CostOverrides, QuantityPolicy};
pub use schema_docs::{
    get_cost_config_schema, get_rma_schema, ConfigFieldDoc, ConfigSchemaDocumented,
    CostConfigSchemaDoc, FormulaDoc, FormulaExample, RmaSchemaDoc,
};
