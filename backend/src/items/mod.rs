//! Item catalog: read-only lookup from item identifier to price and cost
//!
//! Loaded once, never mutated afterwards; concurrent readers need no
//! synchronization.

pub mod catalog;
pub mod loader;

pub use catalog::{ItemCatalog, ItemLookup};
pub use loader::{normalize_header, REQUIRED_COLUMNS};
