//! Domain models for the RMA calculator

pub mod item;

// Re-exports
pub use item::{ItemAttribute, ItemRecord};
