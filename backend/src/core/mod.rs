//! Shared primitives: decimal money parsing and display

pub mod money;

pub use money::{format_currency, parse_amount};
