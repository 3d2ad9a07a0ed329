//! RMA cost formulas, evaluation and ranking
//!
//! - `formula`: the fixed catalog of named linear cost formulas
//! - `evaluator`: applies every formula to one item/quantity/config
//! - `ranking`: category filtering, min/max flags and grouping over results

pub mod evaluator;
pub mod formula;
pub mod ranking;

pub use evaluator::{evaluate, evaluate_formulas, RmaResult};
pub use formula::{catalog, RmaCategory, RmaFormula, Term};
pub use ranking::{
    cost_extremes, filter_by_category, group_by_category, CategoryFilter, CostExtremes, Highlight,
    RankedRow, RankedView,
};
