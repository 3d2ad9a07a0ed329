//! Ranking and grouping over evaluated results
//!
//! Read-only views: nothing here mutates or reorders the result sequence
//! it is given. Min/max flags use exact decimal equality, so every entry
//! tied at an extreme is flagged.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::evaluator::RmaResult;
use super::formula::RmaCategory;
use crate::error::RmaError;

/// Category selector for a view; `All` keeps every row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(RmaCategory),
}

impl CategoryFilter {
    pub fn matches(&self, category: RmaCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All"),
            CategoryFilter::Only(category) => write!(f, "{}", category),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = RmaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse::<RmaCategory>().map(CategoryFilter::Only)
    }
}

impl From<RmaCategory> for CategoryFilter {
    fn from(category: RmaCategory) -> Self {
        CategoryFilter::Only(category)
    }
}

/// Rows whose category passes `filter`, in their original order
pub fn filter_by_category(results: &[RmaResult], filter: CategoryFilter) -> Vec<&RmaResult> {
    results
        .iter()
        .filter(|r| filter.matches(r.category))
        .collect()
}

/// Lowest and highest cost in a set of rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostExtremes {
    pub min: Decimal,
    pub max: Decimal,
}

/// Min and max cost over `rows`; `None` when empty
pub fn cost_extremes<'a, I>(rows: I) -> Option<CostExtremes>
where
    I: IntoIterator<Item = &'a RmaResult>,
{
    rows.into_iter().fold(None, |acc, row| match acc {
        None => Some(CostExtremes {
            min: row.cost,
            max: row.cost,
        }),
        Some(ext) => Some(CostExtremes {
            min: ext.min.min(row.cost),
            max: ext.max.max(row.cost),
        }),
    })
}

/// Presentation highlight for one row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Highlight {
    Max,
    Min,
    None,
}

/// A result with its extreme flags
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedRow<'a> {
    pub result: &'a RmaResult,
    pub is_min: bool,
    pub is_max: bool,
}

impl RankedRow<'_> {
    /// Max wins when a row is both min and max (all costs equal)
    pub fn highlight(&self) -> Highlight {
        if self.is_max {
            Highlight::Max
        } else if self.is_min {
            Highlight::Min
        } else {
            Highlight::None
        }
    }
}

/// A filtered, flagged view over an evaluation's results
///
/// # Example
/// ```
/// use rma_calculator_core_rs::{evaluate, CategoryFilter, CostConfig, ItemRecord, RankedView, RmaCategory};
/// use rust_decimal::Decimal;
///
/// let item = ItemRecord::new("SKU-1", Decimal::from(100), Decimal::from(40));
/// let results = evaluate(&item, Decimal::ONE, &CostConfig::default()).unwrap();
///
/// let credit = RankedView::build(&results, CategoryFilter::Only(RmaCategory::Credit));
/// assert_eq!(credit.len(), 3);
/// assert_eq!(credit.extremes().unwrap().min, Decimal::from(120));
/// ```
#[derive(Debug, Clone)]
pub struct RankedView<'a> {
    filter: CategoryFilter,
    rows: Vec<RankedRow<'a>>,
    extremes: Option<CostExtremes>,
}

impl<'a> RankedView<'a> {
    pub fn build(results: &'a [RmaResult], filter: CategoryFilter) -> Self {
        let selected = filter_by_category(results, filter);
        let extremes = cost_extremes(selected.iter().copied());

        let rows = selected
            .into_iter()
            .map(|result| RankedRow {
                result,
                is_min: extremes.is_some_and(|e| result.cost == e.min),
                is_max: extremes.is_some_and(|e| result.cost == e.max),
            })
            .collect();

        Self {
            filter,
            rows,
            extremes,
        }
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    /// Rows in declaration order
    pub fn rows(&self) -> &[RankedRow<'a>] {
        &self.rows
    }

    pub fn extremes(&self) -> Option<CostExtremes> {
        self.extremes
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every row tied at the minimum
    pub fn min_rows(&self) -> Vec<&'a RmaResult> {
        self.rows.iter().filter(|r| r.is_min).map(|r| r.result).collect()
    }

    /// Every row tied at the maximum
    pub fn max_rows(&self) -> Vec<&'a RmaResult> {
        self.rows.iter().filter(|r| r.is_max).map(|r| r.result).collect()
    }

    /// Rows ordered by ascending cost; ties keep declaration order
    pub fn sorted_by_cost(&self) -> Vec<RankedRow<'a>> {
        let mut sorted = self.rows.clone();
        sorted.sort_by(|a, b| a.result.cost.cmp(&b.result.cost));
        sorted
    }
}

/// Results grouped by category, in `RmaCategory::ALL` order
///
/// Categories with no rows are omitted. Within a group rows keep their
/// original order.
pub fn group_by_category(results: &[RmaResult]) -> Vec<(RmaCategory, Vec<&RmaResult>)> {
    RmaCategory::ALL
        .into_iter()
        .map(|category| (category, filter_by_category(results, category.into())))
        .filter(|(_, rows)| !rows.is_empty())
        .collect()
}
