//! In-memory item catalog

use std::collections::HashMap;

use tracing::warn;

use crate::error::RmaError;
use crate::models::ItemRecord;

/// Read access to items by identifier
///
/// The calculator only depends on this trait, so any read-only key-value
/// provider can stand in for the CSV-backed [`ItemCatalog`].
pub trait ItemLookup {
    /// Exact-match lookup
    ///
    /// # Errors
    /// `RmaError::ItemNotFound` when no item has this identifier.
    fn get_item(&self, item_id: &str) -> Result<&ItemRecord, RmaError>;
}

/// Immutable catalog of items keyed by identifier
///
/// Identifiers keep first-seen order for listing. When an identifier
/// repeats, the first record wins.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: HashMap<String, ItemRecord>,
    order: Vec<String>,
    columns: Vec<String>,
}

impl ItemCatalog {
    /// Build a catalog from records (first occurrence of an id wins)
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = ItemRecord>,
    {
        let mut catalog = ItemCatalog::default();
        for record in records {
            catalog.insert(record);
        }
        catalog
    }

    pub(crate) fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = columns;
        self
    }

    /// Insert unless the id is already present. Returns true if inserted.
    pub(crate) fn insert(&mut self, record: ItemRecord) -> bool {
        if self.items.contains_key(record.id()) {
            warn!(item_id = record.id(), "duplicate item id in catalog, keeping first row");
            return false;
        }
        self.order.push(record.id().to_string());
        self.items.insert(record.id().to_string(), record);
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.items.contains_key(item_id)
    }

    /// Identifiers in first-seen order
    pub fn item_ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Items in first-seen order
    pub fn items(&self) -> impl Iterator<Item = &ItemRecord> {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    /// Normalized column names of the source, in source order (empty when
    /// built from records)
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl ItemLookup for ItemCatalog {
    fn get_item(&self, item_id: &str) -> Result<&ItemRecord, RmaError> {
        self.items
            .get(item_id)
            .ok_or_else(|| RmaError::ItemNotFound {
                item_id: item_id.to_string(),
            })
    }
}
