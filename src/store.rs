//! Memoizing store of ranked results per (query, search) cell.
//!
//! Cells are filled lazily by invoking registered searches and are never
//! evicted. A cell moves `Absent → Populated` on first population (or on
//! load) and is only overwritten by an explicit refresh. The store is owned
//! by one engine instance; nothing is shared between instances.

use std::collections::BTreeMap;

use rank_overlap::{ListFormat, RankedList};

use crate::error::{ComparatorError, Result};
use crate::query::Query;
use crate::search::SearchRegistry;

/// Search name → ranked list for one query.
pub type QueryResults = BTreeMap<String, RankedList>;

static EMPTY: QueryResults = BTreeMap::new();

/// Cache of ranked results: query → search name → [`RankedList`].
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    cells: BTreeMap<Query, QueryResults>,
    format: ListFormat,
}

impl ResultStore {
    /// Create an empty store that ingests raw output with `format`.
    pub fn new(format: ListFormat) -> Self {
        Self {
            cells: BTreeMap::new(),
            format,
        }
    }

    /// Fill the store for every `query` × search pair.
    ///
    /// A cell is (re)computed when `refresh` is set or when it is absent;
    /// otherwise it is left untouched. Searches are invoked synchronously,
    /// query by query, in registration order. Returns the number of
    /// searches invoked.
    ///
    /// # Errors
    ///
    /// Stops at the first failing search with
    /// [`ComparatorError::SearchInvocation`], or at the first output that
    /// cannot be ingested as a ranked list. Cells written before the failure
    /// stay cached.
    pub fn populate(
        &mut self,
        queries: &[Query],
        searches: &SearchRegistry,
        refresh: bool,
    ) -> Result<usize> {
        let mut invoked = 0;
        for query in queries {
            for (name, search) in searches.iter() {
                if !refresh && self.cell(query.as_str(), name).is_some() {
                    tracing::trace!(search = name, "cache hit");
                    continue;
                }

                tracing::debug!(search = name, query = %query, "invoking search");
                invoked += 1;
                let raw = search
                    .search(query.as_str())
                    .map_err(|source| ComparatorError::SearchInvocation {
                        search: name.to_string(),
                        query: query.to_string(),
                        source,
                    })?;
                let list = RankedList::from_value(&raw, &self.format)?;
                tracing::debug!(search = name, results = list.len(), "cached ranked list");
                self.insert(query.clone(), name, list);
            }
        }
        Ok(invoked)
    }

    /// Search name → ranked list for `query`; empty if never populated.
    pub fn get(&self, query: &str) -> &QueryResults {
        self.cells.get(query).unwrap_or(&EMPTY)
    }

    /// A single cell, if populated.
    pub fn cell(&self, query: &str, search: &str) -> Option<&RankedList> {
        self.get(query).get(search)
    }

    /// Write a cell, replacing any previous list (last write wins).
    pub fn insert(&mut self, query: Query, search: impl Into<String>, list: RankedList) {
        self.cells
            .entry(query)
            .or_default()
            .insert(search.into(), list);
    }

    /// Queries with at least one populated cell, in sorted order.
    pub fn queries(&self) -> impl Iterator<Item = &Query> {
        self.cells.keys()
    }

    /// Iterate every query with its per-search results.
    pub fn iter(&self) -> impl Iterator<Item = (&Query, &QueryResults)> {
        self.cells.iter()
    }

    /// Total number of populated cells.
    pub fn cell_count(&self) -> usize {
        self.cells.values().map(BTreeMap::len).sum()
    }

    /// Whether no cell is populated.
    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    /// Format used to ingest raw search output.
    pub fn format(&self) -> &ListFormat {
        &self.format
    }
}
