//! Queries under test.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::error::{ComparatorError, Result};

/// An opaque query, identified by its text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query(String);

impl Query {
    /// Create a query from its text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The query text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Query {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Query {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for Query {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Registered queries, kept in registration order without duplicates.
#[derive(Debug, Clone, Default)]
pub struct QueryRegistry {
    queries: Vec<Query>,
}

impl QueryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a query. Returns `false` if it was already registered.
    pub fn add(&mut self, query: impl Into<Query>) -> bool {
        let query = query.into();
        if self.contains(query.as_str()) {
            return false;
        }
        self.queries.push(query);
        true
    }

    /// Remove a registered query.
    ///
    /// # Errors
    ///
    /// Returns [`ComparatorError::UnknownQuery`] if the query was never registered.
    pub fn remove(&mut self, query: &str) -> Result<Query> {
        let index = self
            .queries
            .iter()
            .position(|q| q.as_str() == query)
            .ok_or_else(|| ComparatorError::UnknownQuery(query.to_string()))?;
        Ok(self.queries.remove(index))
    }

    /// Whether `query` is registered.
    pub fn contains(&self, query: &str) -> bool {
        self.queries.iter().any(|q| q.as_str() == query)
    }

    /// Registered queries in registration order.
    pub fn as_slice(&self) -> &[Query] {
        &self.queries
    }

    /// Iterate queries in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Query> {
        self.queries.iter()
    }

    /// Number of registered queries.
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    /// Whether no queries are registered.
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}
