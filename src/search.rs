//! Named search callables to compare.
//!
//! A search is anything that maps query text to a ranked sequence of
//! entries. The engine treats it as a black box: it may run in-process or
//! call out over the network, and no timeout is imposed.

use serde_json::Value;

use crate::error::{BoxError, ComparatorError, Result};

/// A search function under evaluation.
///
/// The returned value is the raw ranked output: a JSON array of bare
/// identifiers or records, optionally wrapped in an object under the
/// configured results field.
pub trait Search: Send + Sync {
    /// Run the search for `query`.
    ///
    /// # Errors
    ///
    /// Any error is reported to the caller of population as
    /// [`ComparatorError::SearchInvocation`].
    fn search(&self, query: &str) -> std::result::Result<Value, BoxError>;
}

/// Adapter turning a closure into a [`Search`].
pub struct FnSearch<F>(F);

impl<F> FnSearch<F>
where
    F: Fn(&str) -> std::result::Result<Value, BoxError> + Send + Sync,
{
    /// Wrap `f` as a search.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Search for FnSearch<F>
where
    F: Fn(&str) -> std::result::Result<Value, BoxError> + Send + Sync,
{
    fn search(&self, query: &str) -> std::result::Result<Value, BoxError> {
        (self.0)(query)
    }
}

/// Registered searches keyed by unique name, kept in registration order.
#[derive(Default)]
pub struct SearchRegistry {
    searches: Vec<(String, Box<dyn Search>)>,
}

impl std::fmt::Debug for SearchRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchRegistry")
            .field("names", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

impl SearchRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `search` under `name`.
    ///
    /// Rebinding an existing name replaces its callable but keeps its
    /// original position. Returns `true` if the name was new.
    pub fn add(&mut self, name: impl Into<String>, search: impl Search + 'static) -> bool {
        let name = name.into();
        let search: Box<dyn Search> = Box::new(search);
        if let Some(slot) = self.searches.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = search;
            return false;
        }
        self.searches.push((name, search));
        true
    }

    /// Remove a registered search by name.
    ///
    /// # Errors
    ///
    /// Returns [`ComparatorError::UnknownSearch`] if no search has that name.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        let index = self
            .searches
            .iter()
            .position(|(n, _)| n == name)
            .ok_or_else(|| ComparatorError::UnknownSearch(name.to_string()))?;
        self.searches.remove(index);
        Ok(())
    }

    /// Look up a search by name.
    pub fn get(&self, name: &str) -> Option<&dyn Search> {
        self.searches
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s.as_ref())
    }

    /// Whether a search is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.searches.iter().map(|(n, _)| n.as_str())
    }

    /// Iterate `(name, search)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Search)> {
        self.searches.iter().map(|(n, s)| (n.as_str(), s.as_ref()))
    }

    /// Number of registered searches.
    pub fn len(&self) -> usize {
        self.searches.len()
    }

    /// Whether no searches are registered.
    pub fn is_empty(&self) -> bool {
        self.searches.is_empty()
    }
}
