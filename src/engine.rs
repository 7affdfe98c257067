//! Comparison engine: registration, population, pairwise scoring and persistence.
//!
//! Every engine owns its registries, result store and comparator. Two
//! engines never share state.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rank_overlap::{Comparator, Identifier, RboScorer};
use serde_json::Value;

use crate::config::ComparatorConfig;
use crate::error::{BoxError, Result};
use crate::matrix::SimilarityMatrix;
use crate::persist;
use crate::query::{Query, QueryRegistry};
use crate::search::{FnSearch, Search, SearchRegistry};
use crate::store::{QueryResults, ResultStore};

/// Orchestrates result capture and rank-similarity comparison.
pub struct ComparisonEngine {
    config: ComparatorConfig,
    queries: QueryRegistry,
    searches: SearchRegistry,
    store: ResultStore,
    comparator: Box<dyn Comparator>,
}

impl std::fmt::Debug for ComparisonEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComparisonEngine")
            .field("config", &self.config)
            .field("queries", &self.queries)
            .field("searches", &self.searches)
            .field("cells", &self.store.cell_count())
            .field("comparator", &self.comparator.name())
            .finish()
    }
}

impl Default for ComparisonEngine {
    fn default() -> Self {
        let config = ComparatorConfig::default();
        Self {
            store: ResultStore::new(config.entries.clone()),
            comparator: Box::new(RboScorer::default()),
            queries: QueryRegistry::new(),
            searches: SearchRegistry::new(),
            config,
        }
    }
}

impl ComparisonEngine {
    /// Create an engine scoring with RBO at the configured persistence.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ComparatorError::Config`] if the configuration is invalid.
    pub fn new(config: ComparatorConfig) -> Result<Self> {
        config.validate()?;
        let scorer = RboScorer::new(config.scoring)?;
        Ok(Self {
            store: ResultStore::new(config.entries.clone()),
            comparator: Box::new(scorer),
            queries: QueryRegistry::new(),
            searches: SearchRegistry::new(),
            config,
        })
    }

    /// Replace the scoring policy.
    pub fn with_comparator(mut self, comparator: impl Comparator + 'static) -> Self {
        self.comparator = Box::new(comparator);
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &ComparatorConfig {
        &self.config
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Register a query. Returns `false` if already registered.
    pub fn add_query(&mut self, query: impl Into<Query>) -> bool {
        self.queries.add(query)
    }

    /// Register several queries.
    pub fn add_queries<I, Q>(&mut self, queries: I)
    where
        I: IntoIterator<Item = Q>,
        Q: Into<Query>,
    {
        for query in queries {
            self.queries.add(query);
        }
    }

    /// Deregister a query. Cached results for it are kept.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ComparatorError::UnknownQuery`] if it was never registered.
    pub fn remove_query(&mut self, query: &str) -> Result<()> {
        self.queries.remove(query).map(|_| ())
    }

    /// Registered queries in registration order.
    pub fn queries(&self) -> &[Query] {
        self.queries.as_slice()
    }

    // ── Searches ──────────────────────────────────────────────────────────

    /// Register a search under `name`, replacing any search with that name.
    pub fn add_search(&mut self, name: impl Into<String>, search: impl Search + 'static) -> bool {
        self.searches.add(name, search)
    }

    /// Register a closure as a search.
    pub fn add_search_fn<F>(&mut self, name: impl Into<String>, f: F) -> bool
    where
        F: Fn(&str) -> std::result::Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.searches.add(name, FnSearch::new(f))
    }

    /// Deregister a search. Cached results for it are kept.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ComparatorError::UnknownSearch`] if no search has that name.
    pub fn remove_search(&mut self, name: &str) -> Result<()> {
        self.searches.remove(name)
    }

    /// Registered search names in registration order.
    pub fn search_names(&self) -> Vec<&str> {
        self.searches.names().collect()
    }

    // ── Population ────────────────────────────────────────────────────────

    /// Capture results for every registered query × search pair.
    ///
    /// Only missing cells are filled unless `refresh` is set. Returns the
    /// number of searches invoked.
    ///
    /// # Errors
    ///
    /// Propagates the first search failure; earlier cells stay cached.
    pub fn evaluate(&mut self, refresh: bool) -> Result<usize> {
        let invoked = self
            .store
            .populate(self.queries.as_slice(), &self.searches, refresh)?;
        tracing::info!(
            invoked,
            queries = self.queries.len(),
            searches = self.searches.len(),
            "result store populated"
        );
        Ok(invoked)
    }

    /// The result store.
    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    /// Cached search name → ranked list for `query`; empty if never populated.
    pub fn query_results(&self, query: &str) -> &QueryResults {
        self.store.get(query)
    }

    /// Raw entries for every cached cell: query → search → entries.
    pub fn all_results(&self) -> BTreeMap<String, BTreeMap<String, Value>> {
        self.store
            .iter()
            .map(|(query, results)| {
                let row = results
                    .iter()
                    .map(|(name, list)| (name.clone(), list.to_value()))
                    .collect();
                (query.to_string(), row)
            })
            .collect()
    }

    /// Identifier lists side by side for `query`: search → identifiers.
    pub fn compare_results(&self, query: &str) -> BTreeMap<String, Vec<Identifier>> {
        self.store
            .get(query)
            .iter()
            .map(|(name, list)| (name.clone(), list.to_identifiers()))
            .collect()
    }

    // ── Scoring ───────────────────────────────────────────────────────────

    /// Score every ordered pair of distinct searches cached for `query`.
    ///
    /// Both directions are computed explicitly; self-pairs are absent.
    /// An unpopulated query yields an empty matrix.
    pub fn evaluate_query(&self, query: &str) -> SimilarityMatrix {
        let results = self.store.get(query);
        let identifiers: Vec<(&str, Vec<Identifier>)> = results
            .iter()
            .map(|(name, list)| (name.as_str(), list.to_identifiers()))
            .collect();

        let mut matrix = SimilarityMatrix::new();
        for (a, left) in &identifiers {
            for (b, right) in &identifiers {
                if a == b {
                    continue;
                }
                let score = self.comparator.compare(left, right);
                tracing::debug!(a, b, score = score.score, "scored pair");
                matrix.insert(a, b, score);
            }
        }
        matrix
    }

    /// [`Self::evaluate_query`] for every registered query.
    pub fn evaluate_all(&self) -> BTreeMap<String, SimilarityMatrix> {
        self.queries
            .iter()
            .map(|query| (query.to_string(), self.evaluate_query(query.as_str())))
            .collect()
    }

    /// Scores for `query` rounded to the configured report precision.
    pub fn comparisons(&self, query: &str) -> BTreeMap<String, BTreeMap<String, f64>> {
        self.evaluate_query(query)
            .rounded(self.config.report.precision)
    }

    // ── Persistence ───────────────────────────────────────────────────────

    /// Serialize the whole result store to `path` (`.json` appended if missing).
    ///
    /// Returns the path written.
    pub fn save(&self, path: &Path) -> Result<PathBuf> {
        persist::save(&self.store, path)
    }

    /// Replace the result store with the state persisted at `path`.
    ///
    /// The current store is kept if loading fails.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ComparatorError::MalformedPersistedState`] for
    /// documents of the wrong shape and [`crate::ComparatorError::Io`] if
    /// the file cannot be read.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        self.store = persist::load(path, &self.config.entries)?;
        Ok(())
    }
}
