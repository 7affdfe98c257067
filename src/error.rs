//! Error types for the comparison engine.

use rank_overlap::RankError;

/// Boxed error returned by a failing search callable.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for query registration, population, scoring and persistence.
#[derive(Debug, thiserror::Error)]
pub enum ComparatorError {
    /// A search name was removed or looked up without being registered.
    #[error("unknown search: {0}")]
    UnknownSearch(String),

    /// A query was removed or looked up without being registered.
    #[error("unknown query: {0}")]
    UnknownQuery(String),

    /// A registered search callable failed while populating the result store.
    #[error("search `{search}` failed for query `{query}`: {source}")]
    SearchInvocation {
        /// Name of the failing search.
        search: String,
        /// Query it was invoked with.
        query: String,
        /// Error returned by the callable.
        #[source]
        source: BoxError,
    },

    /// A persisted state document does not have the query → search → entries shape.
    #[error("malformed persisted state: {0}")]
    MalformedPersistedState(String),

    /// Ranked list construction or access failed.
    #[error(transparent)]
    Rank(#[from] RankError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// The result store could not be serialized for saving.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ComparatorError>;
