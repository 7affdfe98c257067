//! Search comparator: capture ranked results from competing search functions
//! and measure how similarly they rank the same queries.
//!
//! # Architecture
//!
//! ```text
//! QueryRegistry ─┐
//!                ├─▶ ResultStore::populate ─▶ RankedList ─▶ Comparator (RBO) ─▶ SimilarityMatrix
//! SearchRegistry ┘            │
//!                             └─▶ persist (JSON save / load)
//! ```
//!
//! - **Searches** are black-box callables from query text to a ranked list
//! - **ResultStore** memoizes one ranked list per (query, search) cell and
//!   only re-invokes a search on explicit refresh
//! - **ComparisonEngine** scores every ordered pair of distinct searches per
//!   query with a pluggable [`rank_overlap::Comparator`], RBO by default
//!
//! Execution is synchronous and single-threaded: searches run one at a time
//! in registration order.
//!
//! # Examples
//!
//! ```
//! use search_comparator::ComparisonEngine;
//! use serde_json::json;
//!
//! let mut engine = ComparisonEngine::default();
//! engine.add_query("cats");
//! engine.add_search_fn("m1", |_q: &str| Ok(json!(["a", "b", "c"])));
//! engine.add_search_fn("m2", |_q: &str| Ok(json!(["b", "a", "c"])));
//! engine.evaluate(false)?;
//!
//! let matrix = engine.evaluate_query("cats");
//! let score = matrix.get("m1", "m2").map(|s| s.score).unwrap_or_default();
//! assert!(score > 0.5 && score < 1.0);
//! # Ok::<(), search_comparator::ComparatorError>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod matrix;
pub mod persist;
pub mod query;
pub mod report;
pub mod search;
pub mod store;

pub use config::ComparatorConfig;
pub use engine::ComparisonEngine;
pub use error::{BoxError, ComparatorError, Result};
pub use matrix::SimilarityMatrix;
pub use query::{Query, QueryRegistry};
pub use search::{FnSearch, Search, SearchRegistry};
pub use store::ResultStore;

pub use rank_overlap::{
    Comparator, Entry, Identifier, ListFormat, RankedList, RboConfig, RboScorer, SimilarityScore,
};
