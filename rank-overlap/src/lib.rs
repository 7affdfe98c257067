//! # rank-overlap
//!
//! Ranked result lists and rank-similarity scoring for comparing the output
//! of different search functions on the same query.
//!
//! ## Design
//!
//! - [`RankedList`] wraps a search's raw output once, tags every entry as a
//!   bare identifier or a structured record, and exposes 1-indexed access
//! - [`rank_biased_overlap`] scores two identifier sequences with
//!   extrapolated RBO, tolerant of uneven lengths and disjoint universes
//! - [`Comparator`] makes the scoring policy pluggable; RBO is the default
//!
//! Everything here is pure and immutable after construction.
//!
//! # Examples
//!
//! ```
//! use rank_overlap::{RankedList, RboScorer};
//!
//! let a = RankedList::from_identifiers(["a", "b", "c"]);
//! let b = RankedList::from_identifiers(["b", "a", "c"]);
//! let score = RboScorer::default().score(&a.to_identifiers(), &b.to_identifiers());
//! assert!(score.score > 0.5 && score.score < 1.0);
//! ```

pub mod comparator;
pub mod config;
pub mod error;
pub mod ranked_list;
pub mod rbo;
pub mod types;

pub use comparator::Comparator;
pub use config::{ListFormat, RboConfig};
pub use error::{RankError, Result};
pub use ranked_list::RankedList;
pub use rbo::{rank_biased_overlap, RboScorer};
pub use types::{Entry, EntryShape, Identifier, SimilarityScore};
