//! Rank-biased overlap (RBO) for open-ended ranked lists.
//!
//! RBO compares two rankings by the overlap of their prefixes at every
//! depth, weighting depth `d` by `(1 - p) * p^(d - 1)`. Lists may differ in
//! length and need not draw from the same universe of items.
//!
//! Finite lists can never accumulate the full weight, so the score is the
//! observed weighted overlap plus an extrapolated tail which assumes the
//! agreement seen at the end of the lists continues indefinitely.
//!
//! # Formula
//!
//! With `S` the shorter list (length `s`), `L` the longer (length `l`) and
//! `X_d` the number of distinct items shared by the depth-`d` prefixes
//! (items of `S` beyond `s` are unknown and contribute nothing):
//!
//! ```text
//! base  = (1-p)/p * Σ_{d=1..l} (X_d / d) p^d
//! tail  = (1-p)/p * Σ_{d=s+1..l} X_s (d - s) / (s d) p^d
//!       + ((X_l - X_s) / l + X_s / s) p^l
//! score = base + tail
//! ```
//!
//! See Webber, Moffat & Zobel, "A Similarity Measure for Indefinite
//! Rankings", TOIS 2010, equation 32.

use std::collections::HashSet;
use std::hash::Hash;

use crate::config::RboConfig;
use crate::error::RankError;
use crate::types::{Identifier, SimilarityScore};

#[inline]
#[allow(clippy::cast_precision_loss)]
fn usize_to_f64(value: usize) -> f64 {
    value as f64
}

/// Extrapolated rank-biased overlap of two ranked sequences.
///
/// Empty input on either side yields a zero score. Identical sequences
/// score 1.0 up to floating-point rounding; disjoint sequences score 0.0.
/// Repeated items within one list keep only their first (highest) rank.
///
/// # Errors
///
/// Returns [`RankError::Config`] unless `persistence` lies in `(0, 1)`.
pub fn rank_biased_overlap<T: Eq + Hash>(
    left: &[T],
    right: &[T],
    persistence: f64,
) -> Result<SimilarityScore, RankError> {
    RboConfig { persistence }.validate()?;
    Ok(extrapolated_rbo(left, right, persistence))
}

/// Keep the first occurrence of every item, preserving rank order.
fn first_occurrences<T: Eq + Hash>(items: &[T]) -> Vec<&T> {
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().filter(|item| seen.insert(*item)).collect()
}

/// RBO over already-validated persistence.
fn extrapolated_rbo<T: Eq + Hash>(left: &[T], right: &[T], p: f64) -> SimilarityScore {
    let left = first_occurrences(left);
    let right = first_occurrences(right);
    if left.is_empty() || right.is_empty() {
        return SimilarityScore::zero();
    }

    let (short, long) = if left.len() <= right.len() {
        (left, right)
    } else {
        (right, left)
    };
    let s = short.len();
    let l = long.len();

    let mut seen_short: HashSet<&T> = HashSet::with_capacity(s);
    let mut seen_long: HashSet<&T> = HashSet::with_capacity(l);
    let mut overlap = 0usize;
    let mut overlap_at_s = 0usize;

    let mut observed = 0.0;
    let mut projected = 0.0;
    let mut weight = 1.0;

    for d in 1..=l {
        weight *= p;

        if d <= s {
            let item = short[d - 1];
            seen_short.insert(item);
            if seen_long.contains(item) {
                overlap += 1;
            }
        }
        let item = long[d - 1];
        seen_long.insert(item);
        if seen_short.contains(item) {
            overlap += 1;
        }

        if d == s {
            overlap_at_s = overlap;
        }

        let depth = usize_to_f64(d);
        observed += usize_to_f64(overlap) / depth * weight;
        if d > s {
            let sf = usize_to_f64(s);
            projected += usize_to_f64(overlap_at_s) * (depth - sf) / (sf * depth) * weight;
        }
    }

    let scale = (1.0 - p) / p;
    let x_s = usize_to_f64(overlap_at_s);
    let x_l = usize_to_f64(overlap);
    let tail_weight = ((x_l - x_s) / usize_to_f64(l) + x_s / usize_to_f64(s)) * weight;

    SimilarityScore::new(scale * observed, scale * projected + tail_weight)
}

/// Validated RBO scorer over result identifiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RboScorer {
    config: RboConfig,
}

impl Default for RboScorer {
    fn default() -> Self {
        Self {
            config: RboConfig::default(),
        }
    }
}

impl RboScorer {
    /// Create a scorer, validating the persistence parameter.
    pub fn new(config: RboConfig) -> Result<Self, RankError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Persistence parameter in use.
    pub fn persistence(&self) -> f64 {
        self.config.persistence
    }

    /// Score two identifier sequences.
    pub fn score(&self, left: &[Identifier], right: &[Identifier]) -> SimilarityScore {
        extrapolated_rbo(left, right, self.config.persistence)
    }
}
