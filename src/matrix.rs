//! Pairwise similarity matrices.

use std::collections::BTreeMap;

use rank_overlap::SimilarityScore;
use serde::{Deserialize, Serialize};

/// Scores for every ordered pair of distinct searches on one query:
/// `A → B → score(A, B)`.
///
/// Self-pairs are never stored, so a missing `(A, A)` entry means "not
/// compared" rather than "compared and found dissimilar".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimilarityMatrix {
    rows: BTreeMap<String, BTreeMap<String, SimilarityScore>>,
}

impl SimilarityMatrix {
    /// Create an empty matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `score(a, b)`. Self-pairs are ignored.
    pub fn insert(&mut self, a: &str, b: &str, score: SimilarityScore) {
        if a == b {
            return;
        }
        self.rows
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string(), score);
    }

    /// `score(a, b)`, if compared.
    pub fn get(&self, a: &str, b: &str) -> Option<&SimilarityScore> {
        self.rows.get(a).and_then(|row| row.get(b))
    }

    /// All scores with `a` on the left.
    pub fn row(&self, a: &str) -> Option<&BTreeMap<String, SimilarityScore>> {
        self.rows.get(a)
    }

    /// Every `(a, b, score)` triple in sorted order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str, &SimilarityScore)> {
        self.rows.iter().flat_map(|(a, row)| {
            row.iter()
                .map(move |(b, score)| (a.as_str(), b.as_str(), score))
        })
    }

    /// Search names appearing on either side, sorted.
    pub fn search_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .rows
            .iter()
            .flat_map(|(a, row)| std::iter::once(a.as_str()).chain(row.keys().map(String::as_str)))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Combined scores rounded to `precision` decimals.
    pub fn rounded(&self, precision: u32) -> BTreeMap<String, BTreeMap<String, f64>> {
        self.rows
            .iter()
            .map(|(a, row)| {
                let row = row
                    .iter()
                    .map(|(b, score)| (b.clone(), score.rounded(precision)))
                    .collect();
                (a.clone(), row)
            })
            .collect()
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    /// Whether no pairs are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_pairs_are_never_stored() {
        let mut matrix = SimilarityMatrix::new();
        matrix.insert("m1", "m1", SimilarityScore::exact(1.0));
        assert!(matrix.is_empty());
        assert!(matrix.get("m1", "m1").is_none());
    }

    #[test]
    fn both_directions_stored_independently() {
        let mut matrix = SimilarityMatrix::new();
        matrix.insert("m1", "m2", SimilarityScore::exact(0.4));
        matrix.insert("m2", "m1", SimilarityScore::exact(0.6));
        assert_eq!(matrix.len(), 2);
        let ab = matrix.get("m1", "m2").expect("m1→m2");
        let ba = matrix.get("m2", "m1").expect("m2→m1");
        assert!((ab.score - 0.4).abs() < f64::EPSILON);
        assert!((ba.score - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn search_names_are_sorted_and_unique() {
        let mut matrix = SimilarityMatrix::new();
        matrix.insert("zeta", "alpha", SimilarityScore::zero());
        matrix.insert("alpha", "zeta", SimilarityScore::zero());
        matrix.insert("alpha", "mid", SimilarityScore::zero());
        assert_eq!(matrix.search_names(), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn pairs_iterate_in_sorted_order() {
        let mut matrix = SimilarityMatrix::new();
        matrix.insert("b", "a", SimilarityScore::zero());
        matrix.insert("a", "b", SimilarityScore::zero());
        let pairs: Vec<(&str, &str)> = matrix.pairs().map(|(a, b, _)| (a, b)).collect();
        assert_eq!(pairs, vec![("a", "b"), ("b", "a")]);
    }

    #[test]
    fn rounded_view_uses_precision() {
        let mut matrix = SimilarityMatrix::new();
        matrix.insert("a", "b", SimilarityScore::exact(0.987_65));
        let view = matrix.rounded(2);
        assert!((view["a"]["b"] - 0.99).abs() < f64::EPSILON);
    }

    #[test]
    fn serializes_as_nested_mapping() {
        let mut matrix = SimilarityMatrix::new();
        matrix.insert("a", "b", SimilarityScore::new(0.25, 0.5));
        let json = serde_json::to_value(&matrix).expect("serialize");
        assert!((json["a"]["b"]["score"].as_f64().expect("score") - 0.75).abs() < f64::EPSILON);
    }
}
