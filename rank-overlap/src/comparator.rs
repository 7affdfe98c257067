//! Trait definition for pluggable two-list comparison strategies.
//!
//! [`RboScorer`] is the default implementation. Any
//! `Fn(&[Identifier], &[Identifier]) -> SimilarityScore` closure can be
//! used in its place.

use crate::rbo::RboScorer;
use crate::types::{Identifier, SimilarityScore};

/// A strategy for scoring the similarity of two ranked identifier lists.
///
/// Implementations must not mutate their inputs and must be `Send + Sync`
/// so a comparator can be shared between engine instances.
pub trait Comparator: Send + Sync {
    /// Score `left` against `right`.
    fn compare(&self, left: &[Identifier], right: &[Identifier]) -> SimilarityScore;

    /// Short name used in logs.
    fn name(&self) -> &str {
        "custom"
    }
}

impl Comparator for RboScorer {
    fn compare(&self, left: &[Identifier], right: &[Identifier]) -> SimilarityScore {
        self.score(left, right)
    }

    fn name(&self) -> &str {
        "rbo"
    }
}

impl<F> Comparator for F
where
    F: Fn(&[Identifier], &[Identifier]) -> SimilarityScore + Send + Sync,
{
    fn compare(&self, left: &[Identifier], right: &[Identifier]) -> SimilarityScore {
        self(left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[&str]) -> Vec<Identifier> {
        items.iter().map(|s| Identifier::from(*s)).collect()
    }

    #[test]
    fn rbo_scorer_is_a_comparator() {
        let comparator: Box<dyn Comparator> = Box::new(RboScorer::default());
        let a = ids(&["a", "b"]);
        let score = comparator.compare(&a, &a);
        assert!((score.score - 1.0).abs() < 1e-9);
        assert_eq!(comparator.name(), "rbo");
    }

    #[test]
    fn closure_is_a_comparator() {
        let same_top = |l: &[Identifier], r: &[Identifier]| {
            SimilarityScore::exact(if l.first() == r.first() { 1.0 } else { 0.0 })
        };
        let comparator: Box<dyn Comparator> = Box::new(same_top);
        let score = comparator.compare(&ids(&["a", "b"]), &ids(&["a", "c"]));
        assert!((score.score - 1.0).abs() < f64::EPSILON);
        assert_eq!(comparator.name(), "custom");
    }

    #[test]
    fn comparator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn Comparator>();
    }
}
