//! # Consistency Filter Module
//!
//! The candidate list coming out of the model is ranked; the top two entries
//! are taken as the reference. A candidate survives only when every unary
//! operator it uses also appears in the reference vocabulary, so lower-ranked
//! guesses that wander into a different function family are discarded before
//! the output table is built.

use crate::pipeline::operators::{PredictedFunction, UnaryOp, extract_unary_operators};
use log::info;
use std::collections::BTreeSet;

/// Lazy, order-preserving view over the candidates that pass the consistency
/// check. Single pass; call [`filter_expressions`] again to restart.
pub struct ConsistentCandidates<'a> {
    candidates: std::slice::Iter<'a, PredictedFunction>,
    reference_ops: BTreeSet<UnaryOp>,
}

impl<'a> ConsistentCandidates<'a> {
    /// The unary operator vocabulary of the top-2 candidates the filter
    /// compares against.
    pub fn reference_ops(&self) -> &BTreeSet<UnaryOp> {
        &self.reference_ops
    }
}

impl<'a> Iterator for ConsistentCandidates<'a> {
    type Item = &'a PredictedFunction;

    fn next(&mut self) -> Option<Self::Item> {
        for candidate in self.candidates.by_ref() {
            let candidate_ops = extract_unary_operators(std::slice::from_ref(candidate));
            if candidate_ops.is_subset(&self.reference_ops) {
                return Some(candidate);
            }
        }
        None
    }
}

/// Filters `candidates` down to those whose unary operator vocabulary is a
/// subset of the vocabulary of the first two (best) candidates.
///
/// The reference degrades gracefully: a one-element list is compared against
/// itself, an empty list yields an empty reference and an empty result.
/// Candidates using no recognized operators always pass. Original relative
/// order is preserved and nothing is copied.
pub fn filter_expressions(candidates: &[PredictedFunction]) -> ConsistentCandidates<'_> {
    let top = &candidates[..candidates.len().min(2)];
    let reference_ops = extract_unary_operators(top);
    info!(
        "filtering {} candidates against reference operators {:?}",
        candidates.len(),
        reference_ops
    );
    ConsistentCandidates {
        candidates: candidates.iter(),
        reference_ops,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(texts: &[&str]) -> Vec<PredictedFunction> {
        texts.iter().map(|t| PredictedFunction::new(*t)).collect()
    }

    #[test]
    fn test_drops_candidate_with_foreign_operator() {
        let candidates = batch(&["sin(x_0)", "x_0 add 1", "tan(x_0) mul sin(x_0)"]);
        let survivors: Vec<_> = filter_expressions(&candidates).collect();
        assert_eq!(survivors.len(), 2);
        assert_eq!(survivors[0].infix(), "sin(x_0)");
        assert_eq!(survivors[1].infix(), "x_0 add 1");
    }

    #[test]
    fn test_reference_ops_from_top_two() {
        let candidates = batch(&["sin(x_0)", "x_0 add 1", "tan(x_0) mul sin(x_0)"]);
        let filtered = filter_expressions(&candidates);
        assert_eq!(filtered.reference_ops(), &BTreeSet::from([UnaryOp::Sin]));
    }

    #[test]
    fn test_operator_free_candidate_passes() {
        let candidates = batch(&["exp(x_0)", "x_0 add x_1", "x_0 mul x_1"]);
        let survivors: Vec<_> = filter_expressions(&candidates).collect();
        assert_eq!(survivors.len(), 3);
    }

    #[test]
    fn test_preserves_order() {
        let candidates = batch(&[
            "sin(x_0) add cos(x_0)",
            "cos(x_1)",
            "tan(x_0)",
            "sin(x_1) mul 2",
            "x_0",
        ]);
        let survivors: Vec<_> = filter_expressions(&candidates)
            .map(|c| c.infix().to_string())
            .collect();
        assert_eq!(
            survivors,
            vec!["sin(x_0) add cos(x_0)", "cos(x_1)", "sin(x_1) mul 2", "x_0"]
        );
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let candidates = batch(&["sin(x_0)", "x_0 add 1", "tan(x_0)", "sin(x_0) mul x_1"]);
        let once: Vec<PredictedFunction> =
            filter_expressions(&candidates).cloned().collect();
        let twice: Vec<PredictedFunction> = filter_expressions(&once).cloned().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_single_candidate_survives() {
        let candidates = batch(&["sqrt(x_0)"]);
        let survivors: Vec<_> = filter_expressions(&candidates).collect();
        assert_eq!(survivors.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        let candidates: Vec<PredictedFunction> = Vec::new();
        assert_eq!(filter_expressions(&candidates).count(), 0);
    }
}
