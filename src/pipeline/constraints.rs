//! # Constraint Selection Module
//!
//! The regression-search configuration carries per-operator constraint maps
//! (flat `operator -> value` and nested `operator -> {operator -> value}`).
//! Before a search is configured for a restricted operator list, both maps are
//! subset to the operators actually in play. Pure data transformation,
//! independent of the rest of the pipeline.

use std::collections::{HashMap, HashSet};

/// Returns the sub-map of `constraints` restricted to keys present in
/// `ops_list`. Absent keys are simply excluded; no error paths.
pub fn select_constraints<V: Clone>(
    constraints: &HashMap<String, V>,
    ops_list: &HashSet<String>,
) -> HashMap<String, V> {
    constraints
        .iter()
        .filter(|(op, _)| ops_list.contains(*op))
        .map(|(op, value)| (op.clone(), value.clone()))
        .collect()
}

/// Restricts a nested constraint map to `ops_list` on both levels. An operator
/// absent from `ops_list` is dropped from the top level entirely, even when
/// some of its sub-operator entries would match on their own.
pub fn select_nested_constraints<V: Clone>(
    nested_constraints: &HashMap<String, HashMap<String, V>>,
    ops_list: &HashSet<String>,
) -> HashMap<String, HashMap<String, V>> {
    nested_constraints
        .iter()
        .filter(|(op, _)| ops_list.contains(*op))
        .map(|(op, inner)| (op.clone(), select_constraints(inner, ops_list)))
        .collect()
}
