//! # Operator Vocabulary Module
//!
//! The pretrained model draws from a fixed, closed operator vocabulary. This
//! module defines that vocabulary as enums and extracts the inventory of
//! operators actually used by a batch of predicted expressions.
//!
//! Detection is plain substring membership over the joined infix texts of the
//! batch. This is deliberately coarse: a token like `sin` also matches inside
//! an unrelated identifier. The behavior is kept for compatibility with the
//! established outputs and is pinned by a test in `pipeline_tests`.

use itertools::Itertools;
use std::collections::BTreeSet;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// A candidate expression predicted by the pretrained model, held as its
/// tokenized infix text (`add`, `mul`, `sub`, `pow`, `inv` plus function
/// calls). Produced upstream by model inference; read-only here.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictedFunction {
    infix: String,
}

impl PredictedFunction {
    pub fn new(infix: impl Into<String>) -> Self {
        PredictedFunction {
            infix: infix.into(),
        }
    }

    /// The tokenized infix text of the expression.
    pub fn infix(&self) -> &str {
        &self.infix
    }
}

/// Unary operators the model can emit. The `Display` form (lowercase variant
/// name) is the canonical output-facing name: `**2` reports as `square`,
/// `arctan` as `atan`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum UnaryOp {
    Abs,
    Square,
    Cube,
    Sqrt,
    Sin,
    Cos,
    Tan,
    Atan,
    Log,
    Exp,
}

impl UnaryOp {
    /// The substring this operator appears as in the model's infix text.
    pub fn token(&self) -> &'static str {
        match self {
            UnaryOp::Abs => "abs",
            UnaryOp::Square => "**2",
            UnaryOp::Cube => "**3",
            UnaryOp::Sqrt => "sqrt",
            UnaryOp::Sin => "sin",
            UnaryOp::Cos => "cos",
            UnaryOp::Tan => "tan",
            UnaryOp::Atan => "arctan",
            UnaryOp::Log => "log",
            UnaryOp::Exp => "exp",
        }
    }
}

/// Binary operators the model can emit; `Display` gives the canonical symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
pub enum BinaryOp {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
    #[strum(serialize = "/")]
    Inv,
}

impl BinaryOp {
    /// The substring this operator appears as in the model's infix text.
    pub fn token(&self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "sub",
            BinaryOp::Mul => "mul",
            BinaryOp::Inv => "inv",
        }
    }
}

/// Returns the set of unary operators present in any of the predicted
/// expressions. Order-independent; an empty batch yields an empty set.
/// Unrecognized tokens are ignored, never an error.
pub fn extract_unary_operators(predicted_functions: &[PredictedFunction]) -> BTreeSet<UnaryOp> {
    let joined = predicted_functions.iter().map(|f| f.infix()).join(" ");
    UnaryOp::iter()
        .filter(|op| joined.contains(op.token()))
        .collect()
}

/// Returns the set of binary operators present in any of the predicted
/// expressions. Same matching semantics as `extract_unary_operators`.
pub fn extract_binary_operators(predicted_functions: &[PredictedFunction]) -> BTreeSet<BinaryOp> {
    let joined = predicted_functions.iter().map(|f| f.infix()).join(" ");
    BinaryOp::iter()
        .filter(|op| joined.contains(op.token()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_names() {
        assert_eq!(UnaryOp::Square.to_string(), "square");
        assert_eq!(UnaryOp::Cube.to_string(), "cube");
        assert_eq!(UnaryOp::Atan.to_string(), "atan");
        assert_eq!(UnaryOp::Abs.to_string(), "abs");
        assert_eq!(BinaryOp::Add.to_string(), "+");
        assert_eq!(BinaryOp::Inv.to_string(), "/");
    }

    #[test]
    fn test_extract_unary_operators() {
        let batch = vec![
            PredictedFunction::new("sin(x_0) add sqrt(x_1)"),
            PredictedFunction::new("x_0 pow 2"),
        ];
        let ops = extract_unary_operators(&batch);
        assert_eq!(
            ops,
            BTreeSet::from([UnaryOp::Sqrt, UnaryOp::Sin])
        );
    }

    #[test]
    fn test_extract_square_token() {
        // squares only count once the pow rewrite has produced "**2"
        let batch = vec![PredictedFunction::new("x_0**2 add x_1")];
        let ops = extract_unary_operators(&batch);
        assert_eq!(ops, BTreeSet::from([UnaryOp::Square]));
    }

    #[test]
    fn test_extract_empty_batch() {
        assert!(extract_unary_operators(&[]).is_empty());
        assert!(extract_binary_operators(&[]).is_empty());
    }

    #[test]
    fn test_extract_is_order_independent() {
        let a = PredictedFunction::new("sin(x_0)");
        let b = PredictedFunction::new("exp(x_1) mul x_0");
        let forward = extract_unary_operators(&[a.clone(), b.clone()]);
        let backward = extract_unary_operators(&[b, a]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_extract_binary_operators() {
        let batch = vec![PredictedFunction::new("x_0 add inv(x_1)")];
        let ops = extract_binary_operators(&batch);
        assert_eq!(ops, BTreeSet::from([BinaryOp::Add, BinaryOp::Inv]));
    }
}
