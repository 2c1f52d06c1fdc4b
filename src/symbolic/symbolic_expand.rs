//! # Symbolic Expression Expansion Module
//!
//! Full algebraic expansion of symbolic expressions: products and integer
//! powers are distributed over sums and like terms are collected. This is the
//! normalization step applied to every candidate equation before it is written
//! to the output table.
//!
//! ## Algorithm
//!
//! 1. **Flattening**: the expression is converted into a sum of terms, where a
//!    term is `coefficient * atom_1^p_1 * ... * atom_n^p_n` and an atom is a
//!    variable, a function call (inner argument expanded), a power with a
//!    non-integer or symbolic exponent, or a sum-denominator kept whole
//! 2. **Distribution**: `Mul` takes the cross product of term lists, `Sub`
//!    negates, `Pow` with a small non-negative integer exponent is repeated
//!    multiplication, division by a single-term denominator folds into
//!    negative powers
//! 3. **Collection**: terms are grouped in a `BTreeMap` keyed by their
//!    rendered factor product, coefficients summed, zero terms dropped
//! 4. **Reconstruction**: positive powers rebuild into the numerator,
//!    negative powers into a trailing division; the `BTreeMap` ordering makes
//!    the output deterministic
//!
//! Expansion is idempotent: `e.expand().expand() == e.expand()`.

use crate::symbolic::symbolic_engine::Expr;
use itertools::Itertools;
use std::collections::BTreeMap;

/// integer exponents above this are not multiplied out
const MAX_EXPANDED_POWER: f64 = 16.0;

/// One summand in expanded form: `coeff * product(atom^power)`.
/// Factors are keyed by their rendered text so that equal atoms merge and
/// iteration order is stable.
#[derive(Clone, Debug)]
struct Term {
    coeff: f64,
    factors: BTreeMap<String, (Expr, f64)>,
}

impl Term {
    fn constant(coeff: f64) -> Term {
        Term {
            coeff,
            factors: BTreeMap::new(),
        }
    }

    fn atom(expr: Expr) -> Term {
        Term::atom_with_power(expr, 1.0)
    }

    fn atom_with_power(expr: Expr, power: f64) -> Term {
        let mut factors = BTreeMap::new();
        factors.insert(expr.to_string(), (expr, power));
        Term { coeff: 1.0, factors }
    }

    fn mul(&self, other: &Term) -> Term {
        let mut factors = self.factors.clone();
        for (key, (atom, power)) in &other.factors {
            match factors.get_mut(key) {
                Some((_, existing)) => {
                    *existing += power;
                }
                None => {
                    factors.insert(key.clone(), (atom.clone(), *power));
                }
            }
        }
        factors.retain(|_, (_, power)| *power != 0.0);
        Term {
            coeff: self.coeff * other.coeff,
            factors,
        }
    }

    /// reciprocal of a single-term denominator: 1/(c * a^p) = (1/c) * a^(-p)
    fn invert(&self) -> Term {
        let factors = self
            .factors
            .iter()
            .map(|(key, (atom, power))| (key.clone(), (atom.clone(), -power)))
            .collect();
        Term {
            coeff: 1.0 / self.coeff,
            factors,
        }
    }

    /// grouping key: the rendered factor product without the coefficient
    fn key(&self) -> String {
        self.factors
            .iter()
            .map(|(key, (_, power))| {
                if *power == 1.0 {
                    key.clone()
                } else {
                    format!("{}^{}", key, power)
                }
            })
            .join("*")
    }

    fn rebuild(&self) -> Expr {
        let mut numerator_factors = Vec::new();
        let mut denominator_factors = Vec::new();
        for (_, (atom, power)) in &self.factors {
            if *power > 0.0 {
                if *power == 1.0 {
                    numerator_factors.push(atom.clone());
                } else {
                    numerator_factors.push(Expr::Pow(
                        Box::new(atom.clone()),
                        Box::new(Expr::Const(*power)),
                    ));
                }
            } else if *power == -1.0 {
                denominator_factors.push(atom.clone());
            } else {
                denominator_factors.push(Expr::Pow(
                    Box::new(atom.clone()),
                    Box::new(Expr::Const(-power)),
                ));
            }
        }

        let numerator = if numerator_factors.is_empty() {
            Expr::Const(self.coeff)
        } else {
            let product = numerator_factors
                .into_iter()
                .reduce(|a, b| Expr::Mul(Box::new(a), Box::new(b)))
                .unwrap();
            if self.coeff == 1.0 {
                product
            } else {
                Expr::Mul(Box::new(Expr::Const(self.coeff)), Box::new(product))
            }
        };

        match denominator_factors
            .into_iter()
            .reduce(|a, b| Expr::Mul(Box::new(a), Box::new(b)))
        {
            Some(denominator) => Expr::Div(Box::new(numerator), Box::new(denominator)),
            None => numerator,
        }
    }
}

impl Expr {
    /// Fully expands the expression: distributes products and integer powers
    /// over sums and collects like terms. The result renders deterministically
    /// (terms and factors in lexicographic order).
    pub fn expand(&self) -> Expr {
        rebuild_sum(collect_terms(as_terms(self)))
    }
}

fn as_terms(expr: &Expr) -> Vec<Term> {
    match expr {
        Expr::Const(c) => vec![Term::constant(*c)],
        Expr::Var(_) => vec![Term::atom(expr.clone())],
        Expr::Add(lhs, rhs) => {
            let mut terms = as_terms(lhs);
            terms.extend(as_terms(rhs));
            terms
        }
        Expr::Sub(lhs, rhs) => {
            let mut terms = as_terms(lhs);
            let minus_one = Term::constant(-1.0);
            terms.extend(as_terms(rhs).iter().map(|t| t.mul(&minus_one)));
            terms
        }
        Expr::Mul(lhs, rhs) => cross_multiply(&as_terms(lhs), &as_terms(rhs)),
        Expr::Div(numerator, denominator) => {
            let numerator_terms = as_terms(numerator);
            let denominator_terms = collect_terms(as_terms(denominator));
            if denominator_terms.len() == 1 {
                let inverse = denominator_terms[0].invert();
                numerator_terms.iter().map(|t| t.mul(&inverse)).collect()
            } else {
                // denominator is a sum: keep it whole with power -1
                let denominator_expr = rebuild_sum(denominator_terms);
                let inverse = Term::atom_with_power(denominator_expr, -1.0);
                numerator_terms.iter().map(|t| t.mul(&inverse)).collect()
            }
        }
        Expr::Pow(base, exponent) => {
            // the exponent itself may only collapse to a literal after its
            // own expansion, e.g. (x + 1)^(1 + 1)
            let exponent = exponent.expand();
            match exponent {
                Expr::Const(n)
                    if n.fract() == 0.0 && n >= 0.0 && n <= MAX_EXPANDED_POWER =>
                {
                    let base_terms = as_terms(base);
                    let mut result = vec![Term::constant(1.0)];
                    for _ in 0..(n as usize) {
                        result = cross_multiply(&result, &base_terms);
                    }
                    result
                }
                Expr::Const(n) => vec![Term::atom_with_power(base.expand(), n)],
                _ => vec![Term::atom(Expr::Pow(
                    Box::new(base.expand()),
                    Box::new(exponent),
                ))],
            }
        }
        Expr::Exp(inner) => vec![Term::atom(Expr::Exp(Box::new(inner.expand())))],
        Expr::Ln(inner) => vec![Term::atom(Expr::Ln(Box::new(inner.expand())))],
        Expr::abs(inner) => vec![Term::atom(Expr::abs(Box::new(inner.expand())))],
        Expr::sqrt(inner) => vec![Term::atom(Expr::sqrt(Box::new(inner.expand())))],
        Expr::sin(inner) => vec![Term::atom(Expr::sin(Box::new(inner.expand())))],
        Expr::cos(inner) => vec![Term::atom(Expr::cos(Box::new(inner.expand())))],
        Expr::tan(inner) => vec![Term::atom(Expr::tan(Box::new(inner.expand())))],
        Expr::atan(inner) => vec![Term::atom(Expr::atan(Box::new(inner.expand())))],
    }
}

fn cross_multiply(lhs: &[Term], rhs: &[Term]) -> Vec<Term> {
    let mut result = Vec::with_capacity(lhs.len() * rhs.len());
    for a in lhs {
        for b in rhs {
            result.push(a.mul(b));
        }
    }
    result
}

/// Groups like terms by their factor key and sums coefficients; terms that
/// cancel out are dropped. The BTreeMap puts the constant term first and
/// orders the rest lexicographically.
fn collect_terms(terms: Vec<Term>) -> Vec<Term> {
    let mut grouped: BTreeMap<String, Term> = BTreeMap::new();
    for term in terms {
        if term.coeff == 0.0 {
            continue;
        }
        let key = term.key();
        let coeff = term.coeff;
        grouped
            .entry(key)
            .and_modify(|acc| acc.coeff += coeff)
            .or_insert(term);
    }
    grouped
        .into_values()
        .filter(|term| term.coeff != 0.0)
        .collect()
}

fn rebuild_sum(terms: Vec<Term>) -> Expr {
    terms
        .into_iter()
        .map(|term| term.rebuild())
        .reduce(|a, b| Expr::Add(Box::new(a), Box::new(b)))
        .unwrap_or(Expr::Const(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_str(input: &str) -> String {
        Expr::parse_expression(input).unwrap().expand().to_string()
    }

    #[test]
    fn test_distributes_product_over_sum() {
        assert_eq!(expand_str("(x_0 + 1) * (x_0 - 1)"), "(-1 + (x_0 ^ 2))");
    }

    #[test]
    fn test_collects_like_terms() {
        assert_eq!(expand_str("x + x + x"), "(3 * x)");
        assert_eq!(expand_str("2*x + 3*x - 5*x"), "0");
    }

    #[test]
    fn test_binomial_square() {
        assert_eq!(expand_str("(x_0 + 1)^2"), "((1 + (2 * x_0)) + (x_0 ^ 2))");
    }

    #[test]
    fn test_double_star_power() {
        assert_eq!(expand_str("(x_0 + 1) ** 2"), "((1 + (2 * x_0)) + (x_0 ^ 2))");
    }

    #[test]
    fn test_division_by_constant_distributes() {
        assert_eq!(expand_str("(x + 1) / 2"), "(0.5 + (0.5 * x))");
    }

    #[test]
    fn test_division_by_variable() {
        assert_eq!(expand_str("1/x_0"), "(1 / x_0)");
    }

    #[test]
    fn test_division_by_sum_stays_whole() {
        assert_eq!(expand_str("x / (x + 1)"), "(x / (1 + x))");
    }

    #[test]
    fn test_functions_stay_atomic() {
        assert_eq!(expand_str("sin(x) * sin(x)"), "(sin(x) ^ 2)");
        assert_eq!(expand_str("2*sin(x) + sin(x)"), "(3 * sin(x))");
    }

    #[test]
    fn test_function_arguments_are_expanded() {
        assert_eq!(expand_str("sin((x + 1) * x)"), "sin((x + (x ^ 2)))");
    }

    #[test]
    fn test_cancellation_yields_zero() {
        assert_eq!(expand_str("(x + 1) - (x + 1)"), "0");
    }

    #[test]
    fn test_expand_is_idempotent() {
        for input in [
            "(x_0 + 1) * (x_1 - 2)",
            "sin(x_0) * (x_0 + 1)",
            "(x_0 + x_1)^3",
            "x_0 / (x_0 + 1)",
            "1/x_0 + x_0",
        ] {
            let once = Expr::parse_expression(input).unwrap().expand();
            assert_eq!(once.expand(), once, "not idempotent for {}", input);
        }
    }

    #[test]
    fn test_symbolic_exponent_stays_atomic() {
        assert_eq!(expand_str("x ^ y"), "(x ^ y)");
    }

    #[test]
    fn test_exponent_collapsing_to_integer_is_multiplied_out() {
        // the exponent is only a literal after its own expansion
        assert_eq!(expand_str("(x + 1)^(1 + 1)"), "((1 + (2 * x)) + (x ^ 2))");
        assert_eq!(expand_str("x^(3 - 1)"), "(x ^ 2)");
        let once = Expr::parse_expression("(x + 1)^(1 + 1)").unwrap().expand();
        assert_eq!(once.expand(), once);
    }
}
