//! # Symbolic Engine Module
//!
//! The core symbolic expression type of the crate. Candidate equations coming out of
//! the regression model are rewritten to plain algebraic text, parsed into `Expr`
//! trees, expanded and rendered back to strings for the output table.
//!
//! ## Main Structures and Methods
//!
//! ### `Expr` Enum
//! The core symbolic expression type supporting:
//! - **Variables**: `Var(String)` - symbolic variables like "x_0", "x_1"
//! - **Constants**: `Const(f64)` - numerical constants
//! - **Operations**: `Add`, `Sub`, `Mul`, `Div`, `Pow` - basic arithmetic
//! - **Functions**: `Exp`, `Ln`, `abs`, `sqrt`, `sin`, `cos`, `tan`, `atan` -
//!   exactly the unary function vocabulary the pretrained model emits
//!
//! ### Key Methods
//! - `parse_expression(input)` - parse a string into a symbolic expression
//! - `expand()` - full algebraic expansion (see `symbolic_expand`)
//! - `Symbols(symbols: &str)` - create multiple variables from a comma-separated string
//!
//! The `Display` implementation prints a fully parenthesized form that
//! `parse_expression` accepts back, so every emitted equation string is
//! re-expandable.

#![allow(non_camel_case_types)]

use std::fmt;

/// Core symbolic expression enum representing mathematical expressions as an
/// abstract syntax tree. Uses Box<Expr> for recursive structures, allowing
/// arbitrarily deep expression trees.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Symbolic variable with a name (e.g., "x_0", "x_1")
    Var(String),
    /// Numerical constant value
    Const(f64),
    /// Addition operation: left + right
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction operation: left - right
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication operation: left * right
    Mul(Box<Expr>, Box<Expr>),
    /// Division operation: left / right
    Div(Box<Expr>, Box<Expr>),
    /// Power operation: base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
    /// Exponential function: e^x
    Exp(Box<Expr>),
    /// Natural logarithm, printed as log(x) to match the model vocabulary
    Ln(Box<Expr>),
    /// Absolute value: abs(x)
    abs(Box<Expr>),
    /// Square root: sqrt(x)
    sqrt(Box<Expr>),
    /// Sine function: sin(x)
    sin(Box<Expr>),
    /// Cosine function: cos(x)
    cos(Box<Expr>),
    /// Tangent function: tan(x)
    tan(Box<Expr>),
    /// Arctangent function: atan(x)
    atan(Box<Expr>),
}

/// Display implementation for pretty printing symbolic expressions.
///
/// Converts expressions to mathematical notation with parentheses for proper
/// precedence. The output is accepted by `Expr::parse_expression`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Add(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Expr::Sub(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Expr::Mul(lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Expr::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Expr::Pow(base, exp) => write!(f, "({} ^ {})", base, exp),
            Expr::Exp(expr) => write!(f, "exp({})", expr),
            Expr::Ln(expr) => write!(f, "log({})", expr),
            Expr::abs(expr) => write!(f, "abs({})", expr),
            Expr::sqrt(expr) => write!(f, "sqrt({})", expr),
            Expr::sin(expr) => write!(f, "sin({})", expr),
            Expr::cos(expr) => write!(f, "cos({})", expr),
            Expr::tan(expr) => write!(f, "tan({})", expr),
            Expr::atan(expr) => write!(f, "atan({})", expr),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(self))
    }
}

impl Expr {
    /// Creates multiple symbolic variables from a comma-separated string.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let vars = Expr::Symbols("x_0, x_1, x_2");
    /// assert_eq!(vars.len(), 3);
    /// ```
    pub fn Symbols(symbols: &str) -> Vec<Expr> {
        symbols
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| Expr::Var(s.to_string()))
            .collect()
    }

    /// Convenience method to wrap expression in Box for recursive structures.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Creates power expression self^rhs.
    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    /// Creates exponential function e^(self).
    pub fn exp(self) -> Expr {
        Expr::Exp(self.boxed())
    }

    /// Creates natural logarithm log(self).
    pub fn ln(self) -> Expr {
        Expr::Ln(self.boxed())
    }

    /// Checks if expression is exactly zero (constant 0.0).
    pub fn is_zero(&self) -> bool {
        match self {
            Expr::Const(val) => val == &0.0,
            _ => false,
        }
    }

    /// check if the expression contains a variable
    pub fn contains_variable(&self, var_name: &str) -> bool {
        match self {
            Expr::Var(name) => name == var_name,
            Expr::Const(_) => false,
            Expr::Add(left, right)
            | Expr::Sub(left, right)
            | Expr::Mul(left, right)
            | Expr::Div(left, right)
            | Expr::Pow(left, right) => {
                left.contains_variable(var_name) || right.contains_variable(var_name)
            }
            Expr::Exp(expr)
            | Expr::Ln(expr)
            | Expr::abs(expr)
            | Expr::sqrt(expr)
            | Expr::sin(expr)
            | Expr::cos(expr)
            | Expr::tan(expr)
            | Expr::atan(expr) => expr.contains_variable(var_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_reparseable() {
        let expr = Expr::sin(Expr::Var("x_0".to_string()).boxed())
            + Expr::Var("x_1".to_string()).pow(Expr::Const(2.0));
        let printed = format!("{}", expr);
        assert_eq!(printed, "(sin(x_0) + (x_1 ^ 2))");
        let reparsed = Expr::parse_expression(&printed).unwrap();
        assert_eq!(reparsed, expr);
    }

    #[test]
    fn test_symbols() {
        let vars = Expr::Symbols("x_0, x_1, x_2");
        assert_eq!(vars.len(), 3);
        assert_eq!(vars[0], Expr::Var("x_0".to_string()));
    }

    #[test]
    fn test_ops_overloads() {
        let x = Expr::Var("x".to_string());
        let y = Expr::Var("y".to_string());
        let expr = x.clone() * y.clone() - x / y;
        assert_eq!(format!("{}", expr), "((x * y) - (x / y))");
    }

    #[test]
    fn test_negation() {
        let x = Expr::Var("x".to_string());
        assert_eq!(-x.clone(), Expr::parse_expression("-x").unwrap());
        assert_eq!(format!("{}", -x), "(-1 * x)");
    }

    #[test]
    fn test_function_builders() {
        let x = Expr::Var("x".to_string());
        assert_eq!(format!("{}", x.clone().exp()), "exp(x)");
        assert_eq!(format!("{}", x.clone().ln()), "log(x)");
        assert_eq!(x.clone().exp().ln(), Expr::parse_expression("log(exp(x))").unwrap());
    }

    #[test]
    fn test_is_zero() {
        assert!(Expr::Const(0.0).is_zero());
        assert!(!Expr::Const(1.0).is_zero());
        assert!(!Expr::Var("x".to_string()).is_zero());
        assert!(Expr::parse_expression("x - x").unwrap().expand().is_zero());
    }

    #[test]
    fn test_contains_variable() {
        let expr = Expr::parse_expression("sin(x_0) + x_1").unwrap();
        assert!(expr.contains_variable("x_0"));
        assert!(expr.contains_variable("x_1"));
        assert!(!expr.contains_variable("x_2"));
    }
}
