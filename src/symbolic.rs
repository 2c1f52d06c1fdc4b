#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// a module turns a String expression into a symbolic expression
///
///# Example
/// ```
/// use SymRegPost::symbolic::symbolic_engine::Expr;
/// let input = "(x_0 + 1) * sin(x_0)";
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// println!("parsed_expression {}", parsed_expression);
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// the core symbolic expression type of the crate:
/// 1) turns a String expression into a symbolic expression
/// 2) turns a symbolic expression back into a string for printing and CSV output
///# Example#
/// ```
/// use SymRegPost::symbolic::symbolic_engine::Expr;
/// let input = "x_0^2 + log(x_1)";
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// println!("parsed_expression {}", parsed_expression);
/// ```
pub mod symbolic_engine;
///________________________________________________________________________________________________________________________________________________
/// full algebraic expansion: distribute products and integer powers over
/// sums and collect like terms
///# Example#
/// ```
/// use SymRegPost::symbolic::symbolic_engine::Expr;
/// let e = Expr::parse_expression("(x_0 + 1) * (x_0 - 1)").unwrap();
/// assert_eq!(format!("{}", e.expand()), "(-1 + (x_0 ^ 2))");
/// ```
pub mod symbolic_expand;
