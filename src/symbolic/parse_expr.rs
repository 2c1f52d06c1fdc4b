//! a module turns a String expression into a symbolic expression
//!
//! The rewritten candidate equations are plain algebraic text like
//! `(x_0 + 1) * sin(x_1)` or `x_0 ** 2`. Parsing proceeds by recursive
//! splitting on the rightmost additive operator outside brackets, then the
//! rightmost multiplicative operator, then the leftmost power operator,
//! then function calls, constants and variables.
//!
//! ```text
//!                 search recursion diagram
//!               "x_1^2 + exp(x_0) * x_1"           |
//!               |       left   | right             |
//!               |__________________________________|
//!               |           split by +             |
//!               |__________________________________|
//!               |      x_1^2   | exp(x_0) * x_1    |
//!               |        |     |        |          |
//!               |  split by ^  |   split by *      |
//!               |__________________________________|
//!               |  x_1 | 2     | exp(x_0) | x_1    |
//!                 etc...
//! ```

use crate::symbolic::symbolic_engine::Expr;
use log::debug;

/// unary function calls recognized by the parser; both the model aliases
/// (`arctan`, `ln`) and the engine's own output names are accepted
const FUNCTION_PREFIXES: [(&str, fn(Box<Expr>) -> Expr); 10] = [
    ("exp", Expr::Exp),
    ("log", Expr::Ln),
    ("ln", Expr::Ln),
    ("abs", Expr::abs),
    ("sqrt", Expr::sqrt),
    ("sin", Expr::sin),
    ("cos", Expr::cos),
    ("tan", Expr::tan),
    ("arctan", Expr::atan),
    ("atan", Expr::atan),
];

impl Expr {
    /// Parses a string into a symbolic expression.
    ///
    /// `**` is accepted as a synonym for `^` (the token-rewrite table turns
    /// `pow` into `**`). Variable names may contain letters, digits and `_`.
    pub fn parse_expression(input: &str) -> Result<Expr, String> {
        debug!("parsing expression: {}", input);
        let normalized = input.replace("**", "^");
        parse_node(normalized.trim())
    }
}

/// position of the bracket closing the one at `open_pos`
fn find_matching_bracket(input: &str, open_pos: usize) -> Option<usize> {
    let mut stack = 0;
    for (i, c) in input.char_indices().skip(open_pos) {
        match c {
            '(' => stack += 1,
            ')' => {
                stack -= 1;
                if stack == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// a '+' or '-' at this position is a sign, not a binary operator, when it
/// sits at the start of the input, right after another operator or an opening
/// bracket, or inside a float exponent like "1e-5"
fn is_sign_position(bytes: &[u8], pos: usize) -> bool {
    let mut i = pos;
    loop {
        if i == 0 {
            return true;
        }
        i -= 1;
        if !bytes[i].is_ascii_whitespace() {
            break;
        }
    }
    let prev = bytes[i];
    if matches!(prev, b'+' | b'-' | b'*' | b'/' | b'^' | b'(') {
        return true;
    }
    if (prev == b'e' || prev == b'E') && i > 0 && (bytes[i - 1].is_ascii_digit() || bytes[i - 1] == b'.')
    {
        return true;
    }
    false
}

/// rightmost occurrence of one of `operators` outside brackets; for '+'/'-'
/// positions that are signs are skipped
fn find_rightmost_operator_outside_brackets(
    input: &str,
    operators: &[char],
) -> Option<(usize, char)> {
    let bytes = input.as_bytes();
    let mut bracket_depth = 0;
    let mut last_op = None;

    for (i, c) in input.char_indices() {
        match c {
            '(' => bracket_depth += 1,
            ')' => bracket_depth -= 1,
            _ if bracket_depth == 0 && operators.contains(&c) => {
                if (c == '+' || c == '-') && is_sign_position(bytes, i) {
                    continue;
                }
                last_op = Some((i, c));
            }
            _ => {}
        }
    }
    last_op
}

/// leftmost occurrence of `op` outside brackets (power is right-associative)
fn find_leftmost_operator_outside_brackets(input: &str, op: char) -> Option<usize> {
    let mut bracket_depth = 0;
    for (i, c) in input.char_indices() {
        match c {
            '(' => bracket_depth += 1,
            ')' => bracket_depth -= 1,
            _ if bracket_depth == 0 && c == op => return Some(i),
            _ => {}
        }
    }
    None
}

fn parse_node(input: &str) -> Result<Expr, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("empty expression".to_string());
    }

    // strip redundant outer brackets: "(x + 1)" -> "x + 1"
    if input.starts_with('(') {
        if let Some(end) = find_matching_bracket(input, 0) {
            if end == input.len() - 1 {
                return parse_node(&input[1..end]);
            }
        } else {
            return Err(format!("unmatched bracket in '{}'", input));
        }
    }

    // addition and subtraction
    if let Some((pos, op)) = find_rightmost_operator_outside_brackets(input, &['+', '-']) {
        let left = parse_node(&input[..pos])?;
        let right = parse_node(&input[pos + 1..])?;
        return Ok(match op {
            '+' => Expr::Add(Box::new(left), Box::new(right)),
            _ => Expr::Sub(Box::new(left), Box::new(right)),
        });
    }

    // multiplication and division
    if let Some((pos, op)) = find_rightmost_operator_outside_brackets(input, &['*', '/']) {
        let left = parse_node(&input[..pos])?;
        let right = parse_node(&input[pos + 1..])?;
        return Ok(match op {
            '*' => Expr::Mul(Box::new(left), Box::new(right)),
            _ => Expr::Div(Box::new(left), Box::new(right)),
        });
    }

    // power
    if let Some(pos) = find_leftmost_operator_outside_brackets(input, '^') {
        let base = parse_node(&input[..pos])?;
        let exponent = parse_node(&input[pos + 1..])?;
        return Ok(Expr::Pow(Box::new(base), Box::new(exponent)));
    }

    // signed constants parse in one piece: "-1.5", "1e-5"
    if let Ok(value) = input.parse::<f64>() {
        return Ok(Expr::Const(value));
    }

    // unary sign
    if let Some(rest) = input.strip_prefix('-') {
        return Ok(Expr::Mul(
            Box::new(Expr::Const(-1.0)),
            Box::new(parse_node(rest)?),
        ));
    }
    if let Some(rest) = input.strip_prefix('+') {
        return parse_node(rest);
    }

    // function calls
    for (name, constructor) in FUNCTION_PREFIXES {
        if let Some(rest) = input.strip_prefix(name) {
            if rest.starts_with('(') && find_matching_bracket(input, name.len()) == Some(input.len() - 1) {
                let inner = parse_node(&input[name.len() + 1..input.len() - 1])?;
                return Ok(constructor(Box::new(inner)));
            }
        }
    }

    // variables
    if input.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Ok(Expr::Var(input.to_string()));
    }

    Err(format!("Invalid expression format: '{}'", input))
}
