//! Safe evaluation of arithmetic formulas such as `"A * (B + C)"`.
//!
//! A formula is tokenized, converted to postfix order with the shunting-yard
//! algorithm and reduced on a value stack. Variables are looked up in a
//! caller-supplied map at evaluation time; nothing else from the host is
//! reachable from a formula.

pub mod error;
pub mod formula;

use std::collections::HashMap;

pub use error::{FormulaError, Result};
pub use formula::{parse, tokenize, Formula, Operator, Token};

/// Parses and evaluates `expression` in one go.
///
/// Prefer building a [`Formula`] once when the same expression is evaluated
/// against several contexts.
pub fn evaluate_expression(
    expression: &str,
    context: Option<&HashMap<String, f64>>,
) -> Result<f64> {
    Formula::new(expression)?.evaluate(context)
}
