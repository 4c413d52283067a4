use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use log::debug;
use rayon::prelude::*;

use crate::error::{FormulaError, Result};

mod evaluator;
mod parser;
mod tokenizer;

use evaluator::{is_number, Evaluator};
pub use parser::parse;
pub use tokenizer::tokenize;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Applies the operator. Division by zero yields `NaN`.
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => {
                if right == 0.0 {
                    f64::NAN
                } else {
                    left / right
                }
            }
        }
    }

    /// Binding strength; `*` and `/` bind tighter than `+` and `-`.
    pub fn precedence(&self) -> u8 {
        match self {
            Operator::Add | Operator::Subtract => 0,
            Operator::Multiply | Operator::Divide => 1,
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Operator> {
        match symbol {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }
}

impl TryFrom<char> for Operator {
    type Error = FormulaError;

    fn try_from(value: char) -> std::result::Result<Self, Self::Error> {
        Operator::from_symbol(value).ok_or_else(|| FormulaError::UnknownToken(value.to_string()))
    }
}

impl TryFrom<&str> for Operator {
    type Error = FormulaError;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => Operator::try_from(symbol),
            _ => Err(FormulaError::UnknownToken(value.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A lexical unit of a formula. Numbers and variable names are both kept as
/// `Operand` text; telling them apart is deferred to evaluation, where a
/// binding takes priority over a numeric reading.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Operator(Operator),
    LeftParen,
    RightParen,
    Operand(String),
}

impl Token {
    /// Single-character tokens: parentheses and operators.
    pub fn from_symbol(symbol: char) -> Option<Token> {
        match symbol {
            '(' => Some(Token::LeftParen),
            ')' => Some(Token::RightParen),
            _ => Operator::from_symbol(symbol).map(Token::Operator),
        }
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        match value {
            "(" => Token::LeftParen,
            ")" => Token::RightParen,
            _ => Operator::try_from(value)
                .map(Token::Operator)
                .unwrap_or_else(|_| Token::Operand(value.to_string())),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Operator(op) => write!(f, "{}", op),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::Operand(text) => write!(f, "{}", text),
        }
    }
}

/// A parsed arithmetic formula.
///
/// Parsing happens once in [`Formula::new`]; the postfix form is then
/// evaluated against any number of variable bindings. A `Formula` is never
/// mutated after construction and can be shared between threads.
///
/// ```
/// use std::collections::HashMap;
/// use formula_rs::Formula;
///
/// let formula = Formula::new("(A + 1) * 100").unwrap();
/// let context = HashMap::from([("A".to_string(), 5.0)]);
/// assert_eq!(formula.evaluate(Some(&context)).unwrap(), 600.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    source: String,
    postfix: Vec<Token>,
}

impl Formula {
    pub fn new(expression: &str) -> Result<Self> {
        debug!("Parsing formula: {}", expression);
        let tokens = tokenize(expression);
        let postfix = parse(&tokens)?;
        Ok(Self {
            source: expression.to_string(),
            postfix,
        })
    }

    /// The expression this formula was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Tokens in postfix (reverse Polish) order.
    pub fn postfix(&self) -> &[Token] {
        &self.postfix
    }

    /// Variable names referenced by the formula, in order of first
    /// appearance in the postfix sequence and without duplicates.
    pub fn variables(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.postfix
            .iter()
            .filter_map(|token| match token {
                Token::Operand(text) if !is_number(text) => Some(text.as_str()),
                _ => None,
            })
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Evaluates the formula, resolving variables from `context`.
    ///
    /// # Errors
    ///
    /// * [`FormulaError::UnknownToken`] if an operand is neither bound in
    ///   `context` nor a number.
    /// * [`FormulaError::InvalidFormula`] if operands and operators don't
    ///   reduce to exactly one value.
    pub fn evaluate(&self, context: Option<&HashMap<String, f64>>) -> Result<f64> {
        Evaluator::new(&self.source, context).execute(&self.postfix)
    }

    /// Evaluates the formula once per context, in parallel. Results keep the
    /// order of `contexts`.
    pub fn evaluate_batch(&self, contexts: &[HashMap<String, f64>]) -> Vec<Result<f64>> {
        debug!(
            "Evaluating '{}' against {} contexts",
            self.source,
            contexts.len()
        );
        contexts
            .par_iter()
            .map(|context| self.evaluate(Some(context)))
            .collect()
    }
}

impl FromStr for Formula {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self> {
        Formula::new(s)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}
