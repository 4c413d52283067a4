use thiserror::Error;

/// Errors raised while building or evaluating a [`Formula`](crate::Formula).
///
/// Division by zero is not represented here: it evaluates to `NaN`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// A parenthesis without its counterpart. Holds the unmatched character,
    /// `')'` when a closing paren has no opener and `'('` when an opener is
    /// never closed.
    #[error("parentheses mismatch: unmatched '{0}'")]
    ParenthesisMismatch(char),

    /// A token that is neither a bound variable, a number nor an operator.
    #[error("unknown token: {0}")]
    UnknownToken(String),

    /// Operands and operators don't reduce to a single value.
    #[error("invalid formula: {0}")]
    InvalidFormula(String),
}

pub type Result<T> = std::result::Result<T, FormulaError>;
