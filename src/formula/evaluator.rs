use crate::error::{FormulaError, Result};
use crate::formula::Token;
use log::trace;
use std::collections::HashMap;

/// Stack machine reducing a postfix token sequence to a single value.
pub(crate) struct Evaluator<'a> {
    source: &'a str,
    context: Option<&'a HashMap<String, f64>>,
    stack: Vec<f64>,
}

impl<'a> Evaluator<'a> {
    pub(crate) fn new(source: &'a str, context: Option<&'a HashMap<String, f64>>) -> Self {
        Self {
            source,
            context,
            stack: Vec::new(),
        }
    }

    pub(crate) fn execute(mut self, postfix: &[Token]) -> Result<f64> {
        for token in postfix {
            match token {
                Token::Operand(text) => {
                    let value = self.resolve(text)?;
                    trace!("push {text} -> {value}");
                    self.stack.push(value);
                }
                Token::Operator(op) => {
                    let right = self.pop_value()?;
                    let left = self.pop_value()?;
                    let result = op.apply(left, right);
                    trace!("{left} {op} {right} -> {result}");
                    self.stack.push(result);
                }
                // The parser never emits these.
                Token::LeftParen | Token::RightParen => {
                    return Err(FormulaError::UnknownToken(token.to_string()))
                }
            }
        }

        match self.stack.as_slice() {
            [value] => Ok(*value),
            _ => Err(self.invalid()),
        }
    }

    /// A bound variable wins over reading the operand as a number.
    fn resolve(&self, text: &str) -> Result<f64> {
        if let Some(value) = self.context.and_then(|context| context.get(text)) {
            return Ok(*value);
        }
        if is_number(text) {
            return text
                .parse::<f64>()
                .map_err(|_| FormulaError::UnknownToken(text.to_string()));
        }
        Err(FormulaError::UnknownToken(text.to_string()))
    }

    fn pop_value(&mut self) -> Result<f64> {
        self.stack.pop().ok_or_else(|| self.invalid())
    }

    fn invalid(&self) -> FormulaError {
        FormulaError::InvalidFormula(self.source.to_string())
    }
}

/// Matches `[0-9]+(\.[0-9]+)?`: no sign, no exponent.
pub(crate) fn is_number(text: &str) -> bool {
    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    match text.split_once('.') {
        Some((integer, fraction)) => digits(integer) && digits(fraction),
        None => digits(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{parse, tokenize};

    fn run(expression: &str, context: Option<&HashMap<String, f64>>) -> Result<f64> {
        let postfix = parse(&tokenize(expression))?;
        Evaluator::new(expression, context).execute(&postfix)
    }

    #[test]
    fn test_is_number() {
        for text in ["0", "10", "3.14", "007", "1.0"] {
            assert!(is_number(text), "{text}");
        }
        for text in ["", ".5", "5.", "1.2.3", "-1", "+1", "1e5", "x1", "1_000", "١٢"] {
            assert!(!is_number(text), "{text}");
        }
    }

    #[test]
    fn test_simple_binary_expression() {
        let context = HashMap::from([("price".to_string(), 100.0), ("volume".to_string(), 50.0)]);

        assert_eq!(run("price + volume", Some(&context)).unwrap(), 150.0);
        assert_eq!(run("price - volume", Some(&context)).unwrap(), 50.0);
        assert_eq!(run("price * volume", Some(&context)).unwrap(), 5000.0);
        assert_eq!(run("price / volume", Some(&context)).unwrap(), 2.0);
    }

    #[test]
    fn test_grouped_expressions() {
        let context = HashMap::from([("price".to_string(), 20.0), ("volume".to_string(), 50.0)]);
        let result = run("   (   price   +  10  )   *   (  volume  -  5  )   ", Some(&context));
        assert_eq!(result.unwrap(), 1350.0); // (20 + 10) * (50 - 5)
    }

    #[test]
    fn test_division_by_zero() {
        let context = HashMap::from([("price".to_string(), 100.0), ("volume".to_string(), 0.0)]);
        assert!(run("price / volume", Some(&context)).unwrap().is_nan());
        // NaN propagates through the rest of the formula
        assert!(run("price / volume + 1", Some(&context)).unwrap().is_nan());
    }

    #[test]
    fn test_unknown_token() {
        assert_eq!(
            run("undefined_variable", None),
            Err(FormulaError::UnknownToken("undefined_variable".to_string()))
        );
        assert_eq!(
            run("2 * 1e5", None),
            Err(FormulaError::UnknownToken("1e5".to_string()))
        );
        assert_eq!(
            run("price > 100", None),
            Err(FormulaError::UnknownToken("price".to_string()))
        );
    }

    #[test]
    fn test_operand_underflow() {
        for expression in ["price + ", "+", "* 2", "1 + + 2"] {
            let context = HashMap::from([("price".to_string(), 1.0)]);
            assert_eq!(
                run(expression, Some(&context)),
                Err(FormulaError::InvalidFormula(expression.to_string())),
                "{expression}"
            );
        }
    }

    #[test]
    fn test_leftover_operands() {
        let context = HashMap::from([("A".to_string(), 1.0), ("B".to_string(), 2.0)]);
        assert_eq!(
            run("B A + 3", Some(&context)),
            Err(FormulaError::InvalidFormula("B A + 3".to_string()))
        );
        assert_eq!(
            run("1 2", None),
            Err(FormulaError::InvalidFormula("1 2".to_string()))
        );
    }

    #[test]
    fn test_empty_formula() {
        assert_eq!(run("", None), Err(FormulaError::InvalidFormula(String::new())));
        assert_eq!(run("()", None), Err(FormulaError::InvalidFormula("()".to_string())));
    }

    #[test]
    fn test_stray_paren_token() {
        let postfix = [Token::Operand("1".to_string()), Token::LeftParen];
        assert_eq!(
            Evaluator::new("1 (", None).execute(&postfix),
            Err(FormulaError::UnknownToken("(".to_string()))
        );
    }
}
