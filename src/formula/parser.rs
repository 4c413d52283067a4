use crate::error::{FormulaError, Result};
use crate::formula::Token;
use log::debug;

/// Converts infix tokens to reverse Polish order (shunting-yard).
///
/// Operators of equal precedence are popped before pushing, so they
/// associate to the left: `A / B * C` is `(A / B) * C`.
///
/// ```
/// use formula_rs::{parse, tokenize, Token};
///
/// let rpn = parse(&tokenize("A / (10 - B)")).unwrap();
/// let rpn: Vec<String> = rpn.iter().map(Token::to_string).collect();
/// assert_eq!(rpn, ["A", "10", "B", "-", "/"]);
/// ```
///
/// # Errors
///
/// [`FormulaError::ParenthesisMismatch`] if a `)` has no opening paren or a
/// `(` is never closed.
pub fn parse(tokens: &[Token]) -> Result<Vec<Token>> {
    let mut queue = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();

    for token in tokens {
        match token {
            Token::Operator(op) => {
                while let Some(&Token::Operator(top)) = stack.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    stack.pop();
                    queue.push(Token::Operator(top));
                }
                stack.push(Token::Operator(*op));
            }
            Token::LeftParen => stack.push(Token::LeftParen),
            Token::RightParen => loop {
                match stack.pop() {
                    Some(Token::LeftParen) => break,
                    Some(top) => queue.push(top),
                    None => return Err(FormulaError::ParenthesisMismatch(')')),
                }
            },
            Token::Operand(_) => queue.push(token.clone()),
        }
    }

    while let Some(top) = stack.pop() {
        match top {
            Token::LeftParen => return Err(FormulaError::ParenthesisMismatch('(')),
            token => queue.push(token),
        }
    }

    debug!("Postfix: {:?}", queue);
    Ok(queue)
}
