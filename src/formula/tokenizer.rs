use crate::formula::Token;
use log::debug;

/// Splits `expression` into tokens.
///
/// Parentheses and operators are always tokens of their own, whitespace only
/// separates, and every other run of characters becomes an operand. This
/// never fails; meaningless input is rejected later by the parser or the
/// evaluator.
///
/// ```
/// use formula_rs::{tokenize, Token};
///
/// let tokens: Vec<String> = tokenize("A / (10 - B)").iter().map(Token::to_string).collect();
/// assert_eq!(tokens, ["A", "/", "(", "10", "-", "B", ")"]);
/// ```
pub fn tokenize(expression: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut buffer = String::new();

    for ch in expression.chars() {
        if let Some(token) = Token::from_symbol(ch) {
            flush(&mut buffer, &mut tokens);
            tokens.push(token);
        } else if ch.is_whitespace() {
            flush(&mut buffer, &mut tokens);
        } else {
            buffer.push(ch);
        }
    }
    flush(&mut buffer, &mut tokens);

    debug!("Tokens: {:?}", tokens);
    tokens
}

fn flush(buffer: &mut String, tokens: &mut Vec<Token>) {
    if !buffer.is_empty() {
        tokens.push(Token::Operand(std::mem::take(buffer)));
    }
}
