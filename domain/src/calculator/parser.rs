//! Recursive-descent evaluator over the token stream.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := primary ('^' unary)?
//! primary := NUMBER | '(' expr ')'
//! ```
//!
//! `power` binds tighter than unary minus on its left (`-2^2 = -4`) and is
//! right-associative (`2^3^2 = 512`).

use super::EvalError;
use super::lexer::{Spanned, Token};

/// Maximum nesting of parentheses and unary operators.
const MAX_DEPTH: usize = 64;

pub(crate) struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(tokens: &'a [Spanned]) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Evaluate the whole token stream as a single expression.
    pub(crate) fn evaluate(mut self) -> Result<f64, EvalError> {
        if self.tokens.is_empty() {
            return Err(EvalError::Empty);
        }
        let value = self.expr()?;
        match self.peek() {
            None => Ok(value),
            Some(Spanned {
                token: Token::RParen,
                ..
            }) => Err(EvalError::UnbalancedParen),
            Some(Spanned { pos, .. }) => Err(EvalError::UnexpectedToken { pos: *pos }),
        }
    }

    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Spanned> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn descend(&mut self) -> Result<(), EvalError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EvalError::TooDeep);
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        while let Some(op) = self.peek().map(|s| s.token) {
            match op {
                Token::Plus => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Token::Minus => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.unary()?;
        while let Some(op) = self.peek().map(|s| s.token) {
            match op {
                Token::Star => {
                    self.pos += 1;
                    value *= self.unary()?;
                }
                Token::Slash => {
                    self.pos += 1;
                    let divisor = self.unary()?;
                    if divisor == 0.0 {
                        return Err(EvalError::DivisionByZero);
                    }
                    value /= divisor;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn unary(&mut self) -> Result<f64, EvalError> {
        match self.peek().map(|s| s.token) {
            Some(Token::Minus) => {
                self.pos += 1;
                self.descend()?;
                let value = -self.unary()?;
                self.depth -= 1;
                Ok(value)
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.descend()?;
                let value = self.unary()?;
                self.depth -= 1;
                Ok(value)
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<f64, EvalError> {
        let base = self.primary()?;
        if let Some(Token::Caret) = self.peek().map(|s| s.token) {
            self.pos += 1;
            self.descend()?;
            let exponent = self.unary()?;
            self.depth -= 1;
            let value = base.powf(exponent);
            if !value.is_finite() {
                return Err(EvalError::NonFinite);
            }
            return Ok(value);
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<f64, EvalError> {
        match self.next() {
            Some(Spanned {
                token: Token::Number(n),
                ..
            }) => Ok(n),
            Some(Spanned {
                token: Token::LParen,
                ..
            }) => {
                self.descend()?;
                let value = self.expr()?;
                self.depth -= 1;
                match self.next() {
                    Some(Spanned {
                        token: Token::RParen,
                        ..
                    }) => Ok(value),
                    Some(Spanned { pos, .. }) => Err(EvalError::UnexpectedToken { pos }),
                    None => Err(EvalError::UnbalancedParen),
                }
            }
            Some(Spanned { pos, .. }) => Err(EvalError::UnexpectedToken { pos }),
            None => Err(EvalError::UnexpectedEnd),
        }
    }
}
