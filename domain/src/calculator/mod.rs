//! Arithmetic expression evaluator.
//!
//! A closed numeric grammar: numbers, `+ - * / ^` (or `**`), unary sign and
//! parentheses. There are no identifiers or function calls, so text coming
//! from a model can never reach anything but arithmetic.
//!
//! [`try_evaluate`] reports why an expression failed; [`evaluate`] is the
//! tool-facing form that flattens every failure into `NaN`.

mod lexer;
mod parser;

use thiserror::Error;

/// Why an expression could not be evaluated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unexpected token at position {pos}")]
    UnexpectedToken { pos: usize },

    #[error("unbalanced parentheses")]
    UnbalancedParen,

    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a finite number")]
    NonFinite,

    #[error("expression is nested too deeply")]
    TooDeep,
}

/// Evaluate an expression, reporting the failure reason.
pub fn try_evaluate(expression: &str) -> Result<f64, EvalError> {
    let tokens = lexer::tokenize(expression)?;
    let value = parser::Parser::new(&tokens).evaluate()?;
    if !value.is_finite() {
        return Err(EvalError::NonFinite);
    }
    Ok(value)
}

/// Evaluate an expression, returning `NaN` on any failure.
pub fn evaluate(expression: &str) -> f64 {
    try_evaluate(expression).unwrap_or(f64::NAN)
}
