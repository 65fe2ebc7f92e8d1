//! Tokenizer for arithmetic expressions.

use super::EvalError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

/// A token with the byte offset it started at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Spanned {
    pub token: Token,
    pub pos: usize,
}

pub(crate) fn tokenize(input: &str) -> Result<Vec<Spanned>, EvalError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        let token = match c {
            b' ' | b'\t' | b'\n' | b'\r' => {
                i += 1;
                continue;
            }
            b'+' => Token::Plus,
            b'-' => Token::Minus,
            b'*' if bytes.get(i + 1) == Some(&b'*') => {
                tokens.push(Spanned {
                    token: Token::Caret,
                    pos: i,
                });
                i += 2;
                continue;
            }
            b'*' => Token::Star,
            b'/' => Token::Slash,
            b'^' => Token::Caret,
            b'(' => Token::LParen,
            b')' => Token::RParen,
            b'0'..=b'9' | b'.' => {
                let (value, end) = scan_number(input, i)?;
                tokens.push(Spanned {
                    token: Token::Number(value),
                    pos: i,
                });
                i = end;
                continue;
            }
            _ => {
                let ch = input[i..].chars().next().unwrap_or('?');
                return Err(EvalError::UnexpectedChar { ch, pos: i });
            }
        };
        tokens.push(Spanned { token, pos: i });
        i += 1;
    }

    Ok(tokens)
}

/// Scan `digits ['.' digits] [('e'|'E') ['+'|'-'] digits]` starting at `start`.
fn scan_number(input: &str, start: usize) -> Result<(f64, usize), EvalError> {
    let bytes = input.as_bytes();
    let mut end = start;

    let digits = |from: usize| {
        let mut j = from;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        j
    };

    end = digits(end);
    let int_len = end - start;
    let mut frac_len = 0;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_end = digits(end + 1);
        frac_len = frac_end - (end + 1);
        end = frac_end;
    }
    if int_len == 0 && frac_len == 0 {
        return Err(EvalError::UnexpectedChar {
            ch: '.',
            pos: start,
        });
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp = end + 1;
        if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        let exp_end = digits(exp);
        if exp_end == exp {
            let ch = input[end..].chars().next().unwrap_or('e');
            return Err(EvalError::UnexpectedChar { ch, pos: end });
        }
        end = exp_end;
    }

    input[start..end]
        .parse::<f64>()
        .map(|v| (v, end))
        .map_err(|_| EvalError::UnexpectedToken { pos: start })
}
