//! Lexer for path data.
//!
//! The lexer never fails: unknown glyphs act as separators, and whether a
//! command letter is supported is decided later by the interpreter.

/// A lexical token borrowed from the path data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A single alphabetic character.
    Command(char),
    /// A run of digits and dots, optionally led by `-`. Not validated.
    Number(&'a str),
}

impl<'a> Token<'a> {
    /// Numeric value, if this is a well-formed finite number.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            Token::Number(s) => s.parse().ok().filter(|v: &f32| v.is_finite()),
            Token::Command(_) => None,
        }
    }

    pub fn as_command(&self) -> Option<char> {
        match self {
            Token::Command(c) => Some(*c),
            Token::Number(_) => None,
        }
    }
}

/// Split path data into commands and numeric literals.
///
/// A `-` always begins a new number, so `"1-2"` yields `1` and `-2`.
pub fn tokenize(data: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut number_start: Option<usize> = None;

    for (i, c) in data.char_indices() {
        if c.is_alphabetic() {
            flush(data, &mut tokens, &mut number_start, i);
            tokens.push(Token::Command(c));
        } else if c == '-' {
            flush(data, &mut tokens, &mut number_start, i);
            number_start = Some(i);
        } else if c.is_ascii_digit() || c == '.' {
            if number_start.is_none() {
                number_start = Some(i);
            }
        } else {
            // separators and unknown glyphs both end the current number
            flush(data, &mut tokens, &mut number_start, i);
        }
    }
    flush(data, &mut tokens, &mut number_start, data.len());

    tracing::trace!(count = tokens.len(), "tokenized path data");
    tokens
}

/// Emit the pending number, if any, ending at byte `end`.
fn flush<'a>(data: &'a str, tokens: &mut Vec<Token<'a>>, start: &mut Option<usize>, end: usize) {
    if let Some(s) = start.take() {
        tokens.push(Token::Number(&data[s..end]));
    }
}
