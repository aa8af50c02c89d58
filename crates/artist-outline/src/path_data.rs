//! Interpreter for the `M`, `L`, `C`, `Q`, `Z` path-data subset.
//!
//! Only absolute (upper-case) commands are understood. Any other command
//! letter ends interpretation and the operations built so far are kept.

use crate::geometry::Point;
use crate::path::{PathBuilder, VectorPath};
use crate::tokenizer::{tokenize, Token};
use tracing::debug;

/// Read position over an immutable token slice.
#[derive(Debug, Clone)]
pub struct TokenCursor<'t, 'a> {
    tokens: &'t [Token<'a>],
    index: usize,
}

impl<'t, 'a> TokenCursor<'t, 'a> {
    pub fn new(tokens: &'t [Token<'a>]) -> Self {
        Self { tokens, index: 0 }
    }

    /// Tokens not yet consumed.
    pub fn remaining(&self) -> &'t [Token<'a>] {
        &self.tokens[self.index..]
    }

    fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.index)
    }

    /// Consume a command letter. A number or the end of input yields `None`.
    fn next_command(&mut self) -> Option<char> {
        let c = self.peek()?.as_command()?;
        self.index += 1;
        Some(c)
    }

    /// Consume one well-formed number.
    fn next_number(&mut self) -> Option<f32> {
        let v = self.peek()?.as_number()?;
        self.index += 1;
        Some(v)
    }

    /// Consume `N` coordinate pairs.
    ///
    /// Returns `None` without consuming anything when no number follows.
    /// A group cut short by a command or the end of input is consumed and
    /// dropped.
    fn next_points<const N: usize>(&mut self) -> Option<[Point; N]> {
        let start = self.index;
        let mut points = [Point::ZERO; N];
        for slot in points.iter_mut() {
            let x = self.next_number();
            let y = if x.is_some() { self.next_number() } else { None };
            match (x, y) {
                (Some(x), Some(y)) => *slot = Point::new(x, y),
                _ => {
                    if self.index > start {
                        debug!(dropped = self.index - start, "incomplete coordinate group");
                    }
                    return None;
                }
            }
        }
        Some(points)
    }
}

/// Build a path from path-data tokens. Never fails.
pub fn parse_path(tokens: &[Token<'_>]) -> VectorPath {
    let mut cursor = TokenCursor::new(tokens);
    let mut builder = PathBuilder::new();

    while let Some(command) = cursor.next_command() {
        match command {
            'M' => {
                if let Some([p]) = cursor.next_points::<1>() {
                    builder.move_to(p);
                    // extra pairs after a move are implicit line-tos
                    while let Some([p]) = cursor.next_points::<1>() {
                        builder.line_to(p);
                    }
                }
            }
            'L' => {
                while let Some([p]) = cursor.next_points::<1>() {
                    builder.line_to(p);
                }
            }
            'C' => {
                while let Some([c1, c2, p]) = cursor.next_points::<3>() {
                    builder.cubic_to(c1, c2, p);
                }
            }
            'Q' => {
                while let Some([c, p]) = cursor.next_points::<2>() {
                    builder.quad_to(c, p);
                }
            }
            'Z' => builder.close(),
            other => {
                debug!(command = %other, remaining = cursor.remaining().len(), "unsupported path command, truncating");
                break;
            }
        }
    }

    if let Some(token) = cursor.peek() {
        if token.as_command().is_none() {
            debug!(token = ?token, "path data stopped at a non-command token");
        }
    }

    builder.build()
}

/// Tokenize and interpret a `d` attribute value.
pub fn parse_path_data(data: &str) -> VectorPath {
    parse_path(&tokenize(data))
}
