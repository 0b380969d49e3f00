//! Error types for lexing and parsing expressions.

use thiserror::Error;

use crate::ast::Position;

/// Lexical error: the input cannot be split into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected character '{ch}' at {position}")]
    UnexpectedCharacter { ch: char, position: Position },

    #[error("unterminated phrase starting at {start}: reached end of input at {position}")]
    UnterminatedPhrase { start: Position, position: Position },

    #[error("invalid escape sequence '{sequence}' at {position}")]
    InvalidEscape { sequence: String, position: Position },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::UnexpectedCharacter { position, .. }
            | LexError::UnterminatedPhrase { position, .. }
            | LexError::InvalidEscape { position, .. } => *position,
        }
    }
}

/// Error raised while parsing an expression.
///
/// Every variant is terminal: the parser stops at the first mismatch and
/// returns no partial tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("unexpected {found} at {position}, expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: String,
        position: Position,
    },

    #[error("unexpected end of input at {position}, expected {expected}")]
    UnexpectedEof { expected: String, position: Position },

    #[error("unexpected {found} at {position} after a complete expression")]
    TrailingInput { found: String, position: Position },

    #[error("expression nests deeper than {limit} levels at {position}")]
    TooDeep { limit: usize, position: Position },

    #[error("expression is {length} characters long, the limit is {limit}")]
    TooLong { length: usize, limit: usize },
}

impl ParseError {
    /// Where the failure was detected. Length violations are reported at the
    /// start of the input.
    pub fn position(&self) -> Position {
        match self {
            ParseError::Lex(e) => e.position(),
            ParseError::UnexpectedToken { position, .. }
            | ParseError::UnexpectedEof { position, .. }
            | ParseError::TrailingInput { position, .. }
            | ParseError::TooDeep { position, .. } => *position,
            ParseError::TooLong { .. } => Position::start(),
        }
    }

    /// True when the input could not even be tokenized.
    pub fn is_lexical(&self) -> bool {
        matches!(self, ParseError::Lex(_))
    }
}
