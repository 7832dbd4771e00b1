//! Error types for cura-directive

/// Result type for cura-directive operations
pub type Result<T> = std::result::Result<T, Error>;

/// A character the lexer could not start a token with.
///
/// Never fatal: the lexer reports it and resumes one character later.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Illegal character {character:?} at byte {offset}")]
pub struct LexError {
    pub character: char,
    pub offset: usize,
}

/// Errors that can occur while parsing or serializing directives
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Syntax error at '{found}' (byte {offset}): expected {expected}")]
    UnexpectedToken {
        found: String,
        offset: usize,
        expected: &'static str,
    },

    #[error("Syntax error at end of input: expected {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("Number '{lexeme}' at byte {offset} is out of range")]
    InvalidNumber { lexeme: String, offset: usize },

    #[error("Duplicate key {key}")]
    DuplicateKey { key: String },

    #[error("'{name}' cannot be written as a bare name")]
    InvalidName { name: String },

    #[error("Cannot write {what} as a directive literal: {text}")]
    Unrepresentable { what: &'static str, text: String },
}

impl Error {
    /// True for errors raised while reading directive text (as opposed to
    /// writing it).
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedToken { .. }
                | Self::UnexpectedEof { .. }
                | Self::InvalidNumber { .. }
                | Self::DuplicateKey { .. }
        )
    }
}
