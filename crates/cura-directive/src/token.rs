//! Token types produced by the directive lexer

/// Kind of a directive token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `'...'`
    SingleQuoted,
    /// `"..."`
    DoubleQuoted,
    Integer,
    Float,
    /// `[...]`, kept as opaque text
    List,
    Name,
    Settings,
    File,
    As,
    True,
    False,
    Equals,
    Comma,
}

impl TokenKind {
    /// Reserved words, matched exactly and case-sensitively.
    pub const RESERVED: [(&'static str, TokenKind); 5] = [
        ("SETTINGS", TokenKind::Settings),
        ("FILE", TokenKind::File),
        ("AS", TokenKind::As),
        ("True", TokenKind::True),
        ("False", TokenKind::False),
    ];

    /// The reserved-word kind for `word`, if it is one.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        Self::RESERVED
            .iter()
            .find(|(reserved, _)| *reserved == word)
            .map(|(_, kind)| *kind)
    }

    pub fn is_string(self) -> bool {
        matches!(self, Self::SingleQuoted | Self::DoubleQuoted)
    }
}

/// One token with its raw lexeme and byte offset in the directive text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub lexeme: &'a str,
    pub offset: usize,
}

impl<'a> Token<'a> {
    /// String payload without its quotes; `None` for non-string tokens.
    pub fn unquoted(&self) -> Option<&'a str> {
        if self.kind.is_string() {
            Some(&self.lexeme[1..self.lexeme.len() - 1])
        } else {
            None
        }
    }
}
