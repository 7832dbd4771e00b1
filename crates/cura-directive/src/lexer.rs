//! Directive lexer
//!
//! Produces tokens lazily from a directive string. The lexer is `Clone`, so a
//! scan can be restarted from any point by keeping a copy.

use crate::error::LexError;
use crate::token::{Token, TokenKind};

/// Tokenizer over one directive string.
///
/// Yields `Ok(Token)` for every recognized token and `Err(LexError)` for a
/// character no token can start with; after an error the lexer continues
/// with the next character.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// Byte offset of the next unread character.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.src[self.pos..];
        let trimmed = rest.trim_start_matches(is_directive_whitespace);
        self.pos += rest.len() - trimmed.len();
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_whitespace();

        let start = self.pos;
        let rest = &self.src[start..];
        let c = rest.chars().next()?;

        let matched = match c {
            '=' => Some((TokenKind::Equals, 1)),
            ',' => Some((TokenKind::Comma, 1)),
            '\'' => quoted_len(rest, '\'').map(|len| (TokenKind::SingleQuoted, len)),
            '"' => quoted_len(rest, '"').map(|len| (TokenKind::DoubleQuoted, len)),
            '[' => rest.find(']').map(|end| (TokenKind::List, end + 1)),
            '+' | '-' | '0'..='9' => number(rest),
            c if c == '_' || c.is_ascii_alphabetic() => {
                let len = rest
                    .find(|ch: char| !(ch == '_' || ch.is_ascii_alphanumeric()))
                    .unwrap_or(rest.len());
                let kind = TokenKind::keyword(&rest[..len]).unwrap_or(TokenKind::Name);
                Some((kind, len))
            }
            _ => None,
        };

        match matched {
            Some((kind, len)) => {
                self.pos += len;
                Some(Ok(Token {
                    kind,
                    lexeme: &self.src[start..start + len],
                    offset: start,
                }))
            }
            None => {
                self.pos += c.len_utf8();
                Some(Err(LexError {
                    character: c,
                    offset: start,
                }))
            }
        }
    }
}

/// Space, tab, newline, carriage return, vertical tab and form feed.
fn is_directive_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

/// Length of a quoted string including both quotes, if it is terminated.
fn quoted_len(rest: &str, quote: char) -> Option<usize> {
    rest[1..].find(quote).map(|end| end + 2)
}

/// `[+-]?[0-9]+` is an integer; `[+-]?[0-9]+\.[0-9]+` is a float. Digits on
/// both sides of the point are required.
fn number(rest: &str) -> Option<(TokenKind, usize)> {
    let bytes = rest.as_bytes();
    let sign = usize::from(matches!(bytes[0], b'+' | b'-'));
    let int_digits = count_digits(&bytes[sign..]);
    if int_digits == 0 {
        return None;
    }

    let int_end = sign + int_digits;
    if bytes.get(int_end) == Some(&b'.') {
        let frac_digits = count_digits(&bytes[int_end + 1..]);
        if frac_digits > 0 {
            return Some((TokenKind::Float, int_end + 1 + frac_digits));
        }
    }
    Some((TokenKind::Integer, int_end))
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
