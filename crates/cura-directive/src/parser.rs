//! Recursive-descent parser for directive text
//!
//! Grammar:
//!
//! ```text
//! directiveList := object (object)*
//! object        := meshSpec ("SETTINGS" keyValueList)?
//! meshSpec      := string | string "AS" NAME | "FILE" string | "FILE" string "AS" NAME
//! keyValueList  := keyValue ("," keyValue)*
//! keyValue      := NAME "=" value
//! value         := string | integer | float | boolean | literalList
//! ```
//!
//! A parse either succeeds or stops at the first error; there is no
//! recovery. Illegal characters are not parse errors: the lexer skips them
//! and the parser records them in [`Parser::lex_errors`].

use crate::document::ParsedDocument;
use crate::error::{Error, LexError, Result};
use crate::lexer::Lexer;
use crate::object::{ObjectKind, ObjectReference};
use crate::settings::{SettingValue, SettingsMap};
use crate::token::{Token, TokenKind};

/// Parse a directive string into its objects and their settings.
///
/// Illegal characters are skipped; use [`Parser`] directly to inspect them.
///
/// # Example
/// ```
/// use cura_directive::{parse, ObjectReference, SettingValue};
///
/// let doc = parse("'gear();' AS gear SETTINGS wall_line_count = 3").unwrap();
/// let settings = doc.get(&ObjectReference::inline("").named("gear")).unwrap();
/// assert_eq!(settings.get("wall_line_count"), Some(&SettingValue::Integer(3)));
/// ```
pub fn parse(src: &str) -> Result<ParsedDocument> {
    Parser::new(src).parse_directive_list()
}

/// Parser state: the lexer, one token of lookahead and the illegal
/// characters skipped so far.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Option<Token<'a>>,
    lex_errors: Vec<LexError>,
}

impl<'a> Parser<'a> {
    pub fn new(src: &'a str) -> Self {
        let mut parser = Self {
            lexer: Lexer::new(src),
            current: None,
            lex_errors: Vec::new(),
        };
        parser.advance();
        parser
    }

    /// Illegal characters skipped while parsing.
    pub fn lex_errors(&self) -> &[LexError] {
        &self.lex_errors
    }

    pub fn into_lex_errors(self) -> Vec<LexError> {
        self.lex_errors
    }

    /// Move to the next token, returning the one just consumed.
    fn advance(&mut self) -> Option<Token<'a>> {
        let consumed = self.current.take();
        self.current = loop {
            match self.lexer.next() {
                Some(Ok(token)) => break Some(token),
                Some(Err(error)) => {
                    tracing::debug!(%error, "Skipping illegal character");
                    self.lex_errors.push(error);
                }
                None => break None,
            }
        };
        consumed
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current.is_some_and(|token| token.kind == kind)
    }

    fn unexpected(&self, expected: &'static str) -> Error {
        match self.current {
            Some(token) => Error::UnexpectedToken {
                found: token.lexeme.to_string(),
                offset: token.offset,
                expected,
            },
            None => Error::UnexpectedEof { expected },
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<Token<'a>> {
        if self.at(kind) {
            self.advance().ok_or(Error::UnexpectedEof { expected })
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// `directiveList := object (object)*`
    pub fn parse_directive_list(&mut self) -> Result<ParsedDocument> {
        let mut document = ParsedDocument::new();
        loop {
            let (object, settings) = self.parse_object()?;
            document.insert(object, settings)?;
            if self.current.is_none() {
                return Ok(document);
            }
        }
    }

    /// `object := meshSpec ("SETTINGS" keyValueList)?`
    fn parse_object(&mut self) -> Result<(ObjectReference, SettingsMap)> {
        let object = self.parse_mesh_spec()?;
        let settings = if self.at(TokenKind::Settings) {
            self.advance();
            self.parse_key_value_list()?
        } else {
            SettingsMap::new()
        };
        Ok((object, settings))
    }

    /// `meshSpec := ["FILE"] string ["AS" NAME]`
    fn parse_mesh_spec(&mut self) -> Result<ObjectReference> {
        let kind = if self.at(TokenKind::File) {
            self.advance();
            ObjectKind::File
        } else {
            ObjectKind::Inline
        };

        let source = self.parse_string("mesh source string")?;

        let name = if self.at(TokenKind::As) {
            self.advance();
            self.expect(TokenKind::Name, "name after AS")?.lexeme
        } else {
            ""
        };

        Ok(ObjectReference::new(kind, source, name))
    }

    fn parse_string(&mut self, expected: &'static str) -> Result<&'a str> {
        match self.current.and_then(|token| token.unquoted()) {
            Some(text) => {
                self.advance();
                Ok(text)
            }
            None => Err(self.unexpected(expected)),
        }
    }

    /// `keyValueList := keyValue ("," keyValue)*`
    fn parse_key_value_list(&mut self) -> Result<SettingsMap> {
        let mut settings = SettingsMap::new();
        loop {
            let key = self.expect(TokenKind::Name, "setting name")?.lexeme;
            self.expect(TokenKind::Equals, "'='")?;
            let value = self.parse_value()?;
            settings.insert(key, value)?;

            if !self.at(TokenKind::Comma) {
                return Ok(settings);
            }
            self.advance();
        }
    }

    /// `value := string | integer | float | boolean | literalList`
    fn parse_value(&mut self) -> Result<SettingValue> {
        const EXPECTED: &str = "setting value";
        let Some(token) = self.current else {
            return Err(Error::UnexpectedEof { expected: EXPECTED });
        };

        let value = match token.kind {
            TokenKind::SingleQuoted | TokenKind::DoubleQuoted => {
                SettingValue::String(token.unquoted().unwrap_or_default().to_string())
            }
            TokenKind::Integer => SettingValue::Integer(parse_number(token)?),
            TokenKind::Float => SettingValue::Float(parse_number(token)?),
            TokenKind::True => SettingValue::Boolean(true),
            TokenKind::False => SettingValue::Boolean(false),
            TokenKind::List => SettingValue::List(token.lexeme.to_string()),
            _ => return Err(self.unexpected(EXPECTED)),
        };
        self.advance();
        Ok(value)
    }
}

fn parse_number<T: std::str::FromStr>(token: Token<'_>) -> Result<T> {
    token.lexeme.parse().map_err(|_| Error::InvalidNumber {
        lexeme: token.lexeme.to_string(),
        offset: token.offset,
    })
}
