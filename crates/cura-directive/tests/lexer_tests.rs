//! Tests for the directive lexer

use cura_directive::{LexError, Lexer, TokenKind};
use rstest::rstest;

fn kinds(src: &str) -> Vec<Result<TokenKind, char>> {
    Lexer::new(src)
        .map(|item| item.map(|token| token.kind).map_err(|e| e.character))
        .collect()
}

#[rstest]
#[case("5", TokenKind::Integer)]
#[case("-3", TokenKind::Integer)]
#[case("+12", TokenKind::Integer)]
#[case("-3.0", TokenKind::Float)]
#[case("0.25", TokenKind::Float)]
#[case("'it'", TokenKind::SingleQuoted)]
#[case("\"it's\"", TokenKind::DoubleQuoted)]
#[case("[1, 2, 'x']", TokenKind::List)]
#[case("Falsey", TokenKind::Name)]
#[case("settings", TokenKind::Name)]
#[case("_private1", TokenKind::Name)]
#[case("SETTINGS", TokenKind::Settings)]
#[case("FILE", TokenKind::File)]
#[case("AS", TokenKind::As)]
#[case("True", TokenKind::True)]
#[case("False", TokenKind::False)]
fn test_single_token(#[case] src: &str, #[case] expected: TokenKind) {
    let tokens: Vec<_> = Lexer::new(src).collect();
    assert_eq!(tokens.len(), 1, "{src:?} should be one token");
    let token = tokens[0].clone().unwrap();
    assert_eq!(token.kind, expected);
}

#[test]
fn test_list_ends_at_first_closing_bracket() {
    let tokens: Vec<_> = Lexer::new("[1, [2], 3]").collect();
    let first = tokens[0].clone().unwrap();
    assert_eq!(first.lexeme, "[1, [2]");
}

#[test]
fn test_leading_point_is_illegal() {
    assert_eq!(kinds(".5"), vec![Err('.'), Ok(TokenKind::Integer)]);
}

#[test]
fn test_trailing_point_is_illegal() {
    assert_eq!(kinds("5."), vec![Ok(TokenKind::Integer), Err('.')]);
}

#[test]
fn test_bare_sign_is_illegal() {
    assert_eq!(kinds("- 1"), vec![Err('-'), Ok(TokenKind::Integer)]);
}

#[test]
fn test_illegal_character_reports_offset() {
    let errors: Vec<LexError> = Lexer::new("x = 1;\n  y").filter_map(|t| t.err()).collect();
    assert_eq!(
        errors,
        vec![LexError {
            character: ';',
            offset: 5
        }]
    );
}

#[test]
fn test_token_offsets_and_lexemes() {
    let tokens: Vec<_> = Lexer::new("FILE 'a.stl'\tAS a")
        .map(|t| t.unwrap())
        .map(|t| (t.lexeme, t.offset))
        .collect();
    assert_eq!(tokens, vec![("FILE", 0), ("'a.stl'", 5), ("AS", 13), ("a", 16)]);
}

#[test]
fn test_directive_token_stream() {
    let src = "'gear();' AS gear SETTINGS infill_sparse_density = 40.5,\n support_enable = True";
    let stream = format!("{:?}", kinds(src));
    insta::assert_snapshot!(stream, @"[Ok(SingleQuoted), Ok(As), Ok(Name), Ok(Settings), Ok(Name), Ok(Equals), Ok(Float), Ok(Comma), Ok(Name), Ok(Equals), Ok(True)]");
}
