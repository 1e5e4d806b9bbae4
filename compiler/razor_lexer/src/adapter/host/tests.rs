use super::*;
use pretty_assertions::assert_eq;

fn one(text: &str) -> (Option<HostToken>, usize) {
    let Some(result) = lex_one(text) else {
        panic!("no token for {text:?}");
    };
    result
}

#[test]
fn delimited_tokens_extend_through_callbacks() {
    assert_eq!(one("\"a b\" x"), (Some(HostToken::String(true)), 5));
    assert_eq!(one("@\"a\"\"b\""), (Some(HostToken::String(true)), 7));
    assert_eq!(one("$\"{x}\""), (Some(HostToken::String(true)), 6));
    assert_eq!(one("\"\"\"r\"\"\""), (Some(HostToken::String(true)), 7));
    assert_eq!(one("\"open"), (Some(HostToken::String(false)), 5));
    assert_eq!(one("/* x */y"), (Some(HostToken::BlockComment(true)), 7));
    assert_eq!(one("'c'"), (Some(HostToken::Char(true)), 3));
}

#[test]
fn empty_string_is_not_a_raw_string() {
    assert_eq!(one("\"\";"), (Some(HostToken::String(true)), 2));
}

#[test]
fn words_and_numbers() {
    assert_eq!(one("foo_bar."), (Some(HostToken::Identifier), 7));
    assert_eq!(one("@class "), (Some(HostToken::VerbatimIdentifier), 6));
    assert_eq!(one("1.5e3f;"), (Some(HostToken::Number(true)), 6));
    assert_eq!(one(".5"), (Some(HostToken::Number(true)), 2));
    assert_eq!(one("42)"), (Some(HostToken::Number(false)), 2));
}

#[test]
fn operators_longest_match() {
    assert_eq!(one("??= "), (Some(HostToken::QuestionQuestionEq), 3));
    assert_eq!(one(">>"), (Some(HostToken::Gt), 1));
    assert_eq!(one("..5"), (Some(HostToken::DotDot), 2));
}

#[test]
fn rejected_characters_are_one_char() {
    assert_eq!(one("$x"), (None, 1));
    assert_eq!(one("§"), (None, '§'.len_utf8()));
}

#[test]
fn simple_kinds() {
    assert_eq!(HostToken::Number(true).simple_kind(), Some(CodeTokenKind::RealLiteral));
    assert_eq!(HostToken::Identifier.simple_kind(), None);
    assert!(!HostToken::String(false).is_terminated());
    assert!(HostToken::LBrace.is_terminated());
}
