#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use razor_ir::{CodeTokenKind as K, SpanKind};
use razor_lexer::{AdapterTokenizer, CodeScanner, Tokenizer};

use crate::builder::TreeBuilder;
use crate::comment::parse_razor_comment;

struct Plain<'a> {
    stream: TokenStream<CodeScanner<'a>>,
}

impl<'a> BalancingParser<()> for Plain<'a> {
    type Source = CodeScanner<'a>;

    fn stream(&mut self) -> &mut TokenStream<CodeScanner<'a>> {
        &mut self.stream
    }
}

struct WithComments<'a> {
    stream: TokenStream<CodeScanner<'a>>,
}

impl<'a> BalancingParser<TreeBuilder> for WithComments<'a> {
    type Source = CodeScanner<'a>;

    fn stream(&mut self) -> &mut TokenStream<CodeScanner<'a>> {
        &mut self.stream
    }

    fn at_embedded_transition(&mut self, _allow_transitions: bool) -> bool {
        self.stream.at(K::RazorCommentTransition)
    }

    fn handle_embedded_transition(&mut self, builder: &mut TreeBuilder) {
        self.stream.output(builder, SpanKind::Code);
        parse_razor_comment(&mut self.stream, builder);
    }
}

struct Adapted<'a> {
    stream: TokenStream<AdapterTokenizer<'a>>,
}

impl<'a> BalancingParser<()> for Adapted<'a> {
    type Source = AdapterTokenizer<'a>;

    fn stream(&mut self) -> &mut TokenStream<AdapterTokenizer<'a>> {
        &mut self.stream
    }
}

/// A parser positioned just after the opening `(` at offset 0.
fn opened(text: &str) -> Plain<'_> {
    let mut parser = Plain {
        stream: TokenStream::new(CodeScanner::new(text)),
    };
    parser.stream.accept_and_move_next();
    parser
}

const OPENER: Span = Span::new(0, 1);

#[test]
fn stops_at_matching_closer() {
    let mut p = opened("(a(b)c)d");
    assert!(p.balance(&mut (), BalancingModes::empty(), K::LeftParen, K::RightParen, OPENER));
    assert_eq!(p.stream.current().map(|t| t.start), Some(6));
    assert_eq!(p.stream.current_kind(), Some(K::RightParen));

    let mut builder = TreeBuilder::new();
    p.stream.output(&mut builder, SpanKind::Code);
    assert_eq!(builder.finish().text(), "(a(b)c");
}

#[test]
fn backtracks_without_error() {
    let mut p = opened("(a(b");
    let modes = BalancingModes::BACKTRACK_ON_FAILURE | BalancingModes::NO_ERROR_ON_FAILURE;
    assert!(!p.balance(&mut (), modes, K::LeftParen, K::RightParen, OPENER));
    assert_eq!(p.stream.position(), 1);
    assert_eq!(p.stream.current().map(|t| t.text().to_owned()), Some("a".to_owned()));
    assert!(p.stream.into_diagnostics().is_empty());
}

#[test]
fn adapter_backtracks_across_disabled_text() {
    // Far enough that the checkpoint after `(` has been thinned out.
    let text = format!("({}\n#if false\n)\n#endif\nb", "a ".repeat(400));
    let mut p = Adapted {
        stream: TokenStream::new(AdapterTokenizer::new(&text)),
    };
    p.stream.accept_and_move_next();
    let modes = BalancingModes::BACKTRACK_ON_FAILURE | BalancingModes::NO_ERROR_ON_FAILURE;
    assert!(!p.balance(&mut (), modes, K::LeftParen, K::RightParen, OPENER));
    assert_eq!(p.stream.position(), 1);

    let mut replay = Vec::new();
    while let Some(token) = p.stream.current().cloned() {
        replay.push(token);
        p.stream.next_token();
    }
    let mut fresh = AdapterTokenizer::new(&text);
    let expected: Vec<_> = std::iter::from_fn(|| fresh.next_token())
        .filter(|t| t.start >= 1)
        .collect();
    assert_eq!(replay, expected);
    let disabled: Vec<&str> = replay
        .iter()
        .filter(|t| t.kind == K::DisabledText)
        .map(|t| t.text())
        .collect();
    assert_eq!(disabled, vec![")\n"]);
    assert!(p.stream.into_diagnostics().is_empty());
}

#[test]
fn failure_reports_at_opener_and_keeps_tokens() {
    let mut p = opened("(a(b");
    assert!(!p.balance(&mut (), BalancingModes::empty(), K::LeftParen, K::RightParen, OPENER));
    assert!(p.stream.at_end());

    let mut builder = TreeBuilder::new();
    p.stream.output(&mut builder, SpanKind::Code);
    assert_eq!(builder.finish().text(), "(a(b");

    let diagnostics = p.stream.into_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::ExpectedCloseBracketBeforeEof);
    assert_eq!(diagnostics[0].span, OPENER);
    assert_eq!(diagnostics[0].args, vec!["(".to_owned(), ")".to_owned()]);
}

#[test]
fn end_of_line_stops_single_line_balancing() {
    let mut p = opened("(a\nb)");
    let modes = BalancingModes::STOP_AT_END_OF_LINE | BalancingModes::NO_ERROR_ON_FAILURE;
    assert!(!p.balance(&mut (), modes, K::LeftParen, K::RightParen, OPENER));
    assert_eq!(p.stream.current_kind(), Some(K::NewLine));
}

#[test]
fn embedded_comments_become_nested_blocks() {
    let mut p = WithComments {
        stream: TokenStream::new(CodeScanner::new("(a @* x *@ b)")),
    };
    p.stream.accept_and_move_next();
    let mut builder = TreeBuilder::new();
    let modes = BalancingModes::ALLOW_COMMENTS_AND_TEMPLATES;
    assert!(p.balance(&mut builder, modes, K::LeftParen, K::RightParen, OPENER));
    p.stream.accept_and_move_next();
    p.stream.output(&mut builder, SpanKind::Code);

    let root = builder.finish();
    let texts: Vec<String> = root.flatten().iter().map(|s| s.text()).collect();
    assert_eq!(texts, vec!["(a ", "@", "*", " x ", "*", "@", " b)"]);
    assert_eq!(root.blocks().count(), 1);
}

/// Offset of the closer matching an opener at 0, if any.
fn matching_closer(text: &str) -> Option<u32> {
    let mut depth = 1;
    for (i, c) in text.char_indices().skip(1) {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(u32::try_from(i).unwrap());
                }
            }
            _ => {}
        }
    }
    None
}

proptest! {
    #[test]
    fn balance_finds_the_matching_closer(body in "[()x ]{0,24}") {
        let text = format!("({body}");
        let mut p = opened(&text);
        let modes = BalancingModes::BACKTRACK_ON_FAILURE | BalancingModes::NO_ERROR_ON_FAILURE;
        let balanced = p.balance(&mut (), modes, K::LeftParen, K::RightParen, OPENER);
        match matching_closer(&text) {
            Some(closer) => {
                prop_assert!(balanced);
                prop_assert_eq!(p.stream.current_kind(), Some(K::RightParen));
                prop_assert_eq!(p.stream.position(), closer);
            }
            None => {
                prop_assert!(!balanced);
                prop_assert_eq!(p.stream.position(), 1);
            }
        }
    }
}
