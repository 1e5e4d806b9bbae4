#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use razor_diagnostic::ErrorCode;
use razor_ir::CodeTokenKind as K;
use razor_lexer::{CodeTokenizer, TokenizerKind};

fn stream(text: &str) -> TokenStream<CodeTokenizer<'_>> {
    TokenStream::new(CodeTokenizer::new(TokenizerKind::Scanning, text))
}

#[test]
fn window_tracks_previous() {
    let mut s = stream("a.b");
    assert_eq!(s.current_kind(), Some(K::Identifier));
    assert!(s.previous().is_none());
    assert!(s.next_token());
    assert_eq!(s.current_kind(), Some(K::Dot));
    assert_eq!(s.previous().map(|t| t.kind), Some(K::Identifier));
    assert!(s.next_token());
    assert!(!s.next_token());
    assert!(s.at_end());
    assert_eq!(s.position(), 3);
}

#[test]
fn lookahead_does_not_move() {
    let mut s = stream("x(1) + y");
    s.next_token();
    let before = (s.current().cloned(), s.previous().cloned(), s.position());

    assert_eq!(s.lookahead_kind(0), Some(K::LeftParen));
    assert_eq!(s.lookahead_kind(1), Some(K::IntegerLiteral));
    assert_eq!(s.lookahead_kind(3), Some(K::Whitespace));
    assert_eq!(s.lookahead(40), None);

    let after = (s.current().cloned(), s.previous().cloned(), s.position());
    assert_eq!(before, after);
    assert!(s.next_token());
    assert_eq!(s.current_kind(), Some(K::IntegerLiteral));
}

#[test]
fn lookahead_across_razor_comment_restores_comment_state() {
    let mut s = stream("a @* c *@ b");
    s.next_token();
    s.next_token();
    assert_eq!(s.current_kind(), Some(K::RazorCommentTransition));
    s.next_token();
    // Inside the comment: the tokenizer is in its comment sub-state.
    assert_eq!(s.lookahead_kind(1), Some(K::RazorComment));
    assert_eq!(s.lookahead_kind(2), Some(K::RazorCommentStar));
    assert_eq!(s.lookahead_kind(4), Some(K::Whitespace));
    assert!(s.next_token());
    assert_eq!(s.current_kind(), Some(K::RazorComment));
}

#[test]
fn put_back_rereads_tokens() {
    let mut s = stream("a b c");
    let read = s.read_while(|t| t.kind != K::Identifier || t.text() != "c");
    assert_eq!(read.len(), 4);
    assert_eq!(s.current().map(|t| t.text().to_owned()), Some("c".to_owned()));

    s.put_current_back();
    s.put_back_all(&read);
    assert_eq!(s.position(), 0);
    assert_eq!(s.current().map(|t| t.text().to_owned()), Some("a".to_owned()));
    s.recycle(read);
}

#[test]
fn accepted_tokens_become_one_span() {
    let mut s = stream("if (x) y");
    let mut builder = TreeBuilder::new();
    s.accept_until(&[K::Whitespace]);
    s.configure(ChunkGenerator::Statement, AcceptedCharacters::NONE);
    assert!(s.output(&mut builder, SpanKind::Code));
    assert!(!s.output(&mut builder, SpanKind::Code));
    s.accept_while(|t| t.kind != K::Identifier || t.text() != "y");
    s.output(&mut builder, SpanKind::Code);

    let root = builder.finish();
    let spans = root.flatten();
    assert_eq!(spans[0].text(), "if");
    assert_eq!(spans[0].chunk_generator, ChunkGenerator::Statement);
    assert_eq!(spans[0].accepted, AcceptedCharacters::NONE);
    assert_eq!(spans[1].text(), " (x) ");
    // The span context resets after output.
    assert_eq!(spans[1].accepted, AcceptedCharacters::ANY);
    assert_eq!(spans[1].start, 2);
}

#[test]
fn markers_are_zero_width() {
    let mut s = stream("x");
    let mut builder = TreeBuilder::new();
    s.output_marker(&mut builder, SpanKind::Code);
    s.accept_and_move_next();
    assert!(s.output(&mut builder, SpanKind::Code));
    s.output_marker(&mut builder, SpanKind::Markup);
    let root = builder.finish();
    let spans = root.flatten();
    assert!(spans[0].is_marker());
    assert_eq!(spans[0].start, 0);
    assert_eq!(spans[1].text(), "x");
    assert!(spans[2].is_marker());
    assert_eq!(spans[2].start, 1);
}

#[test]
fn token_diagnostics_move_to_sink_on_output() {
    let mut s = stream("\"open");
    let mut builder = TreeBuilder::new();
    s.accept_and_move_next();
    assert!(s.errors_mut().current().is_empty());
    s.output(&mut builder, SpanKind::Code);
    let diagnostics = s.into_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::UnterminatedStringLiteral);
}

#[test]
fn split_transition_peels_at_off_verbatim_string() {
    let mut s = stream("@\"a\" b");
    s.split_transition();
    assert_eq!(s.current_kind(), Some(K::Transition));
    assert_eq!(s.current().map(Token::len), Some(1));
    assert!(s.next_token());
    assert_eq!(s.current().map(|t| t.text().to_owned()), Some("\"a\"".to_owned()));
    assert_eq!(s.current().map(|t| t.start), Some(1));
}

#[test]
fn start_of_line_follows_accepted_tokens() {
    let mut s = stream("a \n  b");
    assert!(s.is_start_of_line());
    s.accept_and_move_next();
    assert!(!s.is_start_of_line());
    s.accept_and_move_next();
    s.accept_and_move_next();
    assert!(s.is_start_of_line());
    s.accept_and_move_next();
    assert!(s.is_start_of_line());
    s.accept_and_move_next();
    assert!(!s.is_start_of_line());
}

proptest! {
    #[test]
    fn lookahead_is_non_destructive(text in "[a-z(){}@*\" .;]{0,30}", n in 0usize..8, skip in 0usize..6) {
        for kind in [TokenizerKind::Scanning, TokenizerKind::Adapter] {
            let mut s = TokenStream::new(CodeTokenizer::new(kind, &text));
            for _ in 0..skip {
                s.next_token();
            }
            let before = (s.current().cloned(), s.previous().cloned());
            s.lookahead(n);
            let after = (s.current().cloned(), s.previous().cloned());
            prop_assert_eq!(&before, &after);

            let mut rest_a = Vec::new();
            while let Some(t) = s.current().cloned() {
                rest_a.push(t);
                s.next_token();
            }
            let mut fresh = TokenStream::new(CodeTokenizer::new(kind, &text));
            for _ in 0..skip {
                fresh.next_token();
            }
            let mut rest_b = Vec::new();
            while let Some(t) = fresh.current().cloned() {
                rest_b.push(t);
                fresh.next_token();
            }
            prop_assert_eq!(rest_a, rest_b);
        }
    }
}
