#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;
use razor_diagnostic::ErrorCode;
use razor_ir::Keyword;

fn lex(text: &str) -> Vec<Token<CodeTokenKind>> {
    let mut tokenizer = AdapterTokenizer::new(text);
    std::iter::from_fn(|| tokenizer.next_token()).collect()
}

fn kinds(text: &str) -> Vec<(CodeTokenKind, String)> {
    lex(text)
        .into_iter()
        .map(|t| (t.kind, t.text().to_owned()))
        .collect()
}

fn k(kind: CodeTokenKind, text: &str) -> (CodeTokenKind, String) {
    (kind, text.to_owned())
}

#[test]
fn verbatim_identifier_splits_off_transition() {
    use CodeTokenKind as K;
    assert_eq!(
        kinds("@class.x"),
        vec![
            k(K::Transition, "@"),
            k(K::Keyword(Keyword::Class), "class"),
            k(K::Dot, "."),
            k(K::Identifier, "x"),
        ]
    );
}

#[test]
fn razor_comment_uses_shared_machine() {
    use CodeTokenKind as K;
    assert_eq!(
        kinds("@* a *@b"),
        vec![
            k(K::RazorCommentTransition, "@"),
            k(K::RazorCommentStar, "*"),
            k(K::RazorComment, " a "),
            k(K::RazorCommentStar, "*"),
            k(K::RazorCommentTransition, "@"),
            k(K::Identifier, "b"),
        ]
    );
}

#[test]
fn preprocessor_lines_and_disabled_text() {
    use CodeTokenKind as K;
    let text = "#if false\nx = 1;\n  y();\n#endif\nz";
    assert_eq!(
        kinds(text),
        vec![
            k(K::CSharpDirective, "#if false"),
            k(K::NewLine, "\n"),
            k(K::DisabledText, "x = 1;\n  y();\n"),
            k(K::CSharpDirective, "#endif"),
            k(K::NewLine, "\n"),
            k(K::Identifier, "z"),
        ]
    );
}

#[test]
fn hash_mid_line_is_punctuation() {
    use CodeTokenKind as K;
    assert_eq!(
        kinds("a #b"),
        vec![
            k(K::Identifier, "a"),
            k(K::Whitespace, " "),
            k(K::Hash, "#"),
            k(K::Identifier, "b"),
        ]
    );
}

#[test]
fn unterminated_string_reports() {
    let tokens = lex("\"abc");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].diagnostics[0].code, ErrorCode::UnterminatedStringLiteral);
}

#[test]
fn reset_to_every_boundary_replays_identically() {
    let text = "@foo(@* c *@ \"s\", @bar) // end\n#if false\nq\n#endif";
    let all = lex(text);
    let mut tokenizer = AdapterTokenizer::new(text);
    while tokenizer.next_token().is_some() {}
    for boundary in all.iter().map(|t| t.start).rev() {
        tokenizer.reset(boundary);
        let replay: Vec<_> = std::iter::from_fn(|| tokenizer.next_token()).collect();
        let expected: Vec<_> = all.iter().filter(|t| t.start >= boundary).cloned().collect();
        assert_eq!(replay, expected, "from {boundary}");
    }
}

#[test]
fn reset_past_lexed_text_starts_in_default_state() {
    // The markup parser owns everything before `@`; the `#if false` line
    // must not switch the code tokenizer into disabled text.
    let text = "<p>\n#if false\n</p>\n@foo\n";
    let at = u32::try_from(text.find('@').unwrap()).unwrap();
    let mut tokenizer = AdapterTokenizer::new(text);
    tokenizer.reset(at);
    assert_eq!(tokenizer.position(), at);
    let replay: Vec<_> = std::iter::from_fn(|| tokenizer.next_token())
        .map(|t| (t.kind, t.text().to_owned()))
        .collect();
    use CodeTokenKind as K;
    assert_eq!(
        replay,
        vec![k(K::Transition, "@"), k(K::Identifier, "foo"), k(K::NewLine, "\n")]
    );
}

#[test]
fn reset_past_lexed_text_keeps_line_position() {
    let mut tokenizer = AdapterTokenizer::new("x = 1; #y");
    tokenizer.reset(7);
    let next = tokenizer.next_token().unwrap();
    assert_eq!((next.kind, next.text()), (CodeTokenKind::Hash, "#"));
}

#[test]
fn reset_after_forgetting_checkpoints_starts_fresh() {
    let text = "alpha beta gamma";
    let mut tokenizer = AdapterTokenizer::new(text);
    while tokenizer.next_token().is_some() {}
    tokenizer.checkpoints = CheckpointCache::new(CHECKPOINT_CAPACITY);
    tokenizer.reset(6);
    assert_eq!(tokenizer.position(), 6);
    let next = tokenizer.next_token().unwrap();
    assert_eq!(next.text(), "beta");
}

#[test]
fn far_backtrack_replays_from_nearby_checkpoint() {
    let text: String = (0..2000).map(|i| format!("a{i} ")).collect();
    let all = lex(&text);
    let mut tokenizer = AdapterTokenizer::new(&text);
    while tokenizer.next_token().is_some() {}

    let target = all[2001].start;
    match tokenizer.checkpoints.clone().restore(target) {
        Restore::Exact(_) => {}
        Restore::Replay(from) => assert!(target - from.position < 1000, "from {}", from.position),
        Restore::Unlexed => panic!("{target} was lexed"),
    }
    tokenizer.reset(target);
    assert_eq!(tokenizer.next_token().as_ref(), Some(&all[2001]));
}

#[test]
fn reset_inside_token_continues_from_there() {
    let mut tokenizer = AdapterTokenizer::new("abcdef gh");
    while tokenizer.next_token().is_some() {}
    tokenizer.reset(3);
    let next = tokenizer.next_token().unwrap();
    assert_eq!((next.start, next.text()), (3, "def"));
}
