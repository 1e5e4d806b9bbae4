#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use razor_diagnostic::ErrorCode;
use razor_ir::{BlockKind, Keyword, SpanKind};

fn spans(tree: &SyntaxTree) -> Vec<(SpanKind, String)> {
    tree.root()
        .flatten()
        .iter()
        .map(|span| (span.kind, span.text()))
        .collect()
}

const PAGE: &str = "@page \"/counter\"
@using System.Text
@inject ICounter counter

<h1>Counter</h1>
<p>Current count: @counter.Value</p>
@if (counter.Value > 10) {
    <p>That is a lot.</p>
} else {
    @:Keep going @(counter.Value + 1)
}
@* not rendered *@
@code {
    void Increment() { counter.Value++; }
}
";

#[test]
fn empty_document() {
    let tree = parse("", &ParserOptions::default()).unwrap();
    assert!(tree.root().children.is_empty());
    assert!(tree.diagnostics().is_empty());
    assert_eq!(tree.text(), "");
}

#[test]
fn page_round_trips_without_errors() {
    let tree = parse(PAGE, &ParserOptions::default()).unwrap();
    assert_eq!(tree.text(), PAGE);
    assert!(tree.diagnostics().is_empty(), "{:?}", tree.diagnostics());

    let kinds: Vec<BlockKind> = tree.root().blocks().map(|b| b.kind).collect();
    assert_eq!(
        kinds,
        vec![
            BlockKind::Directive,
            BlockKind::Directive,
            BlockKind::Directive,
            BlockKind::Expression,
            BlockKind::Statement,
            BlockKind::Comment,
            BlockKind::Directive,
        ]
    );
}

#[test]
fn spans_are_contiguous() {
    let tree = parse(PAGE, &ParserOptions::default()).unwrap();
    let mut next = 0;
    for span in tree.root().flatten() {
        assert_eq!(span.start, next, "gap before {:?}", span.text());
        next = span.start + span.len();
    }
    assert_eq!(next as usize, PAGE.len());
}

#[test]
fn tokenizers_agree() {
    let scanning = parse(PAGE, &ParserOptions::default()).unwrap();
    let adapter = parse(
        PAGE,
        &ParserOptions::default().with_tokenizer(TokenizerKind::Adapter),
    )
    .unwrap();
    assert_eq!(spans(&scanning), spans(&adapter));
    assert_eq!(scanning.diagnostics(), adapter.diagnostics());
}

fn adapter() -> ParserOptions {
    ParserOptions::default().with_tokenizer(TokenizerKind::Adapter)
}

#[test]
fn preprocessor_line_in_markup_stays_markup() {
    let text = "<p>\n#if false\n</p>\n@foo\n";
    let scanning = parse(text, &ParserOptions::default()).unwrap();
    let adapter = parse(text, &adapter()).unwrap();
    let tail = [
        (SpanKind::Transition, "@".to_owned()),
        (SpanKind::Code, "foo".to_owned()),
        (SpanKind::Markup, "\n".to_owned()),
    ];
    assert!(spans(&adapter).ends_with(&tail), "{:?}", spans(&adapter));
    assert_eq!(spans(&scanning), spans(&adapter));
    assert!(adapter.diagnostics().is_empty(), "{:?}", adapter.diagnostics());
}

#[test]
fn adapter_treats_disabled_lines_as_code() {
    // The `}` inside the `#if false` branch does not close the block.
    let text = "@{\n#if false\n}\n#endif\n}";
    let tree = parse(text, &adapter()).unwrap();
    assert_eq!(
        spans(&tree),
        vec![
            (SpanKind::Transition, "@".to_owned()),
            (SpanKind::MetaCode, "{".to_owned()),
            (SpanKind::Code, "\n#if false\n}\n#endif\n".to_owned()),
            (SpanKind::MetaCode, "}".to_owned()),
        ]
    );
    assert!(tree.diagnostics().is_empty(), "{:?}", tree.diagnostics());
    assert_eq!(tree.text(), text);
}

#[test]
fn diagnostics_are_ordered_by_position() {
    let tree = parse("@{ <div> @(a }", &ParserOptions::default()).unwrap();
    let starts: Vec<u32> = tree.diagnostics().iter().map(|d| d.span.start).collect();
    let mut sorted = starts.clone();
    sorted.sort_unstable();
    assert_eq!(starts, sorted);
    assert!(tree.has_errors());
}

#[test]
fn without_directives_names_are_expressions() {
    let tree = parse("@model Foo", &ParserOptions::empty()).unwrap();
    assert_eq!(
        spans(&tree),
        vec![
            (SpanKind::Transition, "@".to_owned()),
            (SpanKind::Code, "model".to_owned()),
            (SpanKind::Markup, " Foo".to_owned()),
        ]
    );
}

#[test]
fn extra_reserved_word() {
    let options = ParserOptions::default().with_reserved_word(Keyword::Static);
    let tree = parse("@static", &options).unwrap();
    let codes: Vec<ErrorCode> = tree.diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::ReservedWord]);
    assert_eq!(tree.diagnostics()[0].args, vec!["static".to_owned()]);
}

#[test]
fn cancelled_before_start() {
    let token = CancellationToken::new();
    token.cancel();
    let options = ParserOptions::default().with_cancellation(token);
    assert_eq!(parse(PAGE, &options), Err(ParseError::Cancelled));
    assert_eq!(ParseError::Cancelled.to_string(), "parse cancelled");
}

#[test]
fn uncancelled_token_is_ignored() {
    let options = ParserOptions::default().with_cancellation(CancellationToken::new());
    assert!(parse(PAGE, &options).is_ok());
}

#[test]
fn parse_source_text() {
    let source = SourceText::new("<p>@x</p>");
    let tree = parse_source(&source, &ParserOptions::default()).unwrap();
    assert_eq!(tree.text(), source.as_str());
    assert_eq!(tree.root().blocks().count(), 1);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn tree_reproduces_input(text in "[a-z@{}()<>/;:\"' \n*.]{0,40}") {
        for tokenizer in [TokenizerKind::Scanning, TokenizerKind::Adapter] {
            let options = ParserOptions::default().with_tokenizer(tokenizer);
            let tree = parse(&text, &options).unwrap();
            prop_assert_eq!(tree.text(), text.clone());
        }
    }

    // `#` only appears after other text on its line: a `#` that starts a
    // line in code is a preprocessor line to the adapter alone.
    #[test]
    fn tokenizers_build_the_same_tree(
        text in "([a-z@{}()<>/;:\"' \n\r*.$?!\\[\\]é]|x#){0,40}",
    ) {
        let scanning = parse(&text, &ParserOptions::default()).unwrap();
        let adapter = parse(&text, &adapter()).unwrap();
        prop_assert_eq!(spans(&scanning), spans(&adapter));
        prop_assert_eq!(scanning.diagnostics(), adapter.diagnostics());
        prop_assert_eq!(adapter.text(), text);
    }

    #[test]
    fn leading_directives_reproduce_input(text in "(@page \"/a\"\n)?[a-z@<>/ \n]{0,30}") {
        let options = ParserOptions::default().with_leading_directives(true);
        let tree = parse(&text, &options).unwrap();
        prop_assert_eq!(tree.text(), text);
    }
}
