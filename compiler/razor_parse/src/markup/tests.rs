#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;
use razor_ir::{DirectiveDescriptor, DirectiveKind};

use crate::options::ParserOptions;
use crate::tree::SyntaxTree;

fn parse(text: &str) -> SyntaxTree {
    crate::parse(text, &ParserOptions::default()).unwrap()
}

fn spans(tree: &SyntaxTree) -> Vec<(SpanKind, String)> {
    tree.root()
        .flatten()
        .iter()
        .map(|span| (span.kind, span.text()))
        .collect()
}

fn errors(tree: &SyntaxTree) -> Vec<(ErrorCode, Span)> {
    tree.diagnostics().iter().map(|d| (d.code, d.span)).collect()
}

fn s(kind: SpanKind, text: &str) -> (SpanKind, String) {
    (kind, text.to_owned())
}

#[test]
fn plain_markup_is_one_span() {
    let tree = parse("<p class=\"x\">Hello</p>\n");
    assert_eq!(spans(&tree), vec![s(SpanKind::Markup, "<p class=\"x\">Hello</p>\n")]);
    assert!(!tree.has_errors());
}

#[test]
fn email_address_stays_markup() {
    let tree = parse("a@b.com");
    assert_eq!(spans(&tree), vec![s(SpanKind::Markup, "a@b.com")]);
    assert!(tree.diagnostics().is_empty());
}

#[test]
fn transition_after_punctuation_is_code() {
    let tree = parse("(@x)");
    assert_eq!(
        spans(&tree),
        vec![
            s(SpanKind::Markup, "("),
            s(SpanKind::Transition, "@"),
            s(SpanKind::Code, "x"),
            s(SpanKind::Markup, ")"),
        ]
    );
}

#[test]
fn escaped_transition() {
    let tree = parse("@@foo");
    assert_eq!(
        spans(&tree),
        vec![s(SpanKind::MetaCode, "@"), s(SpanKind::Markup, "@foo")]
    );
    assert_eq!(
        tree.root().flatten()[0].chunk_generator,
        ChunkGenerator::EscapedTransition
    );
    assert!(tree.diagnostics().is_empty());
}

#[test]
fn razor_comment_in_markup() {
    let tree = parse("a @* b *@ c");
    assert_eq!(
        spans(&tree),
        vec![
            s(SpanKind::Markup, "a "),
            s(SpanKind::Transition, "@"),
            s(SpanKind::MetaCode, "*"),
            s(SpanKind::Comment, " b "),
            s(SpanKind::MetaCode, "*"),
            s(SpanKind::Transition, "@"),
            s(SpanKind::Markup, " c"),
        ]
    );
}

#[test]
fn code_inside_html_comment() {
    let tree = parse("<!-- @x -->");
    assert_eq!(
        spans(&tree),
        vec![
            s(SpanKind::Markup, "<!-- "),
            s(SpanKind::Transition, "@"),
            s(SpanKind::Code, "x"),
            s(SpanKind::Markup, " -->"),
        ]
    );
}

#[test]
fn expression_in_quoted_attribute_value() {
    let tree = parse("<a href=\"@url\">");
    assert_eq!(
        spans(&tree),
        vec![
            s(SpanKind::Markup, "<a href=\""),
            s(SpanKind::Transition, "@"),
            s(SpanKind::Code, "url"),
            s(SpanKind::Markup, "\">"),
        ]
    );
}

#[test]
fn directive_in_attribute_value() {
    let flag = DirectiveDescriptor::builder("flag", DirectiveKind::SingleLine)
        .build()
        .unwrap();
    let options = ParserOptions::default().with_directive(flag);
    let tree = crate::parse("<p title=@flag>", &options).unwrap();
    let codes: Vec<ErrorCode> = tree.diagnostics().iter().map(|d| d.code).collect();
    assert!(codes.contains(&ErrorCode::DirectiveNotAllowedInAttribute));
    assert_eq!(tree.text(), "<p title=@flag>");
}

// ─── Elements in code ───────────────────────────────────────────────

#[test]
fn nested_elements_end_at_matching_tag() {
    let tree = parse("@{ <div><p>a</p><br></div> }");
    assert_eq!(
        spans(&tree),
        vec![
            s(SpanKind::Transition, "@"),
            s(SpanKind::MetaCode, "{"),
            s(SpanKind::Code, " "),
            s(SpanKind::Markup, "<div><p>a</p><br></div>"),
            s(SpanKind::Code, " "),
            s(SpanKind::MetaCode, "}"),
        ]
    );
    assert!(tree.diagnostics().is_empty());
}

#[test]
fn end_tags_match_case_insensitively() {
    let tree = parse("@{ <DIV></div> }");
    assert!(tree.diagnostics().is_empty());
}

#[test]
fn self_closing_element() {
    let tree = parse("@{ <br/> x(); }");
    assert_eq!(spans(&tree)[3], s(SpanKind::Markup, "<br/>"));
    assert_eq!(spans(&tree)[4], s(SpanKind::Code, " x(); "));
}

#[test]
fn trailing_whitespace_line_joins_markup_block() {
    let tree = parse("@{\n    <p>x</p>   \n}");
    assert_eq!(
        spans(&tree),
        vec![
            s(SpanKind::Transition, "@"),
            s(SpanKind::MetaCode, "{"),
            s(SpanKind::Code, "\n    "),
            s(SpanKind::Markup, "<p>x</p>   \n"),
            s(SpanKind::MetaCode, "}"),
        ]
    );
}

#[test]
fn unclosed_element() {
    let tree = parse("@{ <div> }");
    assert_eq!(
        errors(&tree),
        vec![
            (ErrorCode::ExpectedEndOfBlockBeforeEof, Span::new(1, 2)),
            (ErrorCode::MissingEndTag, Span::new(4, 7)),
        ]
    );
    assert_eq!(tree.diagnostics()[1].args, vec!["div".to_owned()]);
}

#[test]
fn only_outermost_unclosed_element_is_reported() {
    let tree = parse("@{ <div><span> }");
    let missing: Vec<_> = tree
        .diagnostics()
        .iter()
        .filter(|d| d.code == ErrorCode::MissingEndTag)
        .collect();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].span, Span::new(4, 7));
}

#[test]
fn end_tag_closes_inner_elements() {
    let tree = parse("@{ <div><span></div> }");
    assert!(tree.diagnostics().is_empty());
}

#[test]
fn stray_end_tag() {
    let tree = parse("@{ </p> }");
    assert_eq!(errors(&tree), vec![(ErrorCode::UnexpectedEndTag, Span::new(5, 6))]);
    assert_eq!(tree.diagnostics()[0].args, vec!["p".to_owned()]);
    assert_eq!(tree.text(), "@{ </p> }");
}

#[test]
fn text_tag_is_a_transition() {
    let tree = parse("@{ <text>hi</text> }");
    assert_eq!(
        spans(&tree),
        vec![
            s(SpanKind::Transition, "@"),
            s(SpanKind::MetaCode, "{"),
            s(SpanKind::Code, " "),
            s(SpanKind::Transition, "<text>"),
            s(SpanKind::Markup, "hi"),
            s(SpanKind::Transition, "</text>"),
            s(SpanKind::Code, " "),
            s(SpanKind::MetaCode, "}"),
        ]
    );
    let tags = tree
        .root()
        .descendants()
        .iter()
        .filter(|b| b.kind == BlockKind::Tag)
        .count();
    assert_eq!(tags, 2);
}

#[test]
fn text_tag_with_attributes() {
    let tree = parse("@{ <text a>hi</text> }");
    assert_eq!(
        errors(&tree),
        vec![(ErrorCode::TextTagCannotContainAttributes, Span::new(4, 8))]
    );
}

#[test]
fn single_line_markup_ends_at_newline() {
    let tree = parse("@{ @:a <b>\nc(); }");
    let flat = spans(&tree);
    assert!(flat.contains(&s(SpanKind::Markup, "a <b>\n")));
    assert!(flat.contains(&s(SpanKind::Code, "c(); ")));
    assert!(tree.diagnostics().is_empty());
}

// ─── Sections and leading directives ────────────────────────────────

#[test]
fn section_body_balances_braces() {
    let tree = parse("@section S { a { b } c }");
    assert!(spans(&tree).contains(&s(SpanKind::Markup, " a { b } c ")));
    assert_eq!(spans(&tree).last(), Some(&s(SpanKind::MetaCode, "}")));
}

#[test]
fn leading_directives_only() {
    let options = ParserOptions::default().with_leading_directives(true);
    let text = "@page \"/a\"\n@model Foo\n<p>@x</p>";
    let tree = crate::parse(text, &options).unwrap();
    assert_eq!(
        spans(&tree).last(),
        Some(&s(SpanKind::Markup, "<p>@x</p>"))
    );
    let directives = tree
        .root()
        .blocks()
        .filter(|b| b.kind == BlockKind::Directive)
        .count();
    assert_eq!(directives, 2);
    assert!(tree.diagnostics().is_empty());
    assert_eq!(tree.text(), text);
}

#[test]
fn leading_directives_stop_at_expression() {
    let options = ParserOptions::default().with_leading_directives(true);
    let tree = crate::parse("@x @model Foo", &options).unwrap();
    assert_eq!(spans(&tree), vec![s(SpanKind::Markup, "@x @model Foo")]);
}
