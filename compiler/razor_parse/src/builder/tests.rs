#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;
use razor_ir::{AcceptedCharacters, CodeTokenKind, SpanKind, SyntaxToken};

fn span(text: &'static str, start: u32) -> SpanNode {
    SpanNode {
        kind: SpanKind::Code,
        start,
        tokens: vec![SyntaxToken::new(CodeTokenKind::Identifier, text)],
        accepted: AcceptedCharacters::ANY,
        chunk_generator: ChunkGenerator::None,
    }
}

#[test]
fn nests_blocks_in_order() {
    let mut builder = TreeBuilder::new();
    builder.add_span(span("a", 0));
    builder.start_block(BlockKind::Statement, ChunkGenerator::Statement);
    builder.add_span(span("b", 1));
    assert_eq!(
        builder.open_kinds().collect::<Vec<_>>(),
        vec![BlockKind::Markup, BlockKind::Statement]
    );
    builder.end_block();
    builder.add_span(span("c", 2));

    let root = builder.finish();
    assert_eq!(root.text(), "abc");
    assert_eq!(root.children.len(), 3);
    assert_eq!(root.blocks().count(), 1);
}

#[test]
fn finish_closes_open_blocks() {
    let mut builder = TreeBuilder::new();
    builder.start_block(BlockKind::Directive, ChunkGenerator::None);
    builder.start_block(BlockKind::Markup, ChunkGenerator::None);
    builder.add_span(span("x", 0));
    let root = builder.finish();
    assert_eq!(root.descendants().len(), 2);
    assert_eq!(root.text(), "x");
}

#[test]
fn root_is_never_closed() {
    let mut builder = TreeBuilder::new();
    builder.end_block();
    builder.end_block();
    assert_eq!(builder.open_kinds().collect::<Vec<_>>(), vec![BlockKind::Markup]);
}
