use super::*;
use pretty_assertions::assert_eq;
use razor_ir::ChunkGenerator;

use crate::options::CancellationToken;

#[test]
fn with_flag_restores_previous_value() {
    let options = ParserOptions::default();
    let mut ctx = ParserContext::new(&options);
    let inside = ctx.with_flag(ContextFlags::IN_SECTION, |ctx| {
        let nested = ctx.with_flag(ContextFlags::IN_SECTION, |ctx| ctx.has(ContextFlags::IN_SECTION));
        (nested, ctx.has(ContextFlags::IN_SECTION))
    });
    assert_eq!(inside, (true, true));
    assert!(!ctx.has(ContextFlags::IN_SECTION));
}

#[test]
fn directives_are_seen_once() {
    let options = ParserOptions::default();
    let mut ctx = ParserContext::new(&options);
    assert!(ctx.mark_directive_seen("page"));
    assert!(!ctx.mark_directive_seen("page"));
    assert!(ctx.mark_directive_seen("model"));
}

#[test]
fn top_level_tracks_open_blocks_and_code_depth() {
    let options = ParserOptions::default();
    let mut ctx = ParserContext::new(&options);
    ctx.enter_code();
    assert!(ctx.at_top_level());

    ctx.builder.start_block(BlockKind::Statement, ChunkGenerator::Statement);
    assert!(!ctx.at_top_level());
    ctx.builder.start_block(BlockKind::Markup, ChunkGenerator::None);
    assert!(!ctx.at_top_level());
    ctx.builder.end_block();
    ctx.builder.end_block();

    ctx.enter_code();
    assert!(ctx.is_nested_code());
    assert!(!ctx.at_top_level());
    ctx.exit_code();
    assert!(ctx.at_top_level());
}

#[test]
fn cancellation_sticks() {
    let token = CancellationToken::new();
    let options = ParserOptions::default().with_cancellation(token.clone());
    let mut ctx = ParserContext::new(&options);
    assert!(!ctx.check_cancelled());
    token.cancel();
    assert!(ctx.check_cancelled());
    assert!(ctx.is_aborted());
}

#[test]
fn missing_end_anchors_at_opener() {
    let block = BlockContext::new("if", Span::from_len(8, 1));
    let diagnostic = block.missing_end();
    assert_eq!(diagnostic.code, ErrorCode::ExpectedEndOfBlockBeforeEof);
    assert_eq!(diagnostic.span, Span::new(8, 9));
    assert_eq!(diagnostic.args, vec!["if".to_owned()]);
}
