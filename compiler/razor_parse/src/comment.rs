//! `@* ... *@` comment blocks, identical in both grammars.

use razor_ir::{AcceptedCharacters, BlockKind, ChunkGenerator, SpanKind, TokenKind};
use razor_lexer::Tokenizer;
use tracing::trace;

use crate::builder::TreeBuilder;
use crate::stream::TokenStream;

/// Parse a Razor comment at `current` into a comment block.
///
/// The block holds the opening transition and star, the body (absent for
/// an empty comment) and, when the comment is terminated, the closing star
/// and transition.
pub(crate) fn parse_razor_comment<T: Tokenizer>(
    stream: &mut TokenStream<T>,
    builder: &mut TreeBuilder,
) {
    let transition = <T::Kind as TokenKind>::RAZOR_COMMENT_TRANSITION;
    let star = <T::Kind as TokenKind>::RAZOR_COMMENT_STAR;
    let body = <T::Kind as TokenKind>::RAZOR_COMMENT;

    trace!(position = stream.position(), "razor comment");
    builder.start_block(BlockKind::Comment, ChunkGenerator::Comment);

    stream.configure(ChunkGenerator::None, AcceptedCharacters::NONE);
    stream.optional(transition);
    stream.output(builder, SpanKind::Transition);

    stream.configure(ChunkGenerator::None, AcceptedCharacters::NONE);
    stream.optional(star);
    stream.output(builder, SpanKind::MetaCode);

    stream.configure(ChunkGenerator::Comment, AcceptedCharacters::ANY);
    stream.optional(body);
    stream.output(builder, SpanKind::Comment);

    stream.configure(ChunkGenerator::None, AcceptedCharacters::NONE);
    stream.optional(star);
    stream.output(builder, SpanKind::MetaCode);

    stream.configure(ChunkGenerator::None, AcceptedCharacters::NONE);
    stream.optional(transition);
    stream.output(builder, SpanKind::Transition);

    builder.end_block();
}
