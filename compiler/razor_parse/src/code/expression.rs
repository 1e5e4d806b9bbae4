//! Implicit (`@name.member(...)`) and explicit (`@(...)`) expressions.

use razor_ir::{
    AcceptedCharacters, BlockKind, ChunkGenerator, CodeTokenKind as K, Keyword, SpanKind,
};

use super::statement::EMBEDDED;
use super::{expression_context, CodeParser, Cx};
use crate::balance::BalancingParser;

impl CodeParser<'_> {
    /// `@( ... )`
    pub(super) fn explicit_expression(&mut self, cx: &mut Cx<'_, '_>) {
        cx.ctx
            .builder
            .start_block(BlockKind::ExplicitExpression, ChunkGenerator::Expression);
        self.output_transition(cx);
        let paren = self.current_span();
        self.output_meta(cx);

        let balanced = self.with_body(expression_context(AcceptedCharacters::ANY), |p| {
            let balanced = p.balance(cx, EMBEDDED, K::LeftParen, K::RightParen, paren);
            p.flush_or_marker(cx, SpanKind::MetaCode);
            balanced
        });

        if balanced {
            self.output_meta(cx);
        }
        cx.ctx.builder.end_block();
    }

    /// `@name` followed by member accesses, calls and indexers.
    pub(super) fn implicit_expression(&mut self, cx: &mut Cx<'_, '_>) {
        cx.ctx
            .builder
            .start_block(BlockKind::Expression, ChunkGenerator::Expression);
        self.output_transition(cx);
        self.with_body(
            expression_context(AcceptedCharacters::NON_WHITE_SPACE),
            |p| {
                p.implicit_expression_body(cx);
                p.flush_or_marker(cx, SpanKind::Transition);
            },
        );
        cx.ctx.builder.end_block();
    }

    /// `@@name`: the first `@` is hidden and the rest parsed as the
    /// implicit expression `@name`. Accepted without a diagnostic.
    pub(super) fn escaped_transition(&mut self, cx: &mut Cx<'_, '_>) {
        self.flush(cx);
        self.stream.accept_and_move_next();
        self.stream
            .configure(ChunkGenerator::EscapedTransition, AcceptedCharacters::NONE);
        self.output(cx, SpanKind::MetaCode);
        self.implicit_expression(cx);
    }

    /// Flush pending code; when nothing was output since the last span of
    /// kind `opener`, output a marker instead.
    fn flush_or_marker(&mut self, cx: &mut Cx<'_, '_>, opener: SpanKind) {
        if self.flush(cx) {
            return;
        }
        if cx.ctx.builder.last_span().is_some_and(|s| s.kind == opener) {
            let body = self.body.clone();
            self.stream.configure(body.chunk_generator, body.accepted);
            self.stream.output_marker(&mut cx.ctx.builder, SpanKind::Code);
        }
    }

    fn implicit_expression_body(&mut self, cx: &mut Cx<'_, '_>) {
        if self.stream.at(K::Keyword(Keyword::Await)) {
            self.stream.accept_and_move_next();
            self.stream.accept_while(|t| t.kind == K::Whitespace);
        }
        if !self.stream.current_kind().is_some_and(K::is_identifier_or_keyword) {
            return;
        }
        self.stream.accept_and_move_next();

        loop {
            match self.stream.current_kind() {
                Some(open @ (K::LeftParen | K::LeftBracket)) => {
                    let close = if open == K::LeftParen {
                        K::RightParen
                    } else {
                        K::RightBracket
                    };
                    let start = self.current_span();
                    self.stream.accept_and_move_next();
                    if !self.balance(cx, EMBEDDED, open, close, start) {
                        return;
                    }
                    self.stream.accept_and_move_next();
                }
                Some(K::Dot) => {
                    if !self.accept_member() {
                        return;
                    }
                }
                // `?.name` and `?[...]`
                Some(K::QuestionMark) => match self.stream.lookahead_kind(1) {
                    Some(K::Dot) if self.member_at(2) => {
                        self.stream.accept_and_move_next();
                        self.accept_member();
                    }
                    Some(K::LeftBracket) => {
                        self.stream.accept_and_move_next();
                    }
                    _ => return,
                },
                // Null-forgiving `!` before `.name` or `[...]`.
                Some(K::Not) => match self.stream.lookahead_kind(1) {
                    Some(K::Dot) if self.member_at(2) => {
                        self.stream.accept_and_move_next();
                    }
                    Some(K::LeftBracket) => {
                        self.stream.accept_and_move_next();
                    }
                    _ => return,
                },
                _ => return,
            }
        }
    }

    /// Whether the token `offset` places ahead is a member name.
    fn member_at(&mut self, offset: usize) -> bool {
        self.stream
            .lookahead_kind(offset)
            .is_some_and(K::is_identifier_or_keyword)
    }

    /// `.name` at `current`. A dot not followed by a name is left alone.
    fn accept_member(&mut self) -> bool {
        if !self.member_at(1) {
            return false;
        }
        self.stream.accept_and_move_next();
        self.stream.accept_and_move_next();
        true
    }
}
