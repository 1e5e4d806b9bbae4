//! Statement blocks, control flow and statement bodies.
//!
//! Statement bodies are not parsed as the code grammar would parse them:
//! the parser only needs to know where each statement ends, where nested
//! blocks open and close, and where markup starts.

use razor_diagnostic::{Diagnostic, ErrorCode};
use razor_ir::{
    AcceptedCharacters, BlockKind, ChunkGenerator, CodeTokenKind as K, Keyword, Span, SpanKind,
    TokenKind,
};
use razor_lexer::Token;
use tracing::trace;

use super::{statement_context, CodeParser, Cx, MarkupEntry};
use crate::balance::{BalancingModes, BalancingParser};
use crate::context::BlockContext;

/// Modes for brackets inside code: comments, templates and nested
/// expressions become nodes of their own.
pub(super) const EMBEDDED: BalancingModes = BalancingModes::ALLOW_COMMENTS_AND_TEMPLATES
    .union(BalancingModes::ALLOW_EMBEDDED_TRANSITIONS);

impl CodeParser<'_> {
    /// `@{ ... }`
    pub(super) fn statement_block(&mut self, cx: &mut Cx<'_, '_>) {
        cx.ctx
            .builder
            .start_block(BlockKind::Statement, ChunkGenerator::Statement);
        self.output_transition(cx);
        let brace = self.current_span();
        self.output_meta(cx);

        self.with_body(statement_context(), |p| {
            p.block_statements(cx);
            p.flush(cx);
        });

        if self.stream.at(K::RightBrace) {
            self.output_meta(cx);
            self.capture_trailing_whitespace(cx);
        } else {
            self.stream
                .report(BlockContext::new("code", brace).missing_end());
            self.stream
                .configure(ChunkGenerator::None, AcceptedCharacters::ANY);
            self.stream
                .output_marker(&mut cx.ctx.builder, SpanKind::MetaCode);
        }
        cx.ctx.builder.end_block();
    }

    /// `@if (...) { ... }` and the other control keywords after a
    /// transition: one statement block holding the whole chain.
    pub(super) fn control_flow_block(&mut self, cx: &mut Cx<'_, '_>, keyword: Keyword) {
        cx.ctx
            .builder
            .start_block(BlockKind::Statement, ChunkGenerator::Statement);
        self.output_transition(cx);
        self.with_body(statement_context(), |p| {
            p.control_flow(cx, keyword, true);
            p.flush(cx);
        });
        self.capture_trailing_whitespace(cx);
        cx.ctx.builder.end_block();
    }

    /// Statements inside braces; a single-statement context does not carry
    /// into them.
    fn block_statements(&mut self, cx: &mut Cx<'_, '_>) {
        let saved = std::mem::take(&mut self.single_line);
        self.statements(cx);
        self.single_line = saved;
    }

    /// Statements up to an unmatched `}` or the end of input.
    pub(super) fn statements(&mut self, cx: &mut Cx<'_, '_>) {
        while !self.stream.at_end() && !self.stream.at(K::RightBrace) && !cx.ctx.is_aborted() {
            let before = self.stream.position();
            self.statement(cx);
            if self.stream.position() == before && !cx.ctx.is_aborted() {
                // Nothing applied; take the token as code.
                self.stream.accept_and_move_next();
            }
        }
    }

    /// One statement, or one piece of trivia between statements.
    fn statement(&mut self, cx: &mut Cx<'_, '_>) {
        let Some(kind) = self.stream.current_kind() else {
            return;
        };
        match kind {
            K::Whitespace | K::NewLine => {
                self.stream.accept_and_move_next();
            }
            kind if kind.is_comment() => {
                self.stream.accept_and_move_next();
            }
            K::RazorCommentTransition => self.comment(cx),
            K::Transition => self.transition_in_code(cx),
            K::LessThan if self.at_markup_start() => self.markup_statement(cx),
            K::LeftBrace => self.nested_braces(cx),
            K::Keyword(keyword) if keyword.is_control_flow() => {
                self.control_flow(cx, keyword, false);
            }
            K::Keyword(Keyword::Case | Keyword::Default) if self.at_label() => self.label(),
            _ => self.plain_statement(cx),
        }
    }

    /// `<` followed by a tag name, `/` or `!`.
    fn at_markup_start(&mut self) -> bool {
        matches!(
            self.stream.lookahead_kind(1),
            Some(K::Identifier | K::Keyword(_) | K::Slash | K::Not)
        )
    }

    fn markup_statement(&mut self, cx: &mut Cx<'_, '_>) {
        if self.single_line {
            let at = self.current_span();
            self.stream.report(Diagnostic::error(
                ErrorCode::SingleLineControlFlowStatementsCannotContainMarkup,
                at,
            ));
        }
        self.hand_off(cx, MarkupEntry::Block);
    }

    /// A transition inside a statement body.
    pub(super) fn transition_in_code(&mut self, cx: &mut Cx<'_, '_>) {
        let transition = self.current_span();
        let Some(next) = self.stream.lookahead(1) else {
            return self.nested(cx);
        };
        trace!(next = ?next.kind, "transition in code");
        match next.kind {
            K::Transition => {
                // `@@`: the first `@` is hidden, the second is code.
                self.flush(cx);
                self.stream.accept_and_move_next();
                self.stream
                    .configure(ChunkGenerator::None, AcceptedCharacters::ANY);
                self.output(cx, SpanKind::Code);
                self.stream.accept_and_move_next();
            }
            K::LessThan | K::Colon => {
                if self.single_line {
                    self.stream.report(Diagnostic::error(
                        ErrorCode::SingleLineControlFlowStatementsCannotContainMarkup,
                        transition,
                    ));
                }
                self.hand_off(cx, MarkupEntry::Block);
            }
            K::LeftBrace => {
                self.stream.report(Diagnostic::error(
                    ErrorCode::UnexpectedNestedCodeBlock,
                    transition.merge(next.span()),
                ));
                self.nested(cx);
            }
            K::Keyword(keyword)
                if (keyword.is_control_flow() || keyword.is_continuation())
                    && cx.ctx.options().directive(next.text()).is_none() =>
            {
                self.stream.report(
                    Diagnostic::error(ErrorCode::UnexpectedKeywordAfterAt, next.span())
                        .with_arg(keyword.as_str()),
                );
                // Hide the `@`; the keyword is parsed as the statement it
                // starts.
                self.flush(cx);
                self.stream.accept_and_move_next();
                self.stream
                    .configure(ChunkGenerator::None, AcceptedCharacters::ANY);
                self.output(cx, SpanKind::Code);
            }
            _ => self.nested(cx),
        }
    }

    /// A free-standing `{ ... }` inside a statement body.
    fn nested_braces(&mut self, cx: &mut Cx<'_, '_>) {
        let brace = self.current_span();
        self.stream.accept_and_move_next();
        self.block_statements(cx);
        if !self.stream.optional(K::RightBrace) {
            self.stream
                .report(BlockContext::new("code", brace).missing_end());
        }
    }

    /// A control keyword at `current` and everything chained to it.
    ///
    /// At the top level the condition ends its own code span.
    pub(super) fn control_flow(&mut self, cx: &mut Cx<'_, '_>, keyword: Keyword, top_level: bool) {
        trace!(keyword = keyword.as_str(), top_level, "control flow");
        match keyword {
            Keyword::If => self.if_statement(cx, top_level),
            Keyword::Try => self.try_statement(cx),
            Keyword::Do => self.do_statement(cx),
            Keyword::Using if !self.using_has_condition() => self.plain_statement(cx),
            _ => {
                if self.condition(cx, keyword, top_level) {
                    self.body(cx, keyword);
                }
            }
        }
    }

    /// `using (` rather than a `using` declaration.
    fn using_has_condition(&mut self) -> bool {
        match self.stream.lookahead_kind(1) {
            Some(K::LeftParen) => true,
            Some(K::Whitespace) => self.stream.lookahead_kind(2) == Some(K::LeftParen),
            _ => false,
        }
    }

    /// The keyword at `current` and its parenthesized condition. `false`
    /// when the condition is missing or never closed.
    fn condition(&mut self, cx: &mut Cx<'_, '_>, keyword: Keyword, top_level: bool) -> bool {
        let keyword_span = self.current_span();
        self.stream.accept_and_move_next();
        self.accept_trivia();
        if !self.stream.at(K::LeftParen) {
            self.stream.report(
                Diagnostic::error(ErrorCode::ExpectedOpenParenAfterKeyword, keyword_span)
                    .with_arg(keyword.as_str()),
            );
            return false;
        }
        if !self.parenthesized(cx, BalancingModes::ALLOW_COMMENTS_AND_TEMPLATES) {
            return false;
        }
        if top_level {
            self.flush(cx);
        }
        true
    }

    /// Balance the `(` at `current` and accept the closer.
    pub(super) fn parenthesized(&mut self, cx: &mut Cx<'_, '_>, modes: BalancingModes) -> bool {
        let paren = self.current_span();
        self.stream.accept_and_move_next();
        if !self.balance(cx, modes, K::LeftParen, K::RightParen, paren) {
            return false;
        }
        self.stream.accept_and_move_next();
        true
    }

    /// The body of a control keyword: a braced block or a single statement.
    fn body(&mut self, cx: &mut Cx<'_, '_>, keyword: Keyword) {
        self.accept_trivia();
        while self.stream.at(K::RazorCommentTransition) {
            self.comment(cx);
            self.accept_trivia();
        }
        match self.stream.current_kind() {
            Some(K::LeftBrace) => {
                let brace = self.current_span();
                self.stream.accept_and_move_next();
                self.block_statements(cx);
                if !self.stream.optional(K::RightBrace) {
                    self.stream
                        .report(BlockContext::new(keyword.as_str(), brace).missing_end());
                }
            }
            Some(_) => {
                let saved = std::mem::replace(&mut self.single_line, true);
                self.statement(cx);
                self.single_line = saved;
            }
            None => {}
        }
    }

    /// `if (...) ...` with its `else if` and `else` branches.
    fn if_statement(&mut self, cx: &mut Cx<'_, '_>, top_level: bool) {
        if !self.condition(cx, Keyword::If, top_level) {
            return;
        }
        self.body(cx, Keyword::If);
        loop {
            if !self.accept_if_follows(Keyword::Else) {
                return;
            }
            if self.accept_trivia_before(K::Keyword(Keyword::If)) {
                if !self.condition(cx, Keyword::If, false) {
                    return;
                }
                self.body(cx, Keyword::If);
            } else {
                self.body(cx, Keyword::Else);
                return;
            }
        }
    }

    /// `try { } catch (...) when (...) { } finally { }`
    fn try_statement(&mut self, cx: &mut Cx<'_, '_>) {
        self.stream.accept_and_move_next();
        self.body(cx, Keyword::Try);
        loop {
            if self.accept_if_follows(Keyword::Catch) {
                if self.accept_trivia_before(K::LeftParen)
                    && !self.parenthesized(cx, BalancingModes::ALLOW_COMMENTS_AND_TEMPLATES)
                {
                    return;
                }
                if self.accept_trivia_before_when()
                    && self.accept_trivia_before(K::LeftParen)
                    && !self.parenthesized(cx, BalancingModes::ALLOW_COMMENTS_AND_TEMPLATES)
                {
                    return;
                }
                self.body(cx, Keyword::Catch);
            } else if self.accept_if_follows(Keyword::Finally) {
                self.body(cx, Keyword::Finally);
                return;
            } else {
                return;
            }
        }
    }

    /// `do { } while (...);`
    fn do_statement(&mut self, cx: &mut Cx<'_, '_>) {
        self.stream.accept_and_move_next();
        self.body(cx, Keyword::Do);
        let trivia = self.read_trivia();
        if !self.stream.at(K::Keyword(Keyword::While)) {
            self.stream.put_back_all(&trivia);
            self.stream.recycle(trivia);
            return;
        }
        self.stream.accept_all(trivia);
        if !self.condition(cx, Keyword::While, false) {
            return;
        }
        let spaces = self.stream.read_while(|t| t.kind == K::Whitespace);
        if self.stream.at(K::Semicolon) {
            self.stream.accept_all(spaces);
            self.stream.accept_and_move_next();
        } else {
            self.stream.put_back_all(&spaces);
            self.stream.recycle(spaces);
        }
    }

    /// Accept trivia and `keyword` when `keyword` is the next significant
    /// token; otherwise leave the stream untouched.
    fn accept_if_follows(&mut self, keyword: Keyword) -> bool {
        if self.accept_trivia_before(K::Keyword(keyword)) {
            self.stream.accept_and_move_next();
            true
        } else {
            false
        }
    }

    /// Accept trivia when `kind` follows it; `current` is then `kind`.
    fn accept_trivia_before(&mut self, kind: K) -> bool {
        let trivia = self.read_trivia();
        if self.stream.at(kind) {
            self.stream.accept_all(trivia);
            true
        } else {
            self.stream.put_back_all(&trivia);
            self.stream.recycle(trivia);
            false
        }
    }

    /// `when` of an exception filter.
    fn accept_trivia_before_when(&mut self) -> bool {
        let trivia = self.read_trivia();
        let when = self.stream.at(K::Keyword(Keyword::When));
        if when {
            self.stream.accept_all(trivia);
            self.stream.accept_and_move_next();
        } else {
            self.stream.put_back_all(&trivia);
            self.stream.recycle(trivia);
        }
        when
    }

    pub(super) fn accept_trivia(&mut self) {
        self.stream
            .accept_while(|t| t.kind.is_trivia_space() || t.kind.is_comment());
    }

    /// `case` always starts a label; `default` only before `:`.
    fn at_label(&mut self) -> bool {
        if self.stream.at(K::Keyword(Keyword::Case)) {
            return true;
        }
        match self.stream.lookahead_kind(1) {
            Some(K::Colon) => true,
            Some(K::Whitespace) => self.stream.lookahead_kind(2) == Some(K::Colon),
            _ => false,
        }
    }

    /// `case ...:` or `default:`
    fn label(&mut self) {
        self.stream.accept_and_move_next();
        while let Some(kind) = self.stream.current_kind() {
            match kind {
                K::Colon => {
                    self.stream.accept_and_move_next();
                    return;
                }
                K::Semicolon | K::LeftBrace | K::RightBrace => return,
                _ => {
                    self.stream.accept_and_move_next();
                }
            }
        }
    }

    /// A statement ending at `;` outside brackets, or before an unmatched
    /// `}`.
    fn plain_statement(&mut self, cx: &mut Cx<'_, '_>) {
        while let Some(kind) = self.stream.current_kind() {
            if cx.ctx.is_aborted() {
                return;
            }
            match kind {
                K::Semicolon => {
                    self.stream.accept_and_move_next();
                    return;
                }
                K::RightBrace => return,
                K::LeftParen | K::LeftBracket | K::LeftBrace => {
                    let close = closer(kind);
                    let open = self.current_span();
                    self.stream.accept_and_move_next();
                    if !self.balance(cx, EMBEDDED, kind, close, open) {
                        return;
                    }
                    self.stream.accept_and_move_next();
                }
                K::RazorCommentTransition => self.comment(cx),
                K::Transition if self.stream.lookahead_kind(1) == Some(K::LessThan) => {
                    self.hand_off(cx, MarkupEntry::Template);
                }
                K::Transition => self.transition_in_code(cx),
                _ => {
                    self.stream.accept_and_move_next();
                }
            }
        }
    }

    /// Span of `current`, or an empty span at the end of input.
    pub(super) fn current_span(&mut self) -> Span {
        let position = self.stream.position();
        self.stream
            .current()
            .map_or(Span::point(position), Token::span)
    }
}

fn closer(open: K) -> K {
    match open {
        K::LeftParen => K::RightParen,
        K::LeftBracket => K::RightBracket,
        _ => K::RightBrace,
    }
}
