//! Code parser.
//!
//! Entered at a transition (`@`) and responsible for everything up to the
//! end of the construct it introduces. The token after the transition
//! selects the construct:
//!
//! - `{` statement block, `(` explicit expression
//! - a registered directive name: directive block
//! - control keywords: a statement block holding the whole chain
//! - `using`: using statement or import
//! - reserved words: `ReservedWord`
//! - any other identifier or keyword: implicit expression
//! - `@`: an escaped transition, then an implicit expression
//! - anything else: an error and an empty expression
//!
//! Markup inside code is parsed by the [`MarkupHost`] handed in with every
//! call.

mod directive;
mod expression;
mod statement;

use razor_diagnostic::{Diagnostic, ErrorCode};
use razor_ir::{
    offset_u32, AcceptedCharacters, BlockKind, ChunkGenerator, CodeTokenKind as K, Keyword, Span,
    SpanKind, TokenKind,
};
use razor_lexer::{CodeTokenizer, Token, TokenizerKind};
use razor_stack::ensure_sufficient_stack;
use tracing::{debug, trace};

use crate::balance::BalancingParser;
use crate::comment::parse_razor_comment;
use crate::context::ParserContext;
use crate::host::{CodeHost, MarkupHost};
use crate::stream::{SpanContext, TokenStream};

/// What a code parse needs from outside itself: the shared state and the
/// markup parser to hand nested markup to.
pub(crate) struct Cx<'a, 'o> {
    pub ctx: &'a mut ParserContext<'o>,
    pub markup: &'a mut dyn MarkupHost,
}

/// Entry points on the markup side.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum MarkupEntry {
    Block,
    Template,
    RazorBlock,
}

/// Parser for the embedded code grammar.
pub struct CodeParser<'src> {
    stream: TokenStream<CodeTokenizer<'src>>,
    /// Span context for code flushed before a nested node: statement code
    /// inside blocks, expression code inside expressions.
    body: SpanContext,
    /// Parsing the single statement body of a control keyword.
    single_line: bool,
}

impl<'src> CodeParser<'src> {
    pub fn new(kind: TokenizerKind, text: &'src str) -> Self {
        CodeParser {
            stream: TokenStream::new(CodeTokenizer::new(kind, text)),
            body: statement_context(),
            single_line: false,
        }
    }

    pub(crate) fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.stream.into_diagnostics()
    }

    /// Parse the construct introduced by the transition at `current`.
    fn dispatch(&mut self, cx: &mut Cx<'_, '_>) {
        self.stream.split_transition();
        let Some(transition) = self.stream.current().cloned() else {
            return;
        };
        if transition.kind != K::Transition {
            return;
        }

        let Some(next) = self.stream.lookahead(1) else {
            let at = Span::point(transition.end());
            return self.recover(
                cx,
                Diagnostic::error(ErrorCode::UnexpectedEndOfFileAtStartOfCodeBlock, at),
            );
        };
        trace!(next = ?next.kind, start = transition.start, "dispatch");

        match next.kind {
            K::LeftBrace => self.statement_block(cx),
            K::LeftParen => self.explicit_expression(cx),
            K::Identifier | K::Keyword(_) => self.word(cx, &next),
            K::Transition => self.escaped_transition(cx),
            K::Whitespace | K::NewLine => self.recover(
                cx,
                Diagnostic::error(
                    ErrorCode::UnexpectedWhiteSpaceAtStartOfCodeBlock,
                    Span::point(next.start),
                ),
            ),
            _ => {
                let first = next.text().chars().next().unwrap_or('@');
                let at = Span::from_len(next.start, offset_u32(first.len_utf8()));
                self.recover(
                    cx,
                    Diagnostic::error(ErrorCode::UnexpectedCharacterAtStartOfCodeBlock, at)
                        .with_arg(first.to_string()),
                );
            }
        }
    }

    /// `@word`: directives, keywords and implicit expressions.
    fn word(&mut self, cx: &mut Cx<'_, '_>, next: &Token<K>) {
        let options = cx.ctx.options();
        if let Some(descriptor) = options.directive(next.text()) {
            return self.directive(cx, descriptor);
        }
        if let K::Keyword(keyword) = next.kind {
            if options.is_reserved(keyword) {
                return self.reserved_word(cx, keyword);
            }
            if keyword == Keyword::Using {
                return self.using(cx);
            }
            if keyword.is_control_flow() {
                return self.control_flow_block(cx, keyword);
            }
            if keyword.is_continuation() {
                self.stream.report(
                    Diagnostic::error(ErrorCode::UnexpectedContinuationKeyword, next.span())
                        .with_arg(keyword.as_str()),
                );
            }
        }
        self.implicit_expression(cx);
    }

    /// A transition that starts nothing: report, then emit an expression
    /// holding the transition and an empty code span.
    fn recover(&mut self, cx: &mut Cx<'_, '_>, diagnostic: Diagnostic) {
        debug!(code = %diagnostic.code, "recovering after transition");
        cx.ctx
            .builder
            .start_block(BlockKind::Expression, ChunkGenerator::Expression);
        self.output_transition(cx);
        self.stream.report(diagnostic);
        self.stream
            .configure(ChunkGenerator::Expression, AcceptedCharacters::NON_WHITE_SPACE);
        self.stream.output_marker(&mut cx.ctx.builder, SpanKind::Code);
        cx.ctx.builder.end_block();
    }

    // ─── Span helpers ───────────────────────────────────────────────

    fn output(&mut self, cx: &mut Cx<'_, '_>, kind: SpanKind) -> bool {
        self.stream.output(&mut cx.ctx.builder, kind)
    }

    /// Output pending code with the body span context.
    fn flush(&mut self, cx: &mut Cx<'_, '_>) -> bool {
        let body = self.body.clone();
        self.stream.configure(body.chunk_generator, body.accepted);
        self.output(cx, SpanKind::Code)
    }

    /// Accept the `@` at `current` as a transition span.
    fn output_transition(&mut self, cx: &mut Cx<'_, '_>) {
        self.flush(cx);
        self.stream.accept_and_move_next();
        self.stream
            .configure(ChunkGenerator::None, AcceptedCharacters::NONE);
        self.output(cx, SpanKind::Transition);
    }

    /// Accept `current` as a meta-code span that absorbs no edits.
    fn output_meta(&mut self, cx: &mut Cx<'_, '_>) {
        self.stream.accept_and_move_next();
        self.stream
            .configure(ChunkGenerator::None, AcceptedCharacters::NONE);
        self.output(cx, SpanKind::MetaCode);
    }

    /// Run `f` with `body` as the span context for flushed code.
    fn with_body<R>(&mut self, body: SpanContext, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = std::mem::replace(&mut self.body, body);
        let result = f(self);
        self.body = saved;
        result
    }

    // ─── Nested nodes ───────────────────────────────────────────────

    fn comment(&mut self, cx: &mut Cx<'_, '_>) {
        self.flush(cx);
        parse_razor_comment(&mut self.stream, &mut cx.ctx.builder);
    }

    /// Hand the document to the markup parser at `current`, then resume
    /// wherever it stopped.
    fn hand_off(&mut self, cx: &mut Cx<'_, '_>, entry: MarkupEntry) {
        self.flush(cx);
        let position = self.stream.position();
        debug!(?entry, position, "code -> markup");
        cx.ctx.set_position(position);
        match entry {
            MarkupEntry::Block => cx.markup.parse_markup_block(cx.ctx, self),
            MarkupEntry::Template => cx.markup.parse_template(cx.ctx, self),
            MarkupEntry::RazorBlock => cx.markup.parse_razor_block(cx.ctx, self),
        }
        self.stream.reset_to(cx.ctx.position());
    }

    /// Parse a transition met inside code as a nested code node.
    fn nested(&mut self, cx: &mut Cx<'_, '_>) {
        self.flush(cx);
        let saved = std::mem::take(&mut self.single_line);
        cx.ctx.enter_code();
        ensure_sufficient_stack(|| self.dispatch(cx));
        cx.ctx.exit_code();
        self.single_line = saved;
    }

    /// Tokens at `current` that separate statements, read without being
    /// accepted.
    fn read_trivia(&mut self) -> Vec<Token<K>> {
        self.stream
            .read_while(|t| t.kind.is_trivia_space() || t.kind.is_comment())
    }

    /// After a top-level block, take the rest of the line when it is blank.
    ///
    /// The captured whitespace and newline form a markup span that
    /// generates nothing.
    fn capture_trailing_whitespace(&mut self, cx: &mut Cx<'_, '_>) {
        if cx.ctx.is_nested_code() {
            return;
        }
        let spaces = self.stream.read_while(|t| t.kind == K::Whitespace);
        if self.stream.at(K::NewLine) {
            self.stream.accept_all(spaces);
            self.stream.accept_and_move_next();
            self.stream
                .configure(ChunkGenerator::None, AcceptedCharacters::NONE);
            self.output(cx, SpanKind::Markup);
        } else {
            self.stream.put_back_all(&spaces);
            self.stream.recycle(spaces);
        }
    }
}

fn statement_context() -> SpanContext {
    SpanContext {
        chunk_generator: ChunkGenerator::Statement,
        accepted: AcceptedCharacters::ANY,
    }
}

fn expression_context(accepted: AcceptedCharacters) -> SpanContext {
    SpanContext {
        chunk_generator: ChunkGenerator::Expression,
        accepted,
    }
}

impl CodeHost for CodeParser<'_> {
    fn parse_block(&mut self, ctx: &mut ParserContext<'_>, markup: &mut dyn MarkupHost) {
        ensure_sufficient_stack(|| {
            ctx.enter_code();
            debug!(position = ctx.position(), "markup -> code");
            self.stream.reset_to(ctx.position());
            let single_line = std::mem::take(&mut self.single_line);
            let body = std::mem::replace(&mut self.body, statement_context());
            let mut cx = Cx { ctx, markup };
            self.dispatch(&mut cx);
            self.flush(&mut cx);
            self.body = body;
            self.single_line = single_line;
            let position = self.stream.position();
            cx.ctx.set_position(position);
            cx.ctx.exit_code();
        });
    }
}

impl<'src, 'a, 'o> BalancingParser<Cx<'a, 'o>> for CodeParser<'src> {
    type Source = CodeTokenizer<'src>;

    fn stream(&mut self) -> &mut TokenStream<CodeTokenizer<'src>> {
        &mut self.stream
    }

    fn at_embedded_transition(&mut self, allow_transitions: bool) -> bool {
        match self.stream.current_kind() {
            Some(K::RazorCommentTransition) => true,
            Some(K::Transition) => match self.stream.lookahead_kind(1) {
                Some(K::LessThan | K::Colon) => true,
                Some(K::Identifier | K::Keyword(_) | K::LeftParen) => allow_transitions,
                _ => false,
            },
            _ => false,
        }
    }

    fn handle_embedded_transition(&mut self, cx: &mut Cx<'a, 'o>) {
        if self.stream.at(K::RazorCommentTransition) {
            return self.comment(cx);
        }
        match self.stream.lookahead_kind(1) {
            Some(K::LessThan) => self.hand_off(cx, MarkupEntry::Template),
            Some(K::Colon) => self.hand_off(cx, MarkupEntry::Block),
            _ => self.nested(cx),
        }
    }
}
