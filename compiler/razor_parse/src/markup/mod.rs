//! Markup parser.
//!
//! Markup is parsed only as deeply as the code parser needs. Text,
//! whitespace and tags become markup spans; every `@` that starts code is
//! handed to the [`CodeHost`]. Elements are matched start tag to end tag
//! only when code asks for a markup block, because that is what decides
//! where the block ends. Attribute values are tracked so code inside them
//! knows where it is.

use razor_diagnostic::{Diagnostic, ErrorCode};
use razor_ir::{
    AcceptedCharacters, BlockKind, ChunkGenerator, MarkupTokenKind as M, Span, SpanKind, TokenKind,
};
use razor_lexer::{MarkupScanner, Token};
use razor_stack::ensure_sufficient_stack;
use tracing::{debug, trace};

use crate::comment::parse_razor_comment;
use crate::context::{ContextFlags, ParserContext};
use crate::host::{CodeHost, MarkupHost};
use crate::stream::TokenStream;

/// Elements that never have an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// `<text>`: a wrapper that is not part of the output.
const TEXT_TAG: &str = "text";

/// Where a run of content stops.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Until {
    End,
    /// Before the first `}` not matched by a `{` of the run.
    CloseBrace,
    /// After the next newline.
    EndOfLine,
}

/// How a tag ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum TagEnd {
    Open,
    SelfClosing,
    Unterminated,
}

/// An element whose end tag has not been seen yet.
#[derive(Clone, Debug)]
struct OpenTag {
    /// Lowercased name.
    name: String,
    /// The name in the start tag.
    span: Span,
    text_tag: bool,
}

/// Parser for the markup grammar.
pub struct MarkupParser<'src> {
    stream: TokenStream<MarkupScanner<'src>>,
}

impl<'src> MarkupParser<'src> {
    pub fn new(text: &'src str) -> Self {
        MarkupParser {
            stream: TokenStream::new(MarkupScanner::new(text)),
        }
    }

    pub(crate) fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.stream.into_diagnostics()
    }

    /// Parse the whole document into the root block.
    pub(crate) fn parse_document(&mut self, ctx: &mut ParserContext<'_>, code: &mut dyn CodeHost) {
        self.stream.reset_to(0);
        if ctx.options().parse_leading_directives {
            self.leading_directives(ctx, code);
        } else {
            self.content(ctx, code, Until::End);
        }
        self.flush(ctx);
        ctx.set_position(self.stream.position());
    }

    /// Directives at the top of the document, then everything else as one
    /// markup span.
    fn leading_directives(&mut self, ctx: &mut ParserContext<'_>, code: &mut dyn CodeHost) {
        loop {
            if ctx.is_aborted() {
                return;
            }
            self.stream.accept_while(|t| t.kind.is_trivia_space());
            match self.stream.current_kind() {
                Some(M::RazorCommentTransition) => self.comment(ctx),
                Some(M::Transition) if self.at_directive(ctx) => self.code(ctx, code),
                _ => break,
            }
        }
        debug!(position = self.stream.position(), "end of leading directives");
        self.stream.accept_while(|_| true);
    }

    /// `@` followed by a registered directive name or `using`.
    fn at_directive(&mut self, ctx: &ParserContext<'_>) -> bool {
        let Some(next) = self.stream.lookahead(1) else {
            return false;
        };
        if next.kind != M::Text {
            return false;
        }
        let word = next
            .text()
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .next()
            .unwrap_or_default();
        word == "using" || ctx.options().directive(word).is_some()
    }

    // ─── Content ────────────────────────────────────────────────────

    fn content(&mut self, ctx: &mut ParserContext<'_>, code: &mut dyn CodeHost, until: Until) {
        let mut braces = 0usize;
        while let Some(kind) = self.stream.current_kind() {
            if ctx.is_aborted() {
                break;
            }
            match kind {
                M::LeftBrace if until == Until::CloseBrace => {
                    braces += 1;
                    self.stream.accept_and_move_next();
                }
                M::RightBrace if until == Until::CloseBrace => {
                    if braces == 0 {
                        break;
                    }
                    braces -= 1;
                    self.stream.accept_and_move_next();
                }
                M::NewLine if until == Until::EndOfLine => {
                    self.stream.accept_and_move_next();
                    break;
                }
                M::Transition => self.transition(ctx, code),
                M::RazorCommentTransition => self.comment(ctx),
                M::OpenAngle => {
                    self.tag(ctx, code);
                }
                _ => {
                    self.stream.accept_and_move_next();
                }
            }
        }
    }

    /// Output pending markup.
    fn flush(&mut self, ctx: &mut ParserContext<'_>) -> bool {
        self.stream
            .configure(ChunkGenerator::Markup, AcceptedCharacters::ANY);
        self.stream.output(&mut ctx.builder, SpanKind::Markup)
    }

    fn comment(&mut self, ctx: &mut ParserContext<'_>) {
        self.flush(ctx);
        parse_razor_comment(&mut self.stream, &mut ctx.builder);
    }

    /// Accept the `@` at `current` as a transition span.
    fn output_transition(&mut self, ctx: &mut ParserContext<'_>) {
        self.flush(ctx);
        self.stream.accept_and_move_next();
        self.stream
            .configure(ChunkGenerator::None, AcceptedCharacters::NONE);
        self.stream.output(&mut ctx.builder, SpanKind::Transition);
    }

    // ─── Transitions ────────────────────────────────────────────────

    /// A `@` met in markup.
    fn transition(&mut self, ctx: &mut ParserContext<'_>, code: &mut dyn CodeHost) {
        if self.stream.lookahead_kind(1) == Some(M::Transition) {
            return self.escaped_transition(ctx);
        }
        if self.at_email() {
            trace!(position = self.stream.position(), "email address");
            self.stream.accept_and_move_next();
            return;
        }
        self.code(ctx, code);
    }

    /// `@@`: the first `@` is hidden, the second is markup.
    fn escaped_transition(&mut self, ctx: &mut ParserContext<'_>) {
        self.flush(ctx);
        self.stream.accept_and_move_next();
        self.stream
            .configure(ChunkGenerator::EscapedTransition, AcceptedCharacters::NONE);
        self.stream.output(&mut ctx.builder, SpanKind::MetaCode);
        self.stream.accept_and_move_next();
    }

    /// `name@host`: text ending in a letter or digit directly before the
    /// `@` and text directly after it.
    fn at_email(&mut self) -> bool {
        let after_word = self.stream.previous().is_some_and(|t| {
            t.kind == M::Text && t.text().chars().last().is_some_and(char::is_alphanumeric)
        });
        after_word && self.stream.lookahead_kind(1) == Some(M::Text)
    }

    /// Hand the document to the code parser at `current`, then resume
    /// wherever it stopped.
    fn code(&mut self, ctx: &mut ParserContext<'_>, code: &mut dyn CodeHost) {
        self.flush(ctx);
        let position = self.stream.position();
        debug!(position, "markup -> code");
        ctx.set_position(position);
        code.parse_block(ctx, self);
        let resumed = ctx.position();
        self.stream.reset_to(resumed);
        if resumed == position && !ctx.is_aborted() {
            // Nothing was taken; keep the `@` as markup.
            self.stream.accept_and_move_next();
        }
    }

    // ─── Tags ───────────────────────────────────────────────────────

    /// A tag at `current` (`<`) kept as markup, with no element matching.
    fn tag(&mut self, ctx: &mut ParserContext<'_>, code: &mut dyn CodeHost) -> TagEnd {
        self.stream.accept_and_move_next();
        if self.stream.at(M::Bang) && self.stream.lookahead_kind(1) == Some(M::DoubleHyphen) {
            return self.html_comment(ctx, code);
        }
        self.tag_body(ctx, code)
    }

    /// `<!-- ... -->` after the `<`. Code inside it is still code.
    fn html_comment(&mut self, ctx: &mut ParserContext<'_>, code: &mut dyn CodeHost) -> TagEnd {
        self.stream.accept_and_move_next();
        self.stream.accept_and_move_next();
        while let Some(kind) = self.stream.current_kind() {
            if ctx.is_aborted() {
                break;
            }
            match kind {
                M::DoubleHyphen if self.stream.lookahead_kind(1) == Some(M::CloseAngle) => {
                    self.stream.accept_and_move_next();
                    self.stream.accept_and_move_next();
                    return TagEnd::SelfClosing;
                }
                M::Transition => self.transition(ctx, code),
                M::RazorCommentTransition => self.comment(ctx),
                _ => {
                    self.stream.accept_and_move_next();
                }
            }
        }
        TagEnd::Unterminated
    }

    /// Attributes up to and including the `>` of a tag.
    fn tag_body(&mut self, ctx: &mut ParserContext<'_>, code: &mut dyn CodeHost) -> TagEnd {
        let mut quote = None;
        let mut in_value = false;
        let mut slash = false;
        while let Some(kind) = self.stream.current_kind() {
            if ctx.is_aborted() {
                break;
            }
            match kind {
                M::CloseAngle if quote.is_none() => {
                    self.stream.accept_and_move_next();
                    return if slash {
                        TagEnd::SelfClosing
                    } else {
                        TagEnd::Open
                    };
                }
                M::OpenAngle if quote.is_none() => break,
                M::DoubleQuote | M::SingleQuote => {
                    if quote == Some(kind) {
                        quote = None;
                        in_value = false;
                    } else if quote.is_none() && in_value {
                        quote = Some(kind);
                    }
                    self.stream.accept_and_move_next();
                }
                M::Equals if quote.is_none() => {
                    in_value = true;
                    self.stream.accept_and_move_next();
                }
                M::Whitespace | M::NewLine => {
                    self.stream.accept_and_move_next();
                }
                M::Transition => {
                    if in_value {
                        ctx.with_flag(ContextFlags::IN_ATTRIBUTE_VALUE, |ctx| {
                            self.transition(ctx, code);
                        });
                    } else {
                        self.transition(ctx, code);
                    }
                    in_value &= quote.is_some();
                }
                M::RazorCommentTransition => self.comment(ctx),
                _ => {
                    self.stream.accept_and_move_next();
                    in_value &= quote.is_some();
                }
            }
            if !kind.is_trivia_space() {
                slash = kind == M::ForwardSlash && quote.is_none();
            }
        }
        TagEnd::Unterminated
    }

    /// One element at `current` (`<`) and everything up to its end tag.
    fn element(&mut self, ctx: &mut ParserContext<'_>, code: &mut dyn CodeHost) {
        let mut open: Vec<OpenTag> = Vec::new();
        loop {
            if ctx.is_aborted() {
                return;
            }
            match self.stream.current_kind() {
                None => break,
                Some(M::OpenAngle) => match self.stream.lookahead_kind(1) {
                    Some(M::ForwardSlash) => self.end_tag(ctx, code, &mut open),
                    Some(M::Text) => self.start_tag(ctx, code, &mut open),
                    _ => {
                        self.tag(ctx, code);
                    }
                },
                Some(M::Transition) => self.transition(ctx, code),
                Some(M::RazorCommentTransition) => self.comment(ctx),
                Some(_) => {
                    self.stream.accept_and_move_next();
                }
            }
            if open.is_empty() {
                return;
            }
        }
        if let Some(outer) = open.first() {
            self.stream.report(
                Diagnostic::error(ErrorCode::MissingEndTag, outer.span).with_arg(&outer.name),
            );
        }
    }

    fn start_tag(
        &mut self,
        ctx: &mut ParserContext<'_>,
        code: &mut dyn CodeHost,
        open: &mut Vec<OpenTag>,
    ) {
        let Some(name) = self.stream.lookahead(1) else {
            return;
        };
        if name.text() == TEXT_TAG {
            return self.text_tag(ctx, &name, true, open);
        }
        let lowered = name.text().to_ascii_lowercase();
        trace!(name = %lowered, "start tag");
        self.stream.accept_and_move_next();
        self.stream.accept_and_move_next();
        let end = self.tag_body(ctx, code);
        if end == TagEnd::Open && !VOID_ELEMENTS.contains(&lowered.as_str()) {
            open.push(OpenTag {
                name: lowered,
                span: name.span(),
                text_tag: false,
            });
        }
    }

    /// `</name>`: closes the innermost open element of that name and every
    /// element opened inside it.
    fn end_tag(
        &mut self,
        ctx: &mut ParserContext<'_>,
        code: &mut dyn CodeHost,
        open: &mut Vec<OpenTag>,
    ) {
        let name = self.stream.lookahead(2).filter(|t| t.kind == M::Text);
        let lowered = name
            .as_ref()
            .map(|t| t.text().to_ascii_lowercase())
            .unwrap_or_default();
        let matched = open.iter().rposition(|tag| tag.name == lowered);
        let at = match &name {
            Some(token) => token.span(),
            None => self.current_span(),
        };
        trace!(name = %lowered, ?matched, "end tag");

        match (&name, matched) {
            (Some(token), Some(index)) if open[index].text_tag => {
                self.text_tag(ctx, token, false, open);
            }
            _ => {
                self.stream.accept_and_move_next();
                self.stream.accept_and_move_next();
                self.tag_body(ctx, code);
            }
        }

        match matched {
            Some(index) => open.truncate(index),
            None => self.stream.report(
                Diagnostic::error(ErrorCode::UnexpectedEndTag, at).with_arg(lowered),
            ),
        }
    }

    /// `<text>` or `</text>` at `current`: a transition inside a tag block.
    fn text_tag(
        &mut self,
        ctx: &mut ParserContext<'_>,
        name: &Token<M>,
        start: bool,
        open: &mut Vec<OpenTag>,
    ) {
        self.flush(ctx);
        ctx.builder.start_block(BlockKind::Tag, ChunkGenerator::None);
        self.stream.accept_and_move_next();
        if !start {
            self.stream.accept_and_move_next();
        }
        self.stream.accept_and_move_next();

        let mut attributes = false;
        let mut closed = false;
        let mut slash = false;
        while let Some(kind) = self.stream.current_kind() {
            match kind {
                M::CloseAngle => {
                    self.stream.accept_and_move_next();
                    closed = true;
                    break;
                }
                M::OpenAngle => break,
                M::Whitespace | M::NewLine => {}
                M::ForwardSlash => slash = true,
                _ => attributes = true,
            }
            self.stream.accept_and_move_next();
        }
        self.stream
            .configure(ChunkGenerator::None, AcceptedCharacters::NONE);
        self.stream.output(&mut ctx.builder, SpanKind::Transition);
        ctx.builder.end_block();

        if attributes {
            self.stream.report(Diagnostic::error(
                ErrorCode::TextTagCannotContainAttributes,
                name.span(),
            ));
        }
        if start && closed && !slash {
            open.push(OpenTag {
                name: TEXT_TAG.to_owned(),
                span: name.span(),
                text_tag: true,
            });
        }
    }

    /// Span of `current`, or an empty span at the end of input.
    fn current_span(&mut self) -> Span {
        let position = self.stream.position();
        self.stream
            .current()
            .map_or(Span::point(position), Token::span)
    }

    /// After a markup block in code, the rest of the line when it is blank.
    fn capture_trailing_whitespace(&mut self) {
        let spaces = self.stream.read_while(|t| t.kind == M::Whitespace);
        if self.stream.at(M::NewLine) {
            self.stream.accept_all(spaces);
            self.stream.accept_and_move_next();
        } else {
            self.stream.put_back_all(&spaces);
            self.stream.recycle(spaces);
        }
    }

    /// The markup block code asked for at `current`.
    fn markup_block(&mut self, ctx: &mut ParserContext<'_>, code: &mut dyn CodeHost) {
        match (self.stream.current_kind(), self.stream.lookahead_kind(1)) {
            // `@:` to the end of the line
            (Some(M::Transition), Some(M::Colon)) => {
                self.output_transition(ctx);
                self.stream.accept_and_move_next();
                self.stream
                    .configure(ChunkGenerator::None, AcceptedCharacters::ANY);
                self.stream.output(&mut ctx.builder, SpanKind::MetaCode);
                self.content(ctx, code, Until::EndOfLine);
            }
            (Some(M::Transition), Some(M::OpenAngle)) => {
                self.output_transition(ctx);
                self.element(ctx, code);
                self.capture_trailing_whitespace();
            }
            (Some(M::OpenAngle), _) => {
                self.element(ctx, code);
                self.capture_trailing_whitespace();
            }
            _ => self.content(ctx, code, Until::EndOfLine),
        }
    }
}

impl MarkupHost for MarkupParser<'_> {
    fn parse_markup_block(&mut self, ctx: &mut ParserContext<'_>, code: &mut dyn CodeHost) {
        ensure_sufficient_stack(|| {
            self.stream.reset_to(ctx.position());
            ctx.builder
                .start_block(BlockKind::Markup, ChunkGenerator::Markup);
            self.markup_block(ctx, code);
            self.flush(ctx);
            ctx.builder.end_block();
            ctx.set_position(self.stream.position());
        });
    }

    fn parse_template(&mut self, ctx: &mut ParserContext<'_>, code: &mut dyn CodeHost) {
        ensure_sufficient_stack(|| {
            self.stream.reset_to(ctx.position());
            ctx.builder
                .start_block(BlockKind::Template, ChunkGenerator::Template);
            ctx.builder
                .start_block(BlockKind::Markup, ChunkGenerator::Markup);
            if self.stream.at(M::Transition) {
                self.output_transition(ctx);
            }
            self.element(ctx, code);
            self.flush(ctx);
            ctx.builder.end_block();
            ctx.builder.end_block();
            ctx.set_position(self.stream.position());
        });
    }

    fn parse_razor_block(&mut self, ctx: &mut ParserContext<'_>, code: &mut dyn CodeHost) {
        ensure_sufficient_stack(|| {
            self.stream.reset_to(ctx.position());
            ctx.builder
                .start_block(BlockKind::Markup, ChunkGenerator::Markup);
            self.content(ctx, code, Until::CloseBrace);
            self.flush(ctx);
            ctx.builder.end_block();
            ctx.set_position(self.stream.position());
        });
    }
}

#[cfg(test)]
mod tests;
