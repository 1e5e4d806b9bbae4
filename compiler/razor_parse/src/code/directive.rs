//! Directives, `@using` and reserved words.
//!
//! A directive is driven entirely by its [`DirectiveDescriptor`]: the name
//! as meta code, each typed token as its own code span preceded by a
//! whitespace span, then the body the descriptor's kind calls for.
//! Diagnostics raised while parsing a directive are collected in their own
//! scope and also attached to the directive block.

use razor_diagnostic::{Diagnostic, ErrorCode};
use razor_ir::{
    AcceptedCharacters, BlockKind, ChunkGenerator, CodeTokenKind as K, DirectiveDescriptor,
    DirectiveKind, DirectiveTokenKind, DirectiveUsage, Keyword, Span, SpanKind, TokenKind,
};
use tracing::debug;

use super::{statement_context, CodeParser, Cx, MarkupEntry};
use crate::balance::{BalancingModes, BalancingParser};
use crate::context::{BlockContext, ContextFlags};

const SECTION: &str = "section";

/// Modes for brackets inside directive tokens: a token that does not close
/// is reported as a malformed token, not as a bracket error.
const PROBE: BalancingModes =
    BalancingModes::BACKTRACK_ON_FAILURE.union(BalancingModes::NO_ERROR_ON_FAILURE);

fn expected(kind: DirectiveTokenKind) -> ErrorCode {
    match kind {
        DirectiveTokenKind::Type => ErrorCode::DirectiveExpectsTypeName,
        DirectiveTokenKind::Namespace => ErrorCode::DirectiveExpectsNamespace,
        DirectiveTokenKind::Member => ErrorCode::DirectiveExpectsIdentifier,
        DirectiveTokenKind::String => ErrorCode::DirectiveExpectsQuotedStringLiteral,
        DirectiveTokenKind::Boolean => ErrorCode::DirectiveExpectsBooleanLiteral,
        DirectiveTokenKind::Attribute => ErrorCode::DirectiveExpectsCSharpAttribute,
        DirectiveTokenKind::GenericTypeConstraint => {
            ErrorCode::DirectiveExpectsGenericTypeConstraint
        }
        DirectiveTokenKind::IdentifierOrExpression => {
            ErrorCode::DirectiveExpectsIdentifierOrExpression
        }
    }
}

impl CodeParser<'_> {
    /// A registered directive; `current` is the transition.
    pub(super) fn directive(&mut self, cx: &mut Cx<'_, '_>, descriptor: &DirectiveDescriptor) {
        if cx.ctx.check_cancelled() {
            return;
        }
        let name = descriptor.directive.as_str();
        debug!(directive = name, kind = ?descriptor.kind, "directive");

        self.stream.errors_mut().push_scope();
        let at_top_level = cx.ctx.at_top_level();
        cx.ctx.builder.start_block(
            BlockKind::Directive,
            ChunkGenerator::Directive {
                name: name.to_owned(),
            },
        );
        self.output_transition(cx);
        let name_span = self.current_span();
        self.output_meta(cx);
        self.check_placement(cx, descriptor, name_span, at_top_level);

        if self.directive_tokens(cx, descriptor) {
            match descriptor.kind {
                DirectiveKind::SingleLine => self.end_of_line(cx, name),
                DirectiveKind::RazorBlock | DirectiveKind::CodeBlock => {
                    self.directive_body(cx, descriptor);
                }
            }
        }

        let diagnostics = self.stream.errors_mut().pop_scope();
        cx.ctx.builder.attach_diagnostics(diagnostics.clone());
        self.stream.errors_mut().extend(diagnostics);
        cx.ctx.builder.end_block();
    }

    /// Policy checks that do not affect how the directive is parsed.
    fn check_placement(
        &mut self,
        cx: &mut Cx<'_, '_>,
        descriptor: &DirectiveDescriptor,
        at: Span,
        at_top_level: bool,
    ) {
        let name = descriptor.directive.as_str();
        let mut report = |code| {
            self.stream
                .report(Diagnostic::error(code, at).with_arg(name));
        };
        if cx.ctx.has(ContextFlags::IN_ATTRIBUTE_VALUE) {
            report(ErrorCode::DirectiveNotAllowedInAttribute);
        }
        if name == SECTION && cx.ctx.has(ContextFlags::IN_SECTION) {
            report(ErrorCode::SectionsCannotBeNested);
        }
        if descriptor.is_file_scoped() && !at_top_level {
            report(ErrorCode::DirectiveMustAppearAtTopLevel);
        }
        if descriptor.usage == DirectiveUsage::FileScopedSinglyOccurring
            && !cx.ctx.mark_directive_seen(name)
        {
            report(ErrorCode::DuplicateDirective);
        }
    }

    /// The typed tokens. `false` when one is malformed; the rest of the
    /// directive is then abandoned.
    fn directive_tokens(&mut self, cx: &mut Cx<'_, '_>, descriptor: &DirectiveDescriptor) -> bool {
        let name = descriptor.directive.as_str();
        for (index, token) in descriptor.tokens.iter().enumerate() {
            let spaces = self.stream.read_while(|t| t.kind == K::Whitespace);
            let at_line_end = matches!(self.stream.current_kind(), None | Some(K::NewLine));
            if token.optional && (at_line_end || self.stream.at(K::Semicolon)) {
                self.stream.put_back_all(&spaces);
                self.stream.recycle(spaces);
                return true;
            }
            if spaces.is_empty() && !at_line_end {
                self.stream.recycle(spaces);
                let at = self.current_span();
                self.stream.report(
                    Diagnostic::error(ErrorCode::DirectiveTokensMustBeSeparatedByWhitespace, at)
                        .with_arg(name),
                );
                return false;
            }
            self.stream.accept_all(spaces);
            self.stream
                .configure(ChunkGenerator::None, AcceptedCharacters::WHITE_SPACE);
            self.output(cx, SpanKind::Markup);

            let at = self.current_span();
            if !self.directive_token(cx, token.kind) {
                debug!(directive = name, index, kind = %token.kind, "malformed directive token");
                self.stream
                    .report(Diagnostic::error(expected(token.kind), at).with_arg(name));
                self.stream
                    .configure(ChunkGenerator::None, AcceptedCharacters::ANY);
                self.output(cx, SpanKind::Code);
                return false;
            }
            self.stream.configure(
                ChunkGenerator::DirectiveToken {
                    kind: token.kind,
                    index,
                },
                AcceptedCharacters::NON_WHITE_SPACE,
            );
            self.output(cx, SpanKind::Code);
        }
        true
    }

    /// Accept one token of `kind`.
    fn directive_token(&mut self, cx: &mut Cx<'_, '_>, kind: DirectiveTokenKind) -> bool {
        match kind {
            DirectiveTokenKind::Type => self.type_name(cx),
            DirectiveTokenKind::Namespace => self.namespace_name(),
            DirectiveTokenKind::Member => self.stream.optional(K::Identifier),
            DirectiveTokenKind::String => {
                let quoted = self
                    .stream
                    .current()
                    .is_some_and(|t| t.kind == K::StringLiteral && t.text().starts_with('"'));
                if quoted {
                    self.stream.accept_and_move_next();
                }
                quoted
            }
            DirectiveTokenKind::Boolean => {
                self.stream.optional(K::Keyword(Keyword::True))
                    || self.stream.optional(K::Keyword(Keyword::False))
            }
            DirectiveTokenKind::Attribute => {
                if !self.stream.at(K::LeftBracket) {
                    return false;
                }
                let bracket = self.current_span();
                self.stream.accept_and_move_next();
                if !self.balance(cx, PROBE, K::LeftBracket, K::RightBracket, bracket) {
                    return false;
                }
                self.stream.accept_and_move_next();
                true
            }
            DirectiveTokenKind::GenericTypeConstraint => {
                if !self.stream.optional(K::Keyword(Keyword::Where)) {
                    return false;
                }
                let mut constrained = false;
                self.stream.accept_while(|t| {
                    constrained |= t.kind == K::Identifier;
                    !t.kind.is_newline()
                });
                constrained
            }
            DirectiveTokenKind::IdentifierOrExpression => {
                if self.stream.at(K::Transition)
                    && self.stream.lookahead_kind(1) == Some(K::LeftParen)
                {
                    self.stream.accept_and_move_next();
                    return self.parenthesized(cx, PROBE);
                }
                if !self.stream.optional(K::Identifier) {
                    return false;
                }
                while self.stream.at(K::Dot) && self.stream.lookahead_kind(1) == Some(K::Identifier)
                {
                    self.stream.accept_and_move_next();
                    self.stream.accept_and_move_next();
                }
                true
            }
        }
    }

    /// A type name: a (possibly qualified, generic, array, nullable) name
    /// or a tuple.
    fn type_name(&mut self, cx: &mut Cx<'_, '_>) -> bool {
        if self.stream.at(K::LeftParen) {
            if !self.parenthesized(cx, PROBE) {
                return false;
            }
        } else if self.stream.current_kind().is_some_and(K::is_identifier_or_keyword) {
            self.stream.accept_and_move_next();
        } else {
            return false;
        }

        loop {
            match self.stream.current_kind() {
                Some(K::Dot | K::DoubleColon)
                    if self
                        .stream
                        .lookahead_kind(1)
                        .is_some_and(K::is_identifier_or_keyword) =>
                {
                    self.stream.accept_and_move_next();
                    self.stream.accept_and_move_next();
                }
                Some(K::LessThan) => {
                    if !self.type_arguments() {
                        return false;
                    }
                }
                Some(K::LeftBracket) => {
                    let bracket = self.current_span();
                    self.stream.accept_and_move_next();
                    if !self.balance(cx, PROBE, K::LeftBracket, K::RightBracket, bracket) {
                        return false;
                    }
                    self.stream.accept_and_move_next();
                }
                Some(K::QuestionMark | K::Star) => {
                    self.stream.accept_and_move_next();
                }
                _ => return true,
            }
        }
    }

    /// `<...>` at `current`, nesting included; fails at a line end.
    fn type_arguments(&mut self) -> bool {
        let mut depth = 0usize;
        while let Some(kind) = self.stream.current_kind() {
            match kind {
                K::LessThan => depth += 1,
                K::GreaterThan => depth -= 1,
                K::NewLine | K::Semicolon | K::LeftBrace => return false,
                _ => {}
            }
            self.stream.accept_and_move_next();
            if depth == 0 {
                return true;
            }
        }
        false
    }

    /// `Name(.Name)*`
    fn namespace_name(&mut self) -> bool {
        if !self.stream.optional(K::Identifier) {
            return false;
        }
        while self.stream.at(K::Dot) && self.stream.lookahead_kind(1) == Some(K::Identifier) {
            self.stream.accept_and_move_next();
            self.stream.accept_and_move_next();
        }
        true
    }

    /// Qualified name for a using import, generic arguments included.
    fn qualified_name(&mut self) {
        if !self.stream.optional(K::Identifier) {
            return;
        }
        loop {
            match self.stream.current_kind() {
                Some(K::Dot | K::DoubleColon)
                    if self
                        .stream
                        .lookahead_kind(1)
                        .is_some_and(K::is_identifier_or_keyword) =>
                {
                    self.stream.accept_and_move_next();
                    self.stream.accept_and_move_next();
                }
                Some(K::LessThan) => {
                    if !self.type_arguments() {
                        return;
                    }
                }
                _ => return,
            }
        }
    }

    /// The end of a single-line directive: an optional `;`, then nothing
    /// but whitespace up to the line end.
    fn end_of_line(&mut self, cx: &mut Cx<'_, '_>, name: &str) {
        self.stream
            .accept_while(|t| t.kind == K::Whitespace || t.kind.is_comment());
        if self.stream.at(K::Semicolon) {
            self.stream
                .configure(ChunkGenerator::None, AcceptedCharacters::WHITE_SPACE);
            self.output(cx, SpanKind::Markup);
            self.output_meta(cx);
            self.stream
                .accept_while(|t| t.kind == K::Whitespace || t.kind.is_comment());
        }
        match self.stream.current_kind() {
            None => {}
            Some(K::NewLine) => {
                self.stream.accept_and_move_next();
            }
            Some(_) => {
                let at = self.current_span();
                self.stream.report(
                    Diagnostic::error(ErrorCode::UnexpectedDirectiveLiteral, at)
                        .with_arg(name)
                        .with_arg("line break"),
                );
            }
        }
        self.stream
            .configure(ChunkGenerator::None, AcceptedCharacters::WHITE_SPACE);
        self.output(cx, SpanKind::Markup);
    }

    /// `{ ... }` of a block directive.
    fn directive_body(&mut self, cx: &mut Cx<'_, '_>, descriptor: &DirectiveDescriptor) {
        let name = descriptor.directive.as_str();
        self.accept_trivia();
        self.stream.configure(
            ChunkGenerator::None,
            AcceptedCharacters::WHITE_SPACE | AcceptedCharacters::NEW_LINE,
        );
        self.output(cx, SpanKind::Markup);

        let at = self.current_span();
        match self.stream.current_kind() {
            Some(K::LeftBrace) => {}
            None => {
                self.stream.report(
                    Diagnostic::error(ErrorCode::UnexpectedEofAfterDirective, at)
                        .with_arg(name)
                        .with_arg("{"),
                );
                return;
            }
            Some(_) => {
                self.stream.report(
                    Diagnostic::error(ErrorCode::UnexpectedDirectiveLiteral, at)
                        .with_arg(name)
                        .with_arg("{"),
                );
                return;
            }
        }
        let brace = at;
        self.output_meta(cx);

        if descriptor.kind == DirectiveKind::RazorBlock {
            let section = name == SECTION;
            let had = cx.ctx.has(ContextFlags::IN_SECTION);
            if section {
                cx.ctx.flags.insert(ContextFlags::IN_SECTION);
            }
            self.hand_off(cx, MarkupEntry::RazorBlock);
            cx.ctx.flags.set(ContextFlags::IN_SECTION, had);
        } else {
            self.with_body(statement_context(), |p| {
                let saved = std::mem::take(&mut p.single_line);
                p.statements(cx);
                p.single_line = saved;
                p.flush(cx);
            });
        }

        if self.stream.at(K::RightBrace) {
            self.output_meta(cx);
            self.capture_trailing_whitespace(cx);
        } else {
            self.stream
                .report(BlockContext::new(name, brace).missing_end());
        }
    }

    /// `@using`: a using statement when a `(` follows, otherwise an import.
    pub(super) fn using(&mut self, cx: &mut Cx<'_, '_>) {
        let statement = match self.stream.lookahead_kind(2) {
            Some(K::LeftParen) => true,
            Some(K::Whitespace) => self.stream.lookahead_kind(3) == Some(K::LeftParen),
            _ => false,
        };
        if statement {
            return self.control_flow_block(cx, Keyword::Using);
        }

        cx.ctx.builder.start_block(
            BlockKind::Directive,
            ChunkGenerator::Directive {
                name: Keyword::Using.as_str().to_owned(),
            },
        );
        self.output_transition(cx);
        self.stream.accept_and_move_next();
        self.stream.accept_while(|t| t.kind == K::Whitespace);
        let is_static = self.stream.optional(K::Keyword(Keyword::Static));
        if is_static {
            self.stream.accept_while(|t| t.kind == K::Whitespace);
        }

        let start = self.stream.position();
        self.qualified_name();
        let spaces = self.stream.read_while(|t| t.kind == K::Whitespace);
        if self.stream.at(K::Assign) {
            // `using Alias = Some.Type`
            self.stream.accept_all(spaces);
            self.stream.accept_and_move_next();
            self.stream.accept_while(|t| t.kind == K::Whitespace);
            self.qualified_name();
        } else {
            self.stream.put_back_all(&spaces);
            self.stream.recycle(spaces);
        }
        let end = self.stream.position();
        let namespace = self
            .stream
            .source()
            .get(start as usize..end as usize)
            .unwrap_or_default()
            .to_owned();

        let spaces = self.stream.read_while(|t| t.kind == K::Whitespace);
        if self.stream.at(K::Semicolon) {
            self.stream.accept_all(spaces);
            self.stream.accept_and_move_next();
        } else {
            self.stream.put_back_all(&spaces);
            self.stream.recycle(spaces);
        }

        debug!(namespace = %namespace, is_static, "using import");
        self.stream.configure(
            ChunkGenerator::AddImport {
                namespace,
                is_static,
            },
            AcceptedCharacters::ANY_EXCEPT_NEW_LINE,
        );
        self.output(cx, SpanKind::Code);
        self.capture_trailing_whitespace(cx);
        cx.ctx.builder.end_block();
    }

    /// `@class`, `@namespace`, ...: a directive block holding the word and
    /// a `ReservedWord` error.
    pub(super) fn reserved_word(&mut self, cx: &mut Cx<'_, '_>, keyword: Keyword) {
        cx.ctx.builder.start_block(
            BlockKind::Directive,
            ChunkGenerator::Directive {
                name: keyword.as_str().to_owned(),
            },
        );
        self.output_transition(cx);
        let at = self.current_span();
        self.output_meta(cx);
        self.stream.report(
            Diagnostic::error(ErrorCode::ReservedWord, at).with_arg(keyword.as_str()),
        );
        cx.ctx.builder.end_block();
    }
}
