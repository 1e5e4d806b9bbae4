//! Token stream engine shared by both parsers.
//!
//! Wraps a [`Tokenizer`] with a one-token window (`current`, `previous`),
//! lookahead and put-back, and an accept buffer that is drained into a
//! [`SpanNode`] whenever the parser reaches a span boundary.
//!
//! Put-back is implemented on top of [`Tokenizer::reset`], which restores
//! the exact tokenizer state at a boundary it emitted. Putting a sequence
//! back therefore undoes the reads that produced it, sub-states included.

use razor_diagnostic::{Diagnostic, ErrorSinkStack};
use razor_ir::{AcceptedCharacters, ChunkGenerator, SpanKind, SyntaxToken, TokenKind};
use razor_lexer::{Token, Tokenizer};
use tracing::trace;

use crate::builder::TreeBuilder;
use crate::pool::BufferPool;
use crate::tree::SpanNode;

/// Configuration of the span being accumulated.
///
/// Reset to the default after every span is output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpanContext {
    pub chunk_generator: ChunkGenerator,
    pub accepted: AcceptedCharacters,
}

impl Default for SpanContext {
    fn default() -> Self {
        SpanContext {
            chunk_generator: ChunkGenerator::None,
            accepted: AcceptedCharacters::ANY,
        }
    }
}

/// Buffered, seekable view of a tokenizer.
pub struct TokenStream<T: Tokenizer> {
    tokenizer: T,
    current: Option<Token<T::Kind>>,
    /// `current` reflects the tokenizer; when false it must be re-read.
    loaded: bool,
    previous: Option<Token<T::Kind>>,
    buffer: Vec<Token<T::Kind>>,
    span: SpanContext,
    start_of_line: bool,
    errors: ErrorSinkStack,
    pool: BufferPool<Token<T::Kind>>,
}

impl<T: Tokenizer> TokenStream<T> {
    pub fn new(tokenizer: T) -> Self {
        TokenStream {
            tokenizer,
            current: None,
            loaded: false,
            previous: None,
            buffer: Vec::new(),
            span: SpanContext::default(),
            start_of_line: true,
            errors: ErrorSinkStack::new(),
            pool: BufferPool::default(),
        }
    }

    pub fn source(&self) -> &str {
        self.tokenizer.source()
    }

    // ─── Window ─────────────────────────────────────────────────────

    /// Read `current` if it was put back or never read.
    pub fn ensure_current(&mut self) {
        if !self.loaded {
            self.current = self.tokenizer.next_token();
            self.loaded = true;
        }
    }

    pub fn current(&mut self) -> Option<&Token<T::Kind>> {
        self.ensure_current();
        self.current.as_ref()
    }

    pub fn current_kind(&mut self) -> Option<T::Kind> {
        self.current().map(|t| t.kind)
    }

    pub fn previous(&self) -> Option<&Token<T::Kind>> {
        self.previous.as_ref()
    }

    /// Advance one token; `false` at end of input.
    pub fn next_token(&mut self) -> bool {
        self.ensure_current();
        self.previous = self.current.take();
        self.current = self.tokenizer.next_token();
        if let Some(token) = &self.current {
            trace!(kind = ?token.kind, start = token.start, "next token");
        }
        self.current.is_some()
    }

    pub fn at_end(&mut self) -> bool {
        self.current().is_none()
    }

    pub fn at(&mut self, kind: T::Kind) -> bool {
        self.current_kind() == Some(kind)
    }

    pub fn at_any(&mut self, kinds: &[T::Kind]) -> bool {
        self.current_kind().is_some_and(|k| kinds.contains(&k))
    }

    /// Absolute offset of the first unconsumed character: the start of
    /// `current`, or where the tokenizer stands when there is none.
    pub fn position(&self) -> u32 {
        match (&self.current, self.loaded) {
            (Some(token), true) => token.start,
            _ => self.tokenizer.position(),
        }
    }

    /// The token `count` places after `current` (`0` is `current`),
    /// without consuming anything.
    pub fn lookahead(&mut self, count: usize) -> Option<Token<T::Kind>> {
        self.ensure_current();
        if count == 0 {
            return self.current.clone();
        }
        let current = self.current.clone();
        let previous = self.previous.clone();

        let mut read = self.pool.get();
        for _ in 0..count {
            if !self.next_token() {
                break;
            }
            read.extend(self.current.clone());
        }
        let found = (read.len() == count).then(|| read.last().cloned()).flatten();

        // Undo the reads, newest first.
        for token in read.drain(..).rev() {
            self.tokenizer.reset(token.start);
        }
        self.pool.put(read);
        self.current = current;
        self.previous = previous;
        self.loaded = true;
        found
    }

    pub fn lookahead_kind(&mut self, count: usize) -> Option<T::Kind> {
        self.lookahead(count).map(|t| t.kind)
    }

    /// Push `token` back onto the tokenizer; it is read again next.
    ///
    /// Tokens read after `token`, `current` included, are dropped.
    pub fn put_back(&mut self, token: &Token<T::Kind>) {
        self.tokenizer.reset(token.start);
        self.current = None;
        self.loaded = false;
    }

    /// Put back a sequence given in the order it was read.
    pub fn put_back_all(&mut self, tokens: &[Token<T::Kind>]) {
        for token in tokens.iter().rev() {
            self.put_back(token);
        }
    }

    pub fn put_current_back(&mut self) {
        if self.loaded {
            if let Some(token) = self.current.take() {
                self.tokenizer.reset(token.start);
            }
            self.loaded = false;
        }
    }

    /// Forget the window and continue tokenizing at `position`.
    pub fn reset_to(&mut self, position: u32) {
        trace!(position, "stream reset");
        self.tokenizer.reset(position);
        self.current = None;
        self.previous = None;
        self.loaded = false;
    }

    /// Split a leading `@` off `current` when the tokenizer folded it into a
    /// longer token (`@"..."` verbatim strings).
    pub fn split_transition(&mut self) {
        self.ensure_current();
        let Some(token) = &self.current else {
            return;
        };
        let transition = <T::Kind as TokenKind>::TRANSITION;
        if token.kind == transition || !token.text().starts_with('@') || token.len() < 2 {
            return;
        }
        let start = token.start;
        self.tokenizer.reset(start + 1);
        self.current = Some(Token::new(transition, start, "@"));
    }

    // ─── Accepting ──────────────────────────────────────────────────

    pub fn accept(&mut self, token: Token<T::Kind>) {
        if token.kind.is_newline() {
            self.start_of_line = true;
        } else if !token.kind.is_whitespace() {
            self.start_of_line = false;
        }
        self.buffer.push(token);
    }

    pub fn accept_all(&mut self, tokens: impl IntoIterator<Item = Token<T::Kind>>) {
        for token in tokens {
            self.accept(token);
        }
    }

    /// Accept `current` and advance; `false` at end of input.
    pub fn accept_and_move_next(&mut self) -> bool {
        self.ensure_current();
        if let Some(token) = self.current.clone() {
            self.accept(token);
        }
        self.next_token()
    }

    pub fn accept_while(&mut self, mut condition: impl FnMut(&Token<T::Kind>) -> bool) {
        while self.current().is_some_and(&mut condition) {
            self.accept_and_move_next();
        }
    }

    /// Accept tokens up to, not including, the first of `kinds`.
    pub fn accept_until(&mut self, kinds: &[T::Kind]) {
        self.accept_while(|t| !kinds.contains(&t.kind));
    }

    /// Accept `current` when it is `kind`.
    pub fn optional(&mut self, kind: T::Kind) -> bool {
        if self.at(kind) {
            self.accept_and_move_next();
            true
        } else {
            false
        }
    }

    /// Read tokens matching `condition` without accepting them.
    pub fn read_while(
        &mut self,
        mut condition: impl FnMut(&Token<T::Kind>) -> bool,
    ) -> Vec<Token<T::Kind>> {
        let mut read = self.pool.get();
        while let Some(token) = self.current() {
            if !condition(token) {
                break;
            }
            let token = token.clone();
            read.push(token);
            self.next_token();
        }
        read
    }

    /// Hand a vector from [`read_while`](Self::read_while) or
    /// [`take_buffer`](Self::take_buffer) back to the pool.
    pub fn recycle(&mut self, buffer: Vec<Token<T::Kind>>) {
        self.pool.put(buffer);
    }

    pub fn take_buffer(&mut self) -> Vec<Token<T::Kind>> {
        self.pool.get()
    }

    pub fn has_buffered(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// Whether only whitespace has been accepted since the last newline.
    pub fn is_start_of_line(&self) -> bool {
        self.start_of_line
    }

    // ─── Spans ──────────────────────────────────────────────────────

    pub fn span_mut(&mut self) -> &mut SpanContext {
        &mut self.span
    }

    pub fn configure(&mut self, chunk_generator: ChunkGenerator, accepted: AcceptedCharacters) {
        self.span = SpanContext {
            chunk_generator,
            accepted,
        };
    }

    /// Drain the accept buffer into a span. `false`, and no span, when the
    /// buffer is empty.
    ///
    /// Diagnostics carried by the drained tokens move to the error sink.
    pub(crate) fn output(&mut self, builder: &mut TreeBuilder, kind: SpanKind) -> bool {
        let Some(first) = self.buffer.first() else {
            self.span = SpanContext::default();
            return false;
        };
        let start = first.start;
        let mut tokens = Vec::with_capacity(self.buffer.len());
        for mut token in self.buffer.drain(..) {
            self.errors.extend(token.diagnostics.drain(..));
            tokens.push(SyntaxToken::new(token.kind, token.text));
        }
        let span = std::mem::take(&mut self.span);
        trace!(?kind, start, tokens = tokens.len(), "output span");
        builder.add_span(SpanNode {
            kind,
            start,
            tokens,
            accepted: span.accepted,
            chunk_generator: span.chunk_generator,
        });
        true
    }

    /// Output a span holding a zero-width marker at the current position.
    pub(crate) fn output_marker(&mut self, builder: &mut TreeBuilder, kind: SpanKind) {
        let position = self.position();
        self.buffer.push(Token::marker(position));
        self.output(builder, kind);
    }

    // ─── Diagnostics ────────────────────────────────────────────────

    pub fn report(&mut self, diagnostic: Diagnostic) {
        trace!(code = %diagnostic.code, span = %diagnostic.span, "diagnostic");
        self.errors.report(diagnostic);
    }

    pub fn errors_mut(&mut self) -> &mut ErrorSinkStack {
        &mut self.errors
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.errors.into_diagnostics()
    }
}

#[cfg(test)]
mod tests;
