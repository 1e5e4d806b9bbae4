//! Bracket balancing with recovery.
//!
//! Balancing consumes tokens from just after an opener until the matching
//! closer, counting nesting. Parsers use it both to swallow a construct
//! (`(...)` of a call, `[...]` of an indexer) and to probe: with
//! [`BalancingModes::BACKTRACK_ON_FAILURE`] a failed balance leaves the
//! stream exactly where it started so another production can be tried.

use bitflags::bitflags;
use razor_diagnostic::{Diagnostic, ErrorCode};
use razor_ir::{Span, TokenKind};
use razor_lexer::Tokenizer;
use tracing::debug;

use crate::stream::TokenStream;

bitflags! {
    /// Failure policy and embedded-region handling for [`BalancingParser::balance`].
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct BalancingModes: u8 {
        /// On failure, rewind to where balancing started.
        const BACKTRACK_ON_FAILURE = 1 << 0;
        /// On failure, report nothing.
        const NO_ERROR_ON_FAILURE = 1 << 1;
        /// Parse embedded Razor comments and inline templates as nested
        /// nodes instead of counting their tokens.
        const ALLOW_COMMENTS_AND_TEMPLATES = 1 << 2;
        /// Also hand off other transitions (`@expr`) met while balancing.
        const ALLOW_EMBEDDED_TRANSITIONS = 1 << 3;
        /// A newline ends balancing unsuccessfully.
        const STOP_AT_END_OF_LINE = 1 << 4;
    }
}

type KindOf<T> = <T as Tokenizer>::Kind;

/// A parser that can balance brackets in its token stream.
///
/// `Cx` is whatever the parser needs to parse embedded regions.
pub trait BalancingParser<Cx: ?Sized> {
    type Source: Tokenizer;

    fn stream(&mut self) -> &mut TokenStream<Self::Source>;

    /// Whether `current` starts an embedded region.
    fn at_embedded_transition(&mut self, _allow_transitions: bool) -> bool {
        false
    }

    /// Parse the embedded region at `current`. Tokens traversed before it
    /// have already been accepted.
    fn handle_embedded_transition(&mut self, _cx: &mut Cx) {}

    /// Balance `left`/`right` starting at `current`, which must be the first
    /// token after the already accepted opener located at `start`.
    ///
    /// On success every traversed token is accepted and `current` is the
    /// closer (not accepted). On failure `ExpectedCloseBracketBeforeEof` is
    /// reported at `start` unless suppressed; the traversed tokens are then
    /// accepted, or with backtracking discarded and re-lexed.
    fn balance(
        &mut self,
        cx: &mut Cx,
        modes: BalancingModes,
        left: KindOf<Self::Source>,
        right: KindOf<Self::Source>,
        start: Span,
    ) -> bool {
        let mut backtrack_to = self.stream().position();
        let mut tokens = self.stream().take_buffer();
        let mut nesting = 1usize;
        let embedded = modes.contains(BalancingModes::ALLOW_COMMENTS_AND_TEMPLATES);
        let transitions = modes.contains(BalancingModes::ALLOW_EMBEDDED_TRANSITIONS);

        while let Some(kind) = self.stream().current_kind() {
            if embedded && self.at_embedded_transition(transitions) {
                let before = self.stream().position();
                self.stream().accept_all(tokens.drain(..));
                self.handle_embedded_transition(cx);
                // Spans were output; there is no going back past them.
                backtrack_to = self.stream().position();
                if backtrack_to != before {
                    continue;
                }
            }
            if kind == left {
                nesting += 1;
            } else if kind == right {
                nesting -= 1;
                if nesting == 0 {
                    break;
                }
            }
            if modes.contains(BalancingModes::STOP_AT_END_OF_LINE) && kind.is_newline() {
                break;
            }
            tokens.extend(self.stream().current().cloned());
            self.stream().next_token();
        }

        let balanced = nesting == 0;
        if !balanced {
            debug!(?left, ?right, start = %start, "unbalanced");
            if !modes.contains(BalancingModes::NO_ERROR_ON_FAILURE) {
                self.stream().report(
                    Diagnostic::error(ErrorCode::ExpectedCloseBracketBeforeEof, start)
                        .with_arg(left.sample())
                        .with_arg(right.sample()),
                );
            }
            if modes.contains(BalancingModes::BACKTRACK_ON_FAILURE) {
                tokens.clear();
                self.stream().reset_to(backtrack_to);
            }
        }
        self.stream().accept_all(tokens.drain(..));
        self.stream().recycle(tokens);
        balanced
    }
}

#[cfg(test)]
mod tests;
