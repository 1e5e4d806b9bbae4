//! The contract every tokenizer implements.

use razor_ir::TokenKind;

use crate::Token;

/// Produces tokens of one grammar, one at a time, from a seekable source.
///
/// `reset` is a true undo: after `reset(p)` for any `p` that was a token
/// boundary this tokenizer emitted, the following tokens are identical to
/// the ones first produced from `p`, including any sub-state (being inside
/// a Razor comment) that was active there.
pub trait Tokenizer {
    type Kind: TokenKind;

    /// Next token, or `None` at end of input.
    fn next_token(&mut self) -> Option<Token<Self::Kind>>;

    /// Absolute offset of the next unread character.
    fn position(&self) -> u32;

    /// Continue tokenizing from `position`.
    fn reset(&mut self, position: u32);

    /// The full document text.
    fn source(&self) -> &str;
}

impl<T: Tokenizer + ?Sized> Tokenizer for &mut T {
    type Kind = T::Kind;

    fn next_token(&mut self) -> Option<Token<Self::Kind>> {
        (**self).next_token()
    }

    fn position(&self) -> u32 {
        (**self).position()
    }

    fn reset(&mut self, position: u32) {
        (**self).reset(position);
    }

    fn source(&self) -> &str {
        (**self).source()
    }
}

/// Resume points for the sub-states a tokenizer can be in at a token
/// boundary.
///
/// Only boundaries where the state differs from the initial one are stored,
/// so the common case costs nothing. Entries stay in increasing position
/// order because tokenizing only moves forward between resets.
#[derive(Clone, Debug)]
pub(crate) struct ResumeStates<S> {
    entries: Vec<(u32, S)>,
}

impl<S: Copy + Default + PartialEq> ResumeStates<S> {
    pub(crate) fn new() -> Self {
        ResumeStates {
            entries: Vec::new(),
        }
    }

    /// Record the state in effect at `position`.
    pub(crate) fn record(&mut self, position: u32, state: S) {
        if state == S::default() {
            return;
        }
        match self.entries.last() {
            Some(&(last, _)) if last >= position => {}
            _ => self.entries.push((position, state)),
        }
    }

    /// State in effect at `position`; forgets everything after it.
    pub(crate) fn restore(&mut self, position: u32) -> S {
        let keep = self.entries.partition_point(|&(p, _)| p <= position);
        self.entries.truncate(keep);
        match self.entries.last() {
            Some(&(p, state)) if p == position => state,
            _ => S::default(),
        }
    }
}

#[cfg(test)]
mod tests;
