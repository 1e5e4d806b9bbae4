//! Hand-written tokenizer for the markup grammar.

use razor_ir::{MarkupTokenKind, SourceCursor};
use tracing::trace;

use crate::comment::{self, CommentState};
use crate::intern::intern;
use crate::literal;
use crate::tokenizer::{ResumeStates, Tokenizer};
use crate::Token;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
enum MarkupState {
    #[default]
    Data,
    RazorComment(CommentState),
}

impl From<Option<CommentState>> for MarkupState {
    fn from(state: Option<CommentState>) -> Self {
        state.map_or(MarkupState::Data, MarkupState::RazorComment)
    }
}

/// Scanning tokenizer for the markup grammar.
///
/// Markup is tokenized coarsely: runs of ordinary text, whitespace,
/// newlines and the handful of characters the markup parser reacts to.
pub struct MarkupScanner<'src> {
    cursor: SourceCursor<'src>,
    state: MarkupState,
    resume: ResumeStates<MarkupState>,
}

fn punctuation(c: char) -> Option<MarkupTokenKind> {
    Some(match c {
        '<' => MarkupTokenKind::OpenAngle,
        '>' => MarkupTokenKind::CloseAngle,
        '/' => MarkupTokenKind::ForwardSlash,
        '!' => MarkupTokenKind::Bang,
        '?' => MarkupTokenKind::QuestionMark,
        '=' => MarkupTokenKind::Equals,
        '"' => MarkupTokenKind::DoubleQuote,
        '\'' => MarkupTokenKind::SingleQuote,
        '[' => MarkupTokenKind::LeftBracket,
        ']' => MarkupTokenKind::RightBracket,
        '{' => MarkupTokenKind::LeftBrace,
        '}' => MarkupTokenKind::RightBrace,
        ':' => MarkupTokenKind::Colon,
        '@' => MarkupTokenKind::Transition,
        _ => return None,
    })
}

/// Whether a text run stops before `s`.
fn ends_text(s: &str) -> bool {
    match s.chars().next() {
        None => true,
        Some(c) => {
            punctuation(c).is_some()
                || literal::is_whitespace(c)
                || literal::is_newline(c)
                || s.starts_with("--")
        }
    }
}

impl<'src> MarkupScanner<'src> {
    pub fn new(text: &'src str) -> Self {
        MarkupScanner {
            cursor: SourceCursor::new(text),
            state: MarkupState::Data,
            resume: ResumeStates::new(),
        }
    }

    fn data(&mut self) -> Option<Token<MarkupTokenKind>> {
        if self.cursor.is_eof() {
            return None;
        }
        if comment::at_comment_start(&self.cursor) {
            let (token, state) = comment::open(&mut self.cursor);
            self.state = state.into();
            return Some(token);
        }

        let start = self.cursor.position();
        let rest = self.cursor.remainder();
        let c = self.cursor.peek();
        let (kind, len) = if let Some(kind) = punctuation(c) {
            (kind, 1)
        } else if rest.starts_with("--") {
            (MarkupTokenKind::DoubleHyphen, 2)
        } else if literal::is_whitespace(c) {
            (MarkupTokenKind::Whitespace, literal::whitespace_len(rest))
        } else if literal::is_newline(c) {
            (MarkupTokenKind::NewLine, literal::newline_len(rest))
        } else {
            let mut len = c.len_utf8();
            while !ends_text(&rest[len..]) {
                len += rest[len..].chars().next().map_or(1, char::len_utf8);
            }
            (MarkupTokenKind::Text, len)
        };

        self.cursor.advance_bytes(len);
        Some(Token::new(kind, start, intern(&rest[..len])))
    }
}

impl Tokenizer for MarkupScanner<'_> {
    type Kind = MarkupTokenKind;

    fn next_token(&mut self) -> Option<Token<MarkupTokenKind>> {
        let token = loop {
            match self.state {
                MarkupState::Data => break self.data()?,
                MarkupState::RazorComment(state) => {
                    match comment::step(&mut self.cursor, state) {
                        Some((token, next)) => {
                            self.state = next.into();
                            break token;
                        }
                        None => self.state = MarkupState::Data,
                    }
                }
            }
        };
        self.resume.record(self.cursor.position(), self.state);
        trace!(kind = ?token.kind, start = token.start, len = token.len(), "markup token");
        Some(token)
    }

    #[inline]
    fn position(&self) -> u32 {
        self.cursor.position()
    }

    fn reset(&mut self, position: u32) {
        self.cursor.set_position(position);
        self.state = self.resume.restore(self.cursor.position());
    }

    fn source(&self) -> &str {
        self.cursor.text()
    }
}

#[cfg(test)]
mod tests;
