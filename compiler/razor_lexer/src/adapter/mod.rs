//! Code tokenizer backed by the logos host lexer.
//!
//! The host lexer segments the input; this layer replays each host token
//! onto the document position and reshapes it into Razor's granularity:
//!
//! - `@name` splits into a transition and the identifier (the second piece
//!   is held as pending until the next call)
//! - `@* ... *@` is lexed by the shared comment machine, never by the host
//! - a `#` at the start of a line takes the rest of the line as a
//!   [`CSharpDirective`](CodeTokenKind::CSharpDirective); lines inside an
//!   `#if false` branch become [`DisabledText`](CodeTokenKind::DisabledText)
//!
//! Emitted boundaries are recorded in a [`CheckpointCache`]. A
//! [`reset`](Tokenizer::reset) inside text this tokenizer lexed replays from
//! the nearest earlier checkpoint; a reset to text it never lexed (markup
//! the other parser consumed) starts there outside any directive branch.

mod checkpoint;
mod host;

use razor_ir::{offset_u32, CodeTokenKind, SourceCursor};
use tracing::{debug, trace};

use crate::comment::{self, CommentState};
use crate::intern::intern;
use crate::keywords;
use crate::literal;
use crate::tokenizer::Tokenizer;
use crate::Token;

use checkpoint::{Checkpoint, CheckpointCache, Restore};
use host::HostToken;

/// Number of restore points kept.
const CHECKPOINT_CAPACITY: usize = 256;

/// Second half of a split host token.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Pending {
    kind: CodeTokenKind,
    start: u32,
    len: u32,
}

/// Everything besides the position that the next token depends on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct AdapterState {
    /// Something other than whitespace precedes the position on its line.
    mid_line: bool,
    /// Inside an inactive `#if false` branch.
    disabled: bool,
    comment: Option<CommentState>,
    pending: Option<Pending>,
}

/// Adapter tokenizer for the code grammar.
pub struct AdapterTokenizer<'src> {
    text: &'src str,
    position: u32,
    state: AdapterState,
    checkpoints: CheckpointCache<AdapterState>,
}

impl<'src> AdapterTokenizer<'src> {
    pub fn new(text: &'src str) -> Self {
        let mut checkpoints = CheckpointCache::new(CHECKPOINT_CAPACITY);
        checkpoints.start_run(Checkpoint {
            position: 0,
            state: AdapterState::default(),
        });
        AdapterTokenizer {
            text,
            position: 0,
            state: AdapterState::default(),
            checkpoints,
        }
    }

    fn rest(&self) -> &'src str {
        self.text.get(self.position as usize..).unwrap_or("")
    }

    fn emit(&mut self, kind: CodeTokenKind, len: usize) -> Token<CodeTokenKind> {
        let start = self.position;
        let rest = self.rest();
        let len = len.min(rest.len());
        self.position += offset_u32(len);
        Token::new(kind, start, intern(&rest[..len]))
    }

    fn lex(&mut self) -> Option<Token<CodeTokenKind>> {
        if let Some(pending) = self.state.pending.take() {
            return Some(self.emit(pending.kind, pending.len as usize));
        }
        if let Some(state) = self.state.comment {
            if let Some(token) = self.comment_step(state) {
                return Some(token);
            }
        }

        let rest = self.rest();
        if rest.is_empty() {
            return None;
        }
        if self.state.disabled && !self.state.mid_line && literal::newline_len(rest) == 0 {
            if let Some(len) = disabled_len(rest) {
                return Some(self.emit(CodeTokenKind::DisabledText, len));
            }
        }
        if rest.starts_with("@*") {
            let mut cursor = self.cursor();
            let (token, state) = comment::open(&mut cursor);
            self.position = cursor.position();
            self.state.comment = state;
            return Some(token);
        }

        let (host, len) = host::lex_one(rest)?;
        let start = self.position;
        let Some(host) = host else {
            return Some(self.emit(CodeTokenKind::Unknown, len));
        };
        trace!(?host, start, len, "host token");

        let token = match host {
            HostToken::Identifier => {
                let kind = keywords::lookup(&rest[..len])
                    .map_or(CodeTokenKind::Identifier, CodeTokenKind::Keyword);
                self.emit(kind, len)
            }
            HostToken::VerbatimIdentifier => {
                let name = &rest[1..len];
                let kind = keywords::lookup(name)
                    .map_or(CodeTokenKind::Identifier, CodeTokenKind::Keyword);
                let token = self.emit(CodeTokenKind::Transition, 1);
                self.state.pending = Some(Pending {
                    kind,
                    start: start + 1,
                    len: offset_u32(name.len()),
                });
                token
            }
            HostToken::Hash if !self.state.mid_line => {
                let line = literal::line_comment_len(rest);
                self.directive(&rest[..line]);
                self.emit(CodeTokenKind::CSharpDirective, line)
            }
            HostToken::Hash => self.emit(CodeTokenKind::Hash, len),
            other => {
                let kind = other.simple_kind().unwrap_or(CodeTokenKind::Unknown);
                let token = self.emit(kind, len);
                match literal::unterminated(kind, start) {
                    Some(diagnostic) if !other.is_terminated() => {
                        token.with_diagnostic(diagnostic)
                    }
                    _ => token,
                }
            }
        };
        Some(token)
    }

    fn cursor(&self) -> SourceCursor<'src> {
        let mut cursor = SourceCursor::new(self.text);
        cursor.set_position(self.position);
        cursor
    }

    fn comment_step(&mut self, state: CommentState) -> Option<Token<CodeTokenKind>> {
        let mut cursor = self.cursor();
        let stepped = comment::step(&mut cursor, state);
        self.position = cursor.position();
        match stepped {
            Some((token, next)) => {
                self.state.comment = next;
                Some(token)
            }
            None => {
                self.state.comment = None;
                None
            }
        }
    }

    /// Track `#if false` regions from a preprocessor line.
    fn directive(&mut self, line: &str) {
        let body = line[1..].trim_start_matches(literal::is_whitespace);
        let name_len = body
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(body.len());
        let (name, condition) = body.split_at(name_len);
        match name {
            "if" if condition.trim() == "false" => self.state.disabled = true,
            "else" | "elif" | "endif" => self.state.disabled = false,
            _ => {}
        }
        debug!(directive = name, disabled = self.state.disabled, "preprocessor line");
    }

    fn update_line_state(&mut self, kind: CodeTokenKind) {
        match kind {
            CodeTokenKind::NewLine
            | CodeTokenKind::DisabledText
            | CodeTokenKind::CSharpDirective => self.state.mid_line = false,
            CodeTokenKind::Whitespace => {}
            _ => self.state.mid_line = true,
        }
    }
}

/// Whether something other than whitespace precedes `position` on its line.
fn mid_line_at(text: &str, position: u32) -> bool {
    let before = text.get(..position as usize).unwrap_or("");
    let line = before.rsplit(literal::is_newline).next().unwrap_or("");
    !line.chars().all(char::is_whitespace)
}

/// Length of the disabled lines at the start of `rest`: every line up to
/// the first one whose first non-blank text is `#else`, `#elif` or
/// `#endif`. `None` when that line is the first.
fn disabled_len(rest: &str) -> Option<usize> {
    let mut offset = 0;
    while offset < rest.len() {
        let line = &rest[offset..];
        let indent = literal::whitespace_len(line);
        let trimmed = line[indent..].strip_prefix('#').map(|d| {
            d.trim_start_matches(literal::is_whitespace)
        });
        if let Some(directive) = trimmed {
            if ["else", "elif", "endif"]
                .iter()
                .any(|name| directive.starts_with(name))
            {
                return (offset > 0).then_some(offset + indent);
            }
        }
        let content = literal::line_comment_len(line);
        offset += content + literal::newline_len(&line[content..]);
        if content == 0 && literal::newline_len(line) == 0 {
            break;
        }
    }
    (offset > 0).then_some(offset)
}

impl Tokenizer for AdapterTokenizer<'_> {
    type Kind = CodeTokenKind;

    fn next_token(&mut self) -> Option<Token<CodeTokenKind>> {
        let token = self.lex()?;
        if self.state.pending.is_none() && self.state.comment.is_none() {
            self.update_line_state(token.kind);
        } else if token.kind == CodeTokenKind::Transition {
            self.state.mid_line = true;
        }
        self.checkpoints.push(Checkpoint {
            position: self.position,
            state: self.state,
        });
        Some(token)
    }

    #[inline]
    fn position(&self) -> u32 {
        self.position
    }

    fn reset(&mut self, position: u32) {
        let target = self.cursor_at(position);
        self.position = target;
        let (from, state) = match self.checkpoints.restore(target) {
            Restore::Exact(state) => {
                trace!(target, "reset to checkpoint");
                self.state = state;
                return;
            }
            Restore::Unlexed => {
                trace!(target, "reset past lexed text");
                self.state = AdapterState {
                    mid_line: mid_line_at(self.text, target),
                    ..AdapterState::default()
                };
                self.checkpoints.start_run(Checkpoint {
                    position: target,
                    state: self.state,
                });
                return;
            }
            Restore::Replay(checkpoint) => (checkpoint.position, checkpoint.state),
        };

        debug!(target, from, "reset re-lexing from earlier checkpoint");
        self.position = from;
        self.state = state;
        while self.position < target {
            if self.next_token().is_none() {
                break;
            }
        }
        if self.position != target {
            // `target` falls inside a token; continue from there with no
            // split or comment in progress.
            self.position = target;
            self.state.pending = None;
            self.state.comment = None;
            self.checkpoints.truncate(target);
            self.checkpoints.push(Checkpoint {
                position: target,
                state: self.state,
            });
        }
    }

    fn source(&self) -> &str {
        self.text
    }
}

impl AdapterTokenizer<'_> {
    /// Clamp and snap `position` to a character boundary.
    fn cursor_at(&self, position: u32) -> u32 {
        let mut cursor = SourceCursor::new(self.text);
        cursor.set_position(position);
        cursor.position()
    }
}

#[cfg(test)]
mod tests;
