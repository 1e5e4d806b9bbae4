//! Hand-written tokenizer for the code grammar.

use razor_ir::{CodeTokenKind, SourceCursor};
use tracing::trace;

use crate::comment::{self, CommentState};
use crate::intern::intern;
use crate::keywords;
use crate::literal::{self, Scanned};
use crate::tokenizer::{ResumeStates, Tokenizer};
use crate::Token;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
enum CodeState {
    #[default]
    Data,
    RazorComment(CommentState),
}

impl From<Option<CommentState>> for CodeState {
    fn from(state: Option<CommentState>) -> Self {
        state.map_or(CodeState::Data, CodeState::RazorComment)
    }
}

/// Scanning tokenizer for the code grammar.
///
/// Preprocessor lines are not recognized; `#` lexes as [`CodeTokenKind::Hash`].
pub struct CodeScanner<'src> {
    cursor: SourceCursor<'src>,
    state: CodeState,
    resume: ResumeStates<CodeState>,
}

impl<'src> CodeScanner<'src> {
    pub fn new(text: &'src str) -> Self {
        CodeScanner {
            cursor: SourceCursor::new(text),
            state: CodeState::Data,
            resume: ResumeStates::new(),
        }
    }

    fn data(&mut self) -> Option<Token<CodeTokenKind>> {
        if self.cursor.is_eof() {
            return None;
        }
        let start = self.cursor.position();
        let rest = self.cursor.remainder();
        let c = self.cursor.peek();

        let (kind, len) = match c {
            '@' if comment::at_comment_start(&self.cursor) => {
                let (token, state) = comment::open(&mut self.cursor);
                self.state = state.into();
                return Some(token);
            }
            '@' => {
                if rest.starts_with("@\"") {
                    return Some(self.literal(start, literal::verbatim_string(rest, 2)));
                }
                if rest.starts_with("@$\"") {
                    return Some(self.literal(start, literal::interpolated_string(rest, 3, true)));
                }
                (CodeTokenKind::Transition, 1)
            }
            '$' => {
                if rest.starts_with("$@\"") {
                    return Some(self.literal(start, literal::interpolated_string(rest, 3, true)));
                }
                if rest.starts_with("$\"\"\"") {
                    return Some(self.literal(start, literal::raw_string(rest, 1)));
                }
                if rest.starts_with("$\"") {
                    return Some(self.literal(start, literal::interpolated_string(rest, 2, false)));
                }
                (CodeTokenKind::Unknown, 1)
            }
            '"' => {
                let scanned = if rest.starts_with("\"\"\"") {
                    literal::raw_string(rest, 0)
                } else {
                    literal::regular_string(rest)
                };
                return Some(self.literal(start, scanned));
            }
            '\'' => {
                return Some(self.delimited(
                    start,
                    CodeTokenKind::CharacterLiteral,
                    literal::char_literal(rest),
                ));
            }
            '/' if rest.starts_with("//") => {
                (CodeTokenKind::CSharpComment, literal::line_comment_len(rest))
            }
            '/' if rest.starts_with("/*") => {
                return Some(self.delimited(
                    start,
                    CodeTokenKind::CSharpComment,
                    literal::block_comment(rest),
                ));
            }
            '.' if self.cursor.peek_at(1).is_ascii_digit() => number(rest),
            c if c.is_ascii_digit() => number(rest),
            c if literal::is_ident_start(c) => {
                let len = literal::ident_len(rest);
                let kind = keywords::lookup(&rest[..len])
                    .map_or(CodeTokenKind::Identifier, CodeTokenKind::Keyword);
                (kind, len)
            }
            c if literal::is_whitespace(c) => {
                (CodeTokenKind::Whitespace, literal::whitespace_len(rest))
            }
            c if literal::is_newline(c) => (CodeTokenKind::NewLine, literal::newline_len(rest)),
            c => literal::operator(rest).unwrap_or((CodeTokenKind::Unknown, c.len_utf8())),
        };

        self.cursor.advance_bytes(len);
        Some(Token::new(kind, start, intern(&rest[..len])))
    }

    fn literal(&mut self, start: u32, scanned: Scanned) -> Token<CodeTokenKind> {
        self.delimited(start, CodeTokenKind::StringLiteral, scanned)
    }

    fn delimited(
        &mut self,
        start: u32,
        kind: CodeTokenKind,
        scanned: Scanned,
    ) -> Token<CodeTokenKind> {
        let text = &self.cursor.remainder()[..scanned.len];
        self.cursor.advance_bytes(scanned.len);
        let token = Token::new(kind, start, intern(text));
        match literal::unterminated(kind, start) {
            Some(diagnostic) if !scanned.terminated => token.with_diagnostic(diagnostic),
            _ => token,
        }
    }
}

fn number(rest: &str) -> (CodeTokenKind, usize) {
    let (len, real) = literal::number_len(rest);
    let kind = if real {
        CodeTokenKind::RealLiteral
    } else {
        CodeTokenKind::IntegerLiteral
    };
    (kind, len)
}

impl Tokenizer for CodeScanner<'_> {
    type Kind = CodeTokenKind;

    fn next_token(&mut self) -> Option<Token<CodeTokenKind>> {
        let token = loop {
            match self.state {
                CodeState::Data => break self.data()?,
                CodeState::RazorComment(state) => {
                    match comment::step(&mut self.cursor, state) {
                        Some((token, next)) => {
                            self.state = next.into();
                            break token;
                        }
                        None => self.state = CodeState::Data,
                    }
                }
            }
        };
        self.resume.record(self.cursor.position(), self.state);
        trace!(kind = ?token.kind, start = token.start, len = token.len(), "code token");
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
