//! Razor comment sub-grammar shared by every tokenizer.
//!
//! `@* body *@` lexes as five tokens in both grammars:
//! transition, star, comment body, star, transition. The body token is
//! omitted when the comment is empty. An unterminated comment's body runs
//! to the end of input and carries the diagnostic.

use memchr::memmem;
use razor_diagnostic::{Diagnostic, ErrorCode};
use razor_ir::{SourceCursor, Span, TokenKind};

use crate::intern::intern;
use crate::Token;

/// Position inside a Razor comment, between two of its tokens.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CommentState {
    /// After the opening `@`, before `*`.
    Star,
    /// After the opening `*`.
    Body,
    /// Before the closing `*`.
    EndStar,
    /// Before the closing `@`.
    EndTransition,
}

/// Whether the cursor sits on `@*`.
#[inline]
pub(crate) fn at_comment_start(cursor: &SourceCursor<'_>) -> bool {
    cursor.starts_with("@*")
}

/// Lex the opening `@`; the caller has checked [`at_comment_start`].
pub(crate) fn open<K: TokenKind>(cursor: &mut SourceCursor<'_>) -> (Token<K>, Option<CommentState>) {
    let start = cursor.position();
    cursor.advance_bytes(1);
    (
        Token::new(K::RAZOR_COMMENT_TRANSITION, start, intern("@")),
        Some(CommentState::Star),
    )
}

/// Lex the next comment token from `state`.
///
/// Returns the token and the state after it; `None` means the comment is
/// complete and the grammar's own start state resumes.
pub(crate) fn step<K: TokenKind>(
    cursor: &mut SourceCursor<'_>,
    state: CommentState,
) -> Option<(Token<K>, Option<CommentState>)> {
    let start = cursor.position();
    match state {
        CommentState::Star => {
            if cursor.peek() != '*' {
                return None;
            }
            cursor.advance_bytes(1);
            Some((
                Token::new(K::RAZOR_COMMENT_STAR, start, intern("*")),
                Some(CommentState::Body),
            ))
        }
        CommentState::Body => {
            let rest = cursor.remainder();
            match memmem::find(rest.as_bytes(), b"*@") {
                Some(0) => step(cursor, CommentState::EndStar),
                Some(len) => {
                    cursor.advance_bytes(len);
                    Some((
                        Token::new(K::RAZOR_COMMENT, start, rest[..len].to_owned()),
                        Some(CommentState::EndStar),
                    ))
                }
                None => {
                    cursor.advance_bytes(rest.len());
                    let opener = Span::from_len(start.saturating_sub(2), 2);
                    let token = Token::new(K::RAZOR_COMMENT, start, rest.to_owned())
                        .with_diagnostic(Diagnostic::error(
                            ErrorCode::RazorCommentNotTerminated,
                            opener,
                        ));
                    Some((token, None))
                }
            }
        }
        CommentState::EndStar => {
            if cursor.peek() != '*' {
                return None;
            }
            cursor.advance_bytes(1);
            Some((
                Token::new(K::RAZOR_COMMENT_STAR, start, intern("*")),
                Some(CommentState::EndTransition),
            ))
        }
        CommentState::EndTransition => {
            if cursor.peek() != '@' {
                return None;
            }
            cursor.advance_bytes(1);
            Some((
                Token::new(K::RAZOR_COMMENT_TRANSITION, start, intern("@")),
                None,
            ))
        }
    }
}
