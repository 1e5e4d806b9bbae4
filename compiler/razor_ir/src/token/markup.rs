//! Token kinds of the markup grammar.

use super::TokenKind;

/// Closed set of markup-grammar token kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MarkupTokenKind {
    /// Run of characters with no markup meaning.
    Text,
    Whitespace,
    NewLine,
    OpenAngle,
    CloseAngle,
    ForwardSlash,
    Bang,
    QuestionMark,
    Equals,
    DoubleQuote,
    SingleQuote,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Colon,
    DoubleHyphen,
    Transition,
    RazorCommentTransition,
    RazorCommentStar,
    RazorComment,
    Marker,
}

impl MarkupTokenKind {
    /// Fixed spelling for single-purpose kinds.
    pub const fn punctuation_text(self) -> Option<&'static str> {
        Some(match self {
            MarkupTokenKind::OpenAngle => "<",
            MarkupTokenKind::CloseAngle => ">",
            MarkupTokenKind::ForwardSlash => "/",
            MarkupTokenKind::Bang => "!",
            MarkupTokenKind::QuestionMark => "?",
            MarkupTokenKind::Equals => "=",
            MarkupTokenKind::DoubleQuote => "\"",
            MarkupTokenKind::SingleQuote => "'",
            MarkupTokenKind::LeftBracket => "[",
            MarkupTokenKind::RightBracket => "]",
            MarkupTokenKind::LeftBrace => "{",
            MarkupTokenKind::RightBrace => "}",
            MarkupTokenKind::Colon => ":",
            MarkupTokenKind::DoubleHyphen => "--",
            MarkupTokenKind::Transition | MarkupTokenKind::RazorCommentTransition => "@",
            MarkupTokenKind::RazorCommentStar => "*",
            _ => return None,
        })
    }
}

impl TokenKind for MarkupTokenKind {
    const MARKER: Self = MarkupTokenKind::Marker;
    const RAZOR_COMMENT_TRANSITION: Self = MarkupTokenKind::RazorCommentTransition;
    const RAZOR_COMMENT_STAR: Self = MarkupTokenKind::RazorCommentStar;
    const RAZOR_COMMENT: Self = MarkupTokenKind::RazorComment;
    const TRANSITION: Self = MarkupTokenKind::Transition;

    #[inline]
    fn is_whitespace(self) -> bool {
        self == MarkupTokenKind::Whitespace
    }

    #[inline]
    fn is_newline(self) -> bool {
        self == MarkupTokenKind::NewLine
    }

    fn sample(self) -> &'static str {
        match self {
            MarkupTokenKind::Text => "<text>",
            MarkupTokenKind::Whitespace => "<whitespace>",
            MarkupTokenKind::NewLine => "<newline>",
            other => other.punctuation_text().unwrap_or("<token>"),
        }
    }
}
