//! Token kinds of the embedded code grammar.

use super::{Keyword, TokenKind};

/// Closed set of code-grammar token kinds.
///
/// Operators are lexed longest-match, except `>>` which always stays two
/// `GreaterThan` tokens so generic argument lists balance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CodeTokenKind {
    // Literals & words
    Identifier,
    Keyword(Keyword),
    IntegerLiteral,
    RealLiteral,
    CharacterLiteral,
    StringLiteral,

    // Trivia
    Whitespace,
    NewLine,
    /// `//` line comment or `/* */` block comment.
    CSharpComment,
    /// A preprocessor line (`#if`, `#region`, ...). Produced by the adapter
    /// tokenizer; the scanning tokenizer reports a bare `Hash` instead.
    CSharpDirective,
    /// Lines skipped by an inactive preprocessor branch (adapter only).
    DisabledText,

    // Razor
    Transition,
    RazorCommentTransition,
    RazorCommentStar,
    RazorComment,
    Marker,

    // Punctuation
    LeftBrace,
    RightBrace,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Semicolon,
    Comma,
    Dot,
    Range,
    Colon,
    DoubleColon,
    QuestionMark,
    NullCoalesce,
    NullCoalesceAssign,
    Arrow,
    FatArrow,
    Hash,

    // Operators
    Assign,
    Equals,
    NotEqual,
    Not,
    LessThan,
    LessThanEqual,
    LeftShift,
    LeftShiftAssign,
    GreaterThan,
    GreaterThanEqual,
    Plus,
    PlusAssign,
    Increment,
    Minus,
    MinusAssign,
    Decrement,
    Star,
    MultiplyAssign,
    Slash,
    DivideAssign,
    Modulo,
    ModuloAssign,
    And,
    AndAssign,
    DoubleAnd,
    Or,
    OrAssign,
    DoubleOr,
    Xor,
    XorAssign,
    Tilde,

    /// Character the grammar has no token for.
    Unknown,
}

impl CodeTokenKind {
    /// Fixed spelling for punctuation and operator kinds.
    pub const fn punctuation_text(self) -> Option<&'static str> {
        Some(match self {
            CodeTokenKind::LeftBrace => "{",
            CodeTokenKind::RightBrace => "}",
            CodeTokenKind::LeftParen => "(",
            CodeTokenKind::RightParen => ")",
            CodeTokenKind::LeftBracket => "[",
            CodeTokenKind::RightBracket => "]",
            CodeTokenKind::Semicolon => ";",
            CodeTokenKind::Comma => ",",
            CodeTokenKind::Dot => ".",
            CodeTokenKind::Range => "..",
            CodeTokenKind::Colon => ":",
            CodeTokenKind::DoubleColon => "::",
            CodeTokenKind::QuestionMark => "?",
            CodeTokenKind::NullCoalesce => "??",
            CodeTokenKind::NullCoalesceAssign => "??=",
            CodeTokenKind::Arrow => "->",
            CodeTokenKind::FatArrow => "=>",
            CodeTokenKind::Hash => "#",
            CodeTokenKind::Assign => "=",
            CodeTokenKind::Equals => "==",
            CodeTokenKind::NotEqual => "!=",
            CodeTokenKind::Not => "!",
            CodeTokenKind::LessThan => "<",
            CodeTokenKind::LessThanEqual => "<=",
            CodeTokenKind::LeftShift => "<<",
            CodeTokenKind::LeftShiftAssign => "<<=",
            CodeTokenKind::GreaterThan => ">",
            CodeTokenKind::GreaterThanEqual => ">=",
            CodeTokenKind::Plus => "+",
            CodeTokenKind::PlusAssign => "+=",
            CodeTokenKind::Increment => "++",
            CodeTokenKind::Minus => "-",
            CodeTokenKind::MinusAssign => "-=",
            CodeTokenKind::Decrement => "--",
            CodeTokenKind::Star => "*",
            CodeTokenKind::MultiplyAssign => "*=",
            CodeTokenKind::Slash => "/",
            CodeTokenKind::DivideAssign => "/=",
            CodeTokenKind::Modulo => "%",
            CodeTokenKind::ModuloAssign => "%=",
            CodeTokenKind::And => "&",
            CodeTokenKind::AndAssign => "&=",
            CodeTokenKind::DoubleAnd => "&&",
            CodeTokenKind::Or => "|",
            CodeTokenKind::OrAssign => "|=",
            CodeTokenKind::DoubleOr => "||",
            CodeTokenKind::Xor => "^",
            CodeTokenKind::XorAssign => "^=",
            CodeTokenKind::Tilde => "~",
            CodeTokenKind::Transition | CodeTokenKind::RazorCommentTransition => "@",
            CodeTokenKind::RazorCommentStar => "*",
            _ => return None,
        })
    }

    /// Identifier or keyword.
    #[inline]
    pub const fn is_identifier_or_keyword(self) -> bool {
        matches!(self, CodeTokenKind::Identifier | CodeTokenKind::Keyword(_))
    }

    /// Comment-like trivia that may sit between meaningful tokens.
    #[inline]
    pub const fn is_comment(self) -> bool {
        matches!(
            self,
            CodeTokenKind::CSharpComment
                | CodeTokenKind::CSharpDirective
                | CodeTokenKind::DisabledText
        )
    }
}

impl TokenKind for CodeTokenKind {
    const MARKER: Self = CodeTokenKind::Marker;
    const RAZOR_COMMENT_TRANSITION: Self = CodeTokenKind::RazorCommentTransition;
    const RAZOR_COMMENT_STAR: Self = CodeTokenKind::RazorCommentStar;
    const RAZOR_COMMENT: Self = CodeTokenKind::RazorComment;
    const TRANSITION: Self = CodeTokenKind::Transition;

    #[inline]
    fn is_whitespace(self) -> bool {
        self == CodeTokenKind::Whitespace
    }

    #[inline]
    fn is_newline(self) -> bool {
        self == CodeTokenKind::NewLine
    }

    fn sample(self) -> &'static str {
        match self {
            CodeTokenKind::Keyword(kw) => kw.as_str(),
            CodeTokenKind::Identifier => "<identifier>",
            CodeTokenKind::StringLiteral => "<string>",
            CodeTokenKind::NewLine => "<newline>",
            CodeTokenKind::Whitespace => "<whitespace>",
            other => other.punctuation_text().unwrap_or("<token>"),
        }
    }
}
