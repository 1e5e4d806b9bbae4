//! Token kinds for both grammars and the kind-erased tree token.
//!
//! Each grammar has its own closed kind enum ([`CodeTokenKind`],
//! [`MarkupTokenKind`]). The parsing engine is generic over [`TokenKind`];
//! the syntax tree stores [`SyntaxToken`]s whose [`SyntaxKind`] remembers
//! which grammar produced them.

mod code;
mod keyword;
mod markup;

use std::borrow::Cow;
use std::fmt;

pub use code::CodeTokenKind;
pub use keyword::Keyword;
pub use markup::MarkupTokenKind;

/// Literal content of a token.
///
/// Short, frequent bodies (punctuation, single spaces, newlines) are
/// borrowed from static tables by the tokenizers; everything else is owned.
pub type TokenText = Cow<'static, str>;

/// Behaviour shared by the kind enums of both grammars.
///
/// The Razor comment kinds are part of the contract because both grammars
/// lex `@* ... *@` with the same sub-state machine.
pub trait TokenKind: Copy + Eq + fmt::Debug + Into<SyntaxKind> + 'static {
    /// Zero-width placeholder kind.
    const MARKER: Self;
    /// `@` opening or closing a Razor comment.
    const RAZOR_COMMENT_TRANSITION: Self;
    /// `*` following/preceding a Razor comment transition.
    const RAZOR_COMMENT_STAR: Self;
    /// Body of a Razor comment.
    const RAZOR_COMMENT: Self;
    /// The grammar-switching `@`.
    const TRANSITION: Self;

    fn is_whitespace(self) -> bool;
    fn is_newline(self) -> bool;

    /// Whitespace or newline.
    #[inline]
    fn is_trivia_space(self) -> bool {
        self.is_whitespace() || self.is_newline()
    }

    /// Representative text used in diagnostics (`"{"`, `"("`, ...).
    fn sample(self) -> &'static str;
}

/// Grammar-tagged token kind stored in the syntax tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    Code(CodeTokenKind),
    Markup(MarkupTokenKind),
}

impl From<CodeTokenKind> for SyntaxKind {
    fn from(kind: CodeTokenKind) -> Self {
        SyntaxKind::Code(kind)
    }
}

impl From<MarkupTokenKind> for SyntaxKind {
    fn from(kind: MarkupTokenKind) -> Self {
        SyntaxKind::Markup(kind)
    }
}

impl SyntaxKind {
    pub fn is_whitespace(self) -> bool {
        match self {
            SyntaxKind::Code(k) => k.is_whitespace(),
            SyntaxKind::Markup(k) => k.is_whitespace(),
        }
    }

    pub fn is_newline(self) -> bool {
        match self {
            SyntaxKind::Code(k) => k.is_newline(),
            SyntaxKind::Markup(k) => k.is_newline(),
        }
    }

    pub fn is_marker(self) -> bool {
        matches!(
            self,
            SyntaxKind::Code(CodeTokenKind::Marker) | SyntaxKind::Markup(MarkupTokenKind::Marker)
        )
    }
}

/// A token as stored in a tree span: kind plus literal text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SyntaxToken {
    pub kind: SyntaxKind,
    pub text: TokenText,
}

impl SyntaxToken {
    pub fn new(kind: impl Into<SyntaxKind>, text: impl Into<TokenText>) -> Self {
        SyntaxToken {
            kind: kind.into(),
            text: text.into(),
        }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }
}
