//! Tokens produced by the tokenizers.

use razor_diagnostic::Diagnostic;
use razor_ir::{offset_u32, Span, SyntaxToken, TokenKind, TokenText};
use smallvec::SmallVec;

/// A lexical token of one grammar.
///
/// `start` is an absolute byte offset into the document. Lexical problems
/// (unterminated literals, comments) ride along in `diagnostics` until the
/// token stream accepts the token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token<K> {
    pub kind: K,
    pub start: u32,
    pub text: TokenText,
    pub diagnostics: SmallVec<[Diagnostic; 1]>,
}

impl<K: TokenKind> Token<K> {
    pub fn new(kind: K, start: u32, text: impl Into<TokenText>) -> Self {
        Token {
            kind,
            start,
            text: text.into(),
            diagnostics: SmallVec::new(),
        }
    }

    /// Zero-width placeholder at `start`.
    pub fn marker(start: u32) -> Self {
        Token::new(K::MARKER, start, "")
    }

    #[must_use]
    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn len(&self) -> u32 {
        offset_u32(self.text.len())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Offset one past the last byte.
    #[inline]
    pub fn end(&self) -> u32 {
        self.start + self.len()
    }

    #[inline]
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end())
    }

    #[inline]
    pub fn is(&self, kind: K) -> bool {
        self.kind == kind
    }

    /// Kind-erased copy for the syntax tree.
    pub fn to_syntax(&self) -> SyntaxToken {
        SyntaxToken::new(self.kind, self.text.clone())
    }
}
