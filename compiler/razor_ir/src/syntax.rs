//! Classification types attached to tree nodes.
//!
//! The node types themselves live with the parser (they carry diagnostics);
//! this module holds the plain tags they are built from.

use bitflags::bitflags;

use crate::directive::DirectiveTokenKind;

/// Content classification of a leaf span.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpanKind {
    /// A `@` switching grammars.
    Transition,
    /// Structural code that is not emitted verbatim (`{`, `}`, `(`, `)` of
    /// a Razor construct, directive keywords).
    MetaCode,
    /// Razor comment body.
    Comment,
    /// Embedded-language code.
    Code,
    /// Markup text.
    Markup,
    /// Content with no classification.
    None,
}

/// Kind of an interior tree node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Markup content; also the document root.
    Markup,
    /// `@{ ... }` and control-flow blocks.
    Statement,
    Directive,
    /// Implicit expression `@name.member(...)`.
    Expression,
    /// `@( ... )`.
    ExplicitExpression,
    /// `@* ... *@`.
    Comment,
    /// Inline template `@<p>...</p>` inside code.
    Template,
    /// A single markup element handed in from code.
    Tag,
}

bitflags! {
    /// Which edits a span absorbs without a reparse.
    ///
    /// An editor may apply an edit in place when every inserted character
    /// falls in the span's accepted set.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct AcceptedCharacters: u8 {
        const NEW_LINE = 1 << 0;
        const WHITE_SPACE = 1 << 1;
        const NON_WHITE_SPACE = 1 << 2;
        const ANY_EXCEPT_NEW_LINE = Self::WHITE_SPACE.bits() | Self::NON_WHITE_SPACE.bits();
        const ANY = Self::NEW_LINE.bits() | Self::ANY_EXCEPT_NEW_LINE.bits();
    }
}

impl AcceptedCharacters {
    /// No edit is absorbed.
    pub const NONE: Self = Self::empty();

    /// Whether inserting `c` is absorbed by a span with this policy.
    pub fn accepts(self, c: char) -> bool {
        let needed = if matches!(c, '\n' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}') {
            Self::NEW_LINE
        } else if c.is_whitespace() {
            Self::WHITE_SPACE
        } else {
            Self::NON_WHITE_SPACE
        };
        self.contains(needed)
    }
}

impl Default for AcceptedCharacters {
    fn default() -> Self {
        Self::ANY
    }
}

/// Code-generation tag carried by spans and blocks.
///
/// The parser only records intent; nothing here generates code.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum ChunkGenerator {
    /// Contributes nothing to generated output.
    #[default]
    None,
    Markup,
    Statement,
    Expression,
    /// A directive block, named by its keyword.
    Directive { name: String },
    /// One typed directive argument.
    DirectiveToken {
        kind: DirectiveTokenKind,
        index: usize,
    },
    /// `@using Namespace;` import.
    AddImport { namespace: String, is_static: bool },
    Template,
    /// The hidden first `@` of a doubled `@@`.
    EscapedTransition,
    Comment,
}
