//! Shared syntax types for the Razor template front end.
//!
//! Leaf crate: spans, document text and cursor, token kinds for the markup
//! and code grammars, tree classification tags and directive descriptors.

pub mod directive;
mod source;
mod span;
mod syntax;
mod token;

pub use directive::{
    DescriptorError, DirectiveDescriptor, DirectiveDescriptorBuilder, DirectiveKind,
    DirectiveTokenDescriptor, DirectiveTokenKind, DirectiveUsage,
};
pub use source::{offset_u32, SourceCursor, SourceLocation, SourceText, EOF_CHAR};
pub use span::{Span, SpanError};
pub use syntax::{AcceptedCharacters, BlockKind, ChunkGenerator, SpanKind};
pub use token::{
    CodeTokenKind, Keyword, MarkupTokenKind, SyntaxKind, SyntaxToken, TokenKind, TokenText,
};
