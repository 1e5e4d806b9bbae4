//! Tokenizers for the Razor template front end.
//!
//! Two grammars are tokenized: markup (coarse, structural) and code
//! (fine-grained, the host language's lexical structure). Code has two
//! interchangeable implementations selected by [`TokenizerKind`]:
//!
//! - [`CodeScanner`]: a hand-written character state machine
//! - [`AdapterTokenizer`]: a logos lexer reshaped into the same token kinds
//!
//! Both produce identical streams for the same input apart from
//! preprocessor lines, which only the adapter recognizes. Every tokenizer
//! supports exact put-back through [`Tokenizer::reset`].

mod adapter;
mod comment;
mod intern;
pub mod keywords;
mod literal;
mod scanning;
mod token;
mod tokenizer;

pub use adapter::AdapterTokenizer;
pub use comment::CommentState;
pub use intern::intern;
pub use scanning::{CodeScanner, MarkupScanner};
pub use token::Token;
pub use tokenizer::Tokenizer;

use razor_ir::CodeTokenKind;

/// Which code tokenizer to run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TokenizerKind {
    #[default]
    Scanning,
    Adapter,
}

/// A code tokenizer of either kind.
pub enum CodeTokenizer<'src> {
    Scanning(CodeScanner<'src>),
    Adapter(AdapterTokenizer<'src>),
}

impl<'src> CodeTokenizer<'src> {
    pub fn new(kind: TokenizerKind, text: &'src str) -> Self {
        match kind {
            TokenizerKind::Scanning => CodeTokenizer::Scanning(CodeScanner::new(text)),
            TokenizerKind::Adapter => CodeTokenizer::Adapter(AdapterTokenizer::new(text)),
        }
    }

    pub fn kind(&self) -> TokenizerKind {
        match self {
            CodeTokenizer::Scanning(_) => TokenizerKind::Scanning,
            CodeTokenizer::Adapter(_) => TokenizerKind::Adapter,
        }
    }
}

impl Tokenizer for CodeTokenizer<'_> {
    type Kind = CodeTokenKind;

    fn next_token(&mut self) -> Option<Token<CodeTokenKind>> {
        match self {
            CodeTokenizer::Scanning(t) => t.next_token(),
            CodeTokenizer::Adapter(t) => t.next_token(),
        }
    }

    fn position(&self) -> u32 {
        match self {
            CodeTokenizer::Scanning(t) => t.position(),
            CodeTokenizer::Adapter(t) => t.position(),
        }
    }

    fn reset(&mut self, position: u32) {
        match self {
            CodeTokenizer::Scanning(t) => t.reset(position),
            CodeTokenizer::Adapter(t) => t.reset(position),
        }
    }

    fn source(&self) -> &str {
        match self {
            CodeTokenizer::Scanning(t) => t.source(),
            CodeTokenizer::Adapter(t) => t.source(),
        }
    }
}

#[cfg(test)]
mod tests;
