//! Parser for Razor templates.
//!
//! A document is parsed by two cooperating recursive descent parsers, one
//! per grammar. The markup parser owns the document loop and hands every
//! transition to the code parser; the code parser hands embedded markup
//! back. Both append to one [`SyntaxTree`] in document order, so the tree
//! reproduces the input text exactly.

mod balance;
mod builder;
mod code;
mod comment;
mod context;
mod host;
mod markup;
mod options;
mod pool;
mod stream;
mod tree;

pub use balance::{BalancingModes, BalancingParser};
pub use code::CodeParser;
pub use context::{ContextFlags, ParserContext};
pub use host::{CodeHost, MarkupHost};
pub use markup::MarkupParser;
pub use options::{builtin_directives, CancellationToken, ParserOptions};
pub use stream::{SpanContext, TokenStream};
pub use tree::{BlockNode, SpanNode, SyntaxNode, SyntaxTree};

pub use razor_lexer::TokenizerKind;

use razor_ir::SourceText;
use tracing::debug;

/// Why a parse produced no tree.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The options' cancellation token was triggered.
    #[error("parse cancelled")]
    Cancelled,
}

/// Parse `text` into a syntax tree.
///
/// Malformed input still produces a tree; problems are reported as
/// diagnostics on it. The only failure is cancellation.
pub fn parse(text: &str, options: &ParserOptions) -> Result<SyntaxTree, ParseError> {
    let mut ctx = ParserContext::new(options);
    if ctx.check_cancelled() {
        return Err(ParseError::Cancelled);
    }
    debug!(len = text.len(), tokenizer = ?options.tokenizer, "parse");

    let mut markup = MarkupParser::new(text);
    let mut code = CodeParser::new(options.tokenizer, text);
    markup.parse_document(&mut ctx, &mut code);
    if ctx.is_aborted() {
        return Err(ParseError::Cancelled);
    }

    let mut diagnostics = markup.into_diagnostics();
    diagnostics.extend(code.into_diagnostics());
    Ok(SyntaxTree::new(ctx.finish(), diagnostics))
}

/// Parse a [`SourceText`].
pub fn parse_source(
    source: &SourceText,
    options: &ParserOptions,
) -> Result<SyntaxTree, ParseError> {
    parse(source.as_str(), options)
}

#[cfg(test)]
mod tests;
