//! The lossless syntax tree.
//!
//! Leaves are [`SpanNode`]s: runs of tokens with a classification, an edit
//! policy and a code-generation tag. Interior nodes are [`BlockNode`]s.
//! Concatenating the token text of every span in document order gives back
//! the parsed text exactly.

use razor_diagnostic::Diagnostic;
use razor_ir::{AcceptedCharacters, BlockKind, ChunkGenerator, Span, SpanKind, SyntaxToken};

/// A leaf: one or more tokens of the same classification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpanNode {
    pub kind: SpanKind,
    pub start: u32,
    pub tokens: Vec<SyntaxToken>,
    pub accepted: AcceptedCharacters,
    pub chunk_generator: ChunkGenerator,
}

impl SpanNode {
    pub fn text(&self) -> String {
        self.tokens.iter().map(SyntaxToken::text).collect()
    }

    pub fn len(&self) -> u32 {
        self.tokens
            .iter()
            .map(|t| razor_ir::offset_u32(t.text.len()))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.iter().all(|t| t.text.is_empty())
    }

    pub fn span(&self) -> Span {
        Span::from_len(self.start, self.len())
    }

    /// A zero-width span holding only a marker token.
    pub fn is_marker(&self) -> bool {
        self.tokens.len() == 1 && self.tokens[0].kind.is_marker()
    }
}

/// An interior node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockNode {
    pub kind: BlockKind,
    pub chunk_generator: ChunkGenerator,
    pub children: Vec<SyntaxNode>,
    /// Diagnostics scoped to this block (directive argument errors).
    pub diagnostics: Vec<Diagnostic>,
}

/// Either kind of tree node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyntaxNode {
    Span(SpanNode),
    Block(BlockNode),
}

impl SyntaxNode {
    pub fn as_span(&self) -> Option<&SpanNode> {
        match self {
            SyntaxNode::Span(span) => Some(span),
            SyntaxNode::Block(_) => None,
        }
    }

    pub fn as_block(&self) -> Option<&BlockNode> {
        match self {
            SyntaxNode::Block(block) => Some(block),
            SyntaxNode::Span(_) => None,
        }
    }

    fn write_text(&self, out: &mut String) {
        match self {
            SyntaxNode::Span(span) => out.extend(span.tokens.iter().map(SyntaxToken::text)),
            SyntaxNode::Block(block) => {
                for child in &block.children {
                    child.write_text(out);
                }
            }
        }
    }
}

impl BlockNode {
    pub fn new(kind: BlockKind, chunk_generator: ChunkGenerator) -> Self {
        BlockNode {
            kind,
            chunk_generator,
            children: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Concatenated text of every span below this block.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.write_text(&mut out);
        }
        out
    }

    /// Start of the first span below this block, if any.
    pub fn start(&self) -> Option<u32> {
        self.children.iter().find_map(|child| match child {
            SyntaxNode::Span(span) => Some(span.start),
            SyntaxNode::Block(block) => block.start(),
        })
    }

    /// Direct child spans.
    pub fn spans(&self) -> impl Iterator<Item = &SpanNode> {
        self.children.iter().filter_map(SyntaxNode::as_span)
    }

    /// Direct child blocks.
    pub fn blocks(&self) -> impl Iterator<Item = &BlockNode> {
        self.children.iter().filter_map(SyntaxNode::as_block)
    }

    /// Every block below this one, depth first, in document order.
    pub fn descendants(&self) -> Vec<&BlockNode> {
        let mut out = Vec::new();
        let mut stack: Vec<&BlockNode> = self.blocks().collect();
        stack.reverse();
        while let Some(block) = stack.pop() {
            out.push(block);
            let len = stack.len();
            stack.extend(block.blocks());
            stack[len..].reverse();
        }
        out
    }

    /// Every span below this block in document order.
    pub fn flatten(&self) -> Vec<&SpanNode> {
        let mut out = Vec::new();
        collect_spans(self, &mut out);
        out
    }
}

fn collect_spans<'a>(block: &'a BlockNode, out: &mut Vec<&'a SpanNode>) {
    for child in &block.children {
        match child {
            SyntaxNode::Span(span) => out.push(span),
            SyntaxNode::Block(inner) => collect_spans(inner, out),
        }
    }
}

/// Result of parsing one document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxTree {
    root: BlockNode,
    diagnostics: Vec<Diagnostic>,
}

impl SyntaxTree {
    pub(crate) fn new(root: BlockNode, mut diagnostics: Vec<Diagnostic>) -> Self {
        diagnostics.sort_by_key(|d| d.span.start);
        SyntaxTree { root, diagnostics }
    }

    /// The document block; always [`BlockKind::Markup`].
    pub fn root(&self) -> &BlockNode {
        &self.root
    }

    /// Every diagnostic of the parse, ordered by position.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// The parsed text, rebuilt from the tree.
    pub fn text(&self) -> String {
        self.root.text()
    }
}
