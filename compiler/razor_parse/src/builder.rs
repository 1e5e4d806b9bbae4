//! Incremental construction of the syntax tree.
//!
//! Both parsers append to one builder in document order: spans go into the
//! innermost open block, blocks nest by start/end calls.

use razor_diagnostic::Diagnostic;
use razor_ir::{BlockKind, ChunkGenerator};
use tracing::trace;

use crate::tree::{BlockNode, SpanNode, SyntaxNode};

/// Stack of open blocks; the bottom one is the document root.
#[derive(Debug)]
pub(crate) struct TreeBuilder {
    stack: Vec<BlockNode>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        TreeBuilder::new()
    }
}

impl TreeBuilder {
    pub(crate) fn new() -> Self {
        TreeBuilder {
            stack: vec![BlockNode::new(BlockKind::Markup, ChunkGenerator::None)],
        }
    }

    pub(crate) fn start_block(&mut self, kind: BlockKind, generator: ChunkGenerator) {
        trace!(?kind, depth = self.stack.len(), "start block");
        self.stack.push(BlockNode::new(kind, generator));
    }

    /// Close the innermost block. The root is never closed.
    pub(crate) fn end_block(&mut self) {
        if self.stack.len() < 2 {
            return;
        }
        if let Some(block) = self.stack.pop() {
            trace!(kind = ?block.kind, "end block");
            self.current_mut().children.push(SyntaxNode::Block(block));
        }
    }

    pub(crate) fn add_span(&mut self, span: SpanNode) {
        self.current_mut().children.push(SyntaxNode::Span(span));
    }

    /// Kinds of the open blocks, root first.
    pub(crate) fn open_kinds(&self) -> impl DoubleEndedIterator<Item = BlockKind> + '_ {
        self.stack.iter().map(|b| b.kind)
    }

    pub(crate) fn attach_diagnostics(&mut self, diagnostics: Vec<Diagnostic>) {
        self.current_mut().diagnostics.extend(diagnostics);
    }

    /// The most recent direct child span of the innermost block.
    pub(crate) fn last_span(&self) -> Option<&SpanNode> {
        self.current().children.last().and_then(SyntaxNode::as_span)
    }

    /// Close every open block and return the root.
    pub(crate) fn finish(mut self) -> BlockNode {
        while self.stack.len() > 1 {
            self.end_block();
        }
        self.stack
            .pop()
            .unwrap_or_else(|| BlockNode::new(BlockKind::Markup, ChunkGenerator::None))
    }

    fn current(&self) -> &BlockNode {
        // The root is never popped before `finish`.
        &self.stack[self.stack.len() - 1]
    }

    fn current_mut(&mut self) -> &mut BlockNode {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }
}

#[cfg(test)]
mod tests;
