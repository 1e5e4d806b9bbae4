//! State shared by the code and markup parsers during one parse.

use bitflags::bitflags;
use razor_diagnostic::{Diagnostic, ErrorCode};
use razor_ir::{BlockKind, Span};
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::builder::TreeBuilder;
use crate::options::ParserOptions;

bitflags! {
    /// Context-sensitive parsing state.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ContextFlags: u8 {
        /// Parsing the value of a markup attribute.
        const IN_ATTRIBUTE_VALUE = 1 << 0;
        /// Inside the body of a `@section`.
        const IN_SECTION = 1 << 1;
    }
}

/// A construct that is still open, remembered to anchor a "missing closer"
/// diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct BlockContext {
    pub name: String,
    pub start: Span,
}

impl BlockContext {
    pub(crate) fn new(name: impl Into<String>, start: Span) -> Self {
        BlockContext {
            name: name.into(),
            start,
        }
    }

    /// `ExpectedEndOfBlockBeforeEof` for this block.
    pub(crate) fn missing_end(&self) -> Diagnostic {
        Diagnostic::error(ErrorCode::ExpectedEndOfBlockBeforeEof, self.start).with_arg(&self.name)
    }
}

/// Shared parse state.
///
/// `position` is the hand-off point between the two parsers: whichever
/// parser returns leaves it at the first character it did not consume, and
/// the parser taking over resumes its tokenizer there.
pub struct ParserContext<'o> {
    pub(crate) options: &'o ParserOptions,
    pub(crate) builder: TreeBuilder,
    pub(crate) flags: ContextFlags,
    position: u32,
    seen_directives: FxHashSet<String>,
    /// Nesting depth of code parses.
    code_depth: u32,
    aborted: bool,
}

impl<'o> ParserContext<'o> {
    pub(crate) fn new(options: &'o ParserOptions) -> Self {
        ParserContext {
            options,
            builder: TreeBuilder::new(),
            flags: ContextFlags::empty(),
            position: 0,
            seen_directives: FxHashSet::default(),
            code_depth: 0,
            aborted: false,
        }
    }

    pub fn options(&self) -> &'o ParserOptions {
        self.options
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn set_position(&mut self, position: u32) {
        self.position = position;
    }

    pub fn flags(&self) -> ContextFlags {
        self.flags
    }

    pub(crate) fn has(&self, flag: ContextFlags) -> bool {
        self.flags.contains(flag)
    }

    /// Set `flag` for the duration of `f`, restoring its previous value.
    pub(crate) fn with_flag<R>(&mut self, flag: ContextFlags, f: impl FnOnce(&mut Self) -> R) -> R {
        let had = self.flags.contains(flag);
        self.flags.insert(flag);
        let result = f(self);
        self.flags.set(flag, had);
        result
    }

    /// Record a directive occurrence; `false` if it was already seen.
    pub(crate) fn mark_directive_seen(&mut self, name: &str) -> bool {
        self.seen_directives.insert(name.to_owned())
    }

    pub(crate) fn enter_code(&mut self) {
        self.code_depth += 1;
    }

    pub(crate) fn exit_code(&mut self) {
        self.code_depth = self.code_depth.saturating_sub(1);
    }

    /// Inside a code parse started from another code parse.
    pub(crate) fn is_nested_code(&self) -> bool {
        self.code_depth > 1
    }

    /// Whether the innermost open block is the document root or a markup
    /// block directly below it.
    pub(crate) fn at_top_level(&self) -> bool {
        self.builder
            .open_kinds()
            .skip(1)
            .all(|kind| kind == BlockKind::Markup)
            && !self.is_nested_code()
    }

    /// Check the cancellation token; once cancelled, stays aborted.
    pub(crate) fn check_cancelled(&mut self) -> bool {
        if !self.aborted && self.options.cancellation().is_cancelled() {
            debug!("parse cancelled");
            self.aborted = true;
        }
        self.aborted
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    pub(crate) fn finish(self) -> crate::tree::BlockNode {
        self.builder.finish()
    }
}

#[cfg(test)]
mod tests;
