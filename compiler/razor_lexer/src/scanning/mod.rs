//! Hand-written state-machine tokenizers, one per grammar.
//!
//! Both share the Razor comment sub-machine through a
//! `RazorComment(CommentState)` arm in their state enums and remember that
//! arm at every token boundary it was active, so `reset` can resume inside
//! a comment.

mod code;
mod markup;

pub use code::CodeScanner;
pub use markup::MarkupScanner;
