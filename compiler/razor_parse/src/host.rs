//! The boundary between the two parsers.
//!
//! Code and markup nest inside each other to arbitrary depth, so each
//! parser hands itself to the other as a trait object on every call rather
//! than either owning the other. A hand-off always goes through
//! [`ParserContext::position`]: the caller leaves it at the first character
//! it has not consumed, the callee resumes there and leaves it at the first
//! character it did not consume.

use crate::context::ParserContext;

/// The code side of the boundary.
pub trait CodeHost {
    /// Parse one code construct starting at the `@` at `ctx.position()`.
    fn parse_block(&mut self, ctx: &mut ParserContext<'_>, markup: &mut dyn MarkupHost);
}

/// The markup side of the boundary.
pub trait MarkupHost {
    /// Parse a markup block embedded in code: one element (`<p>...</p>`,
    /// `<text>...</text>`, `@<p>...</p>`) or an `@:` line.
    fn parse_markup_block(&mut self, ctx: &mut ParserContext<'_>, code: &mut dyn CodeHost);

    /// Parse an inline template `@<p>...</p>` met inside a code expression.
    fn parse_template(&mut self, ctx: &mut ParserContext<'_>, code: &mut dyn CodeHost);

    /// Parse markup up to, not including, the first unnested `}`.
    fn parse_razor_block(&mut self, ctx: &mut ParserContext<'_>, code: &mut dyn CodeHost);
}
