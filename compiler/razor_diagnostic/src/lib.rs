//! Diagnostics for the Razor template front end.
//!
//! - [`ErrorCode`]: stable ids and message templates
//! - [`Diagnostic`]: `(span, code, args)` plus severity
//! - [`ErrorSink`] / [`ErrorSinkStack`]: scoped collection during a parse

mod diagnostic;
mod error_code;
mod sink;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
pub use sink::{ErrorSink, ErrorSinkStack};
