//! The diagnostic record shared by tokenizers and parsers.

use razor_ir::Span;
use std::fmt;

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A located, coded problem report.
///
/// The `(span, code, args)` triple is the stable contract. [`message`]
/// renders a human-readable string from the code's template and is free to
/// change.
///
/// [`message`]: Diagnostic::message
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub span: Span,
    pub args: Vec<String>,
    pub severity: Severity,
}

impl Diagnostic {
    /// An error with no arguments.
    pub fn error(code: ErrorCode, span: Span) -> Self {
        Diagnostic {
            code,
            span,
            args: Vec::new(),
            severity: Severity::Error,
        }
    }

    /// Append one formatted argument.
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Render the message template with this diagnostic's arguments.
    ///
    /// Placeholders without a matching argument are left as-is.
    pub fn message(&self) -> String {
        let template = self.code.template();
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let close = after.find('}');
            let index = close.and_then(|c| after[..c].parse::<usize>().ok());
            match (close, index) {
                (Some(c), Some(i)) => {
                    match self.args.get(i) {
                        Some(arg) => out.push_str(arg),
                        None => out.push_str(&rest[open..open + c + 2]),
                    }
                    rest = &after[c + 1..];
                }
                _ => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] at {}: {}",
            self.severity,
            self.code,
            self.span,
            self.message()
        )
    }
}
