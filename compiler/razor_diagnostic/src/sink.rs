//! Scoped diagnostic collection.
//!
//! A parse owns one [`ErrorSinkStack`]. Sub-parses that need their own
//! attribution (a directive and its arguments) push a scope, report into it,
//! then pop it to receive exactly the diagnostics raised inside.

use crate::Diagnostic;

/// A flat, append-only list of diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorSink {
    diagnostics: Vec<Diagnostic>,
}

impl ErrorSink {
    pub fn new() -> Self {
        ErrorSink::default()
    }

    #[inline]
    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Stack of sinks; reports go to the innermost scope.
///
/// The bottom scope always exists, so reporting never fails.
#[derive(Clone, Debug)]
pub struct ErrorSinkStack {
    scopes: Vec<ErrorSink>,
}

impl Default for ErrorSinkStack {
    fn default() -> Self {
        ErrorSinkStack::new()
    }
}

impl ErrorSinkStack {
    pub fn new() -> Self {
        ErrorSinkStack {
            scopes: vec![ErrorSink::new()],
        }
    }

    /// Number of open scopes, including the bottom one.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(ErrorSink::new());
    }

    /// Close the innermost scope and hand back its diagnostics.
    ///
    /// Popping the bottom scope drains it but keeps an empty one in place.
    pub fn pop_scope(&mut self) -> Vec<Diagnostic> {
        if self.scopes.len() > 1 {
            self.scopes
                .pop()
                .map(ErrorSink::into_diagnostics)
                .unwrap_or_default()
        } else {
            self.scopes
                .first_mut()
                .map(|sink| std::mem::take(sink).into_diagnostics())
                .unwrap_or_default()
        }
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        if let Some(sink) = self.scopes.last_mut() {
            sink.report(diagnostic);
        }
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        if let Some(sink) = self.scopes.last_mut() {
            sink.extend(diagnostics);
        }
    }

    /// Diagnostics reported into the innermost scope so far.
    pub fn current(&self) -> &[Diagnostic] {
        self.scopes.last().map_or(&[], ErrorSink::diagnostics)
    }

    /// Collapse every scope, outermost first.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.scopes
            .into_iter()
            .flat_map(ErrorSink::into_diagnostics)
            .collect()
    }
}
