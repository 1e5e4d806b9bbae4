//! Parser configuration.
//!
//! Everything the parser would otherwise take from global defaults lives
//! here: which code tokenizer to run, the directive registry, the reserved
//! words and the cancellation token.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use razor_ir::{
    DirectiveDescriptor, DirectiveKind, DirectiveTokenDescriptor, DirectiveTokenKind,
    DirectiveUsage, Keyword,
};
use razor_lexer::TokenizerKind;
use rustc_hash::{FxHashMap, FxHashSet};

/// Cooperative cancellation flag, checked at directive boundaries.
///
/// Clones share the flag, so a token handed to a parse can be cancelled
/// from another thread.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        CancellationToken::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Options for one parse.
#[derive(Clone, Debug)]
pub struct ParserOptions {
    pub tokenizer: TokenizerKind,
    /// Parse only the directives at the top of the document; everything
    /// from the first other content on is a single markup span.
    pub parse_leading_directives: bool,
    directives: FxHashMap<String, DirectiveDescriptor>,
    reserved_words: FxHashSet<Keyword>,
    cancellation: CancellationToken,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            tokenizer: TokenizerKind::default(),
            parse_leading_directives: false,
            directives: builtin_directives()
                .into_iter()
                .map(|d| (d.directive.clone(), d))
                .collect(),
            reserved_words: [Keyword::Class, Keyword::Namespace].into_iter().collect(),
            cancellation: CancellationToken::new(),
        }
    }
}

impl ParserOptions {
    /// Options with no registered directives.
    pub fn empty() -> Self {
        ParserOptions {
            directives: FxHashMap::default(),
            ..ParserOptions::default()
        }
    }

    #[must_use]
    pub fn with_tokenizer(mut self, tokenizer: TokenizerKind) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Register a directive, replacing any directive of the same name.
    #[must_use]
    pub fn with_directive(mut self, descriptor: DirectiveDescriptor) -> Self {
        self.directives
            .insert(descriptor.directive.clone(), descriptor);
        self
    }

    #[must_use]
    pub fn with_reserved_word(mut self, keyword: Keyword) -> Self {
        self.reserved_words.insert(keyword);
        self
    }

    #[must_use]
    pub fn with_leading_directives(mut self, enabled: bool) -> Self {
        self.parse_leading_directives = enabled;
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn directive(&self, name: &str) -> Option<&DirectiveDescriptor> {
        self.directives.get(name)
    }

    pub fn directives(&self) -> impl Iterator<Item = &DirectiveDescriptor> {
        self.directives.values()
    }

    /// A registered directive of the same name takes precedence.
    pub fn is_reserved(&self, keyword: Keyword) -> bool {
        self.reserved_words.contains(&keyword) && !self.directives.contains_key(keyword.as_str())
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }
}

fn descriptor(
    name: &str,
    kind: DirectiveKind,
    usage: DirectiveUsage,
    tokens: &[(DirectiveTokenKind, bool)],
) -> DirectiveDescriptor {
    DirectiveDescriptor {
        directive: name.to_owned(),
        kind,
        usage,
        tokens: tokens
            .iter()
            .map(|&(kind, optional)| DirectiveTokenDescriptor {
                kind,
                optional,
                name: None,
            })
            .collect(),
    }
}

/// Directives registered by [`ParserOptions::default`].
pub fn builtin_directives() -> Vec<DirectiveDescriptor> {
    use DirectiveKind::{CodeBlock, RazorBlock, SingleLine};
    use DirectiveTokenKind as T;
    use DirectiveUsage::{FileScopedMultipleOccurring, FileScopedSinglyOccurring, Unrestricted};

    vec![
        descriptor("functions", CodeBlock, Unrestricted, &[]),
        descriptor("code", CodeBlock, Unrestricted, &[]),
        descriptor("section", RazorBlock, Unrestricted, &[(T::Member, false)]),
        descriptor("inherits", SingleLine, FileScopedSinglyOccurring, &[(T::Type, false)]),
        descriptor("model", SingleLine, FileScopedSinglyOccurring, &[(T::Type, false)]),
        descriptor("layout", SingleLine, FileScopedSinglyOccurring, &[(T::Type, false)]),
        descriptor("page", SingleLine, FileScopedSinglyOccurring, &[(T::String, true)]),
        descriptor(
            "implements",
            SingleLine,
            FileScopedMultipleOccurring,
            &[(T::Type, false)],
        ),
        descriptor(
            "inject",
            SingleLine,
            FileScopedMultipleOccurring,
            &[(T::Type, false), (T::Member, false)],
        ),
        descriptor(
            "attribute",
            SingleLine,
            FileScopedMultipleOccurring,
            &[(T::Attribute, false)],
        ),
        descriptor(
            "typeparam",
            SingleLine,
            FileScopedMultipleOccurring,
            &[(T::Member, false), (T::GenericTypeConstraint, true)],
        ),
        descriptor(
            "preservewhitespace",
            SingleLine,
            FileScopedSinglyOccurring,
            &[(T::Boolean, false)],
        ),
        descriptor(
            "rendermode",
            SingleLine,
            FileScopedSinglyOccurring,
            &[(T::IdentifierOrExpression, false)],
        ),
        descriptor(
            "addTagHelper",
            SingleLine,
            FileScopedMultipleOccurring,
            &[(T::String, false)],
        ),
        descriptor(
            "removeTagHelper",
            SingleLine,
            FileScopedMultipleOccurring,
            &[(T::String, false)],
        ),
        descriptor(
            "tagHelperPrefix",
            SingleLine,
            FileScopedSinglyOccurring,
            &[(T::String, false)],
        ),
    ]
}

#[cfg(test)]
mod tests;
