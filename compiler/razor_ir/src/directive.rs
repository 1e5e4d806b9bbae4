//! Directive descriptors.
//!
//! A descriptor tells the code parser what follows a directive keyword:
//! an ordered list of typed argument slots and the shape of the body.
//! Descriptors are supplied by the host through parser options.

use std::fmt;

/// Shape of the content after a directive's arguments.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    /// Arguments then end of line.
    SingleLine,
    /// Arguments then `{ markup }`.
    RazorBlock,
    /// Arguments then `{ code }`.
    CodeBlock,
}

/// Where and how often a directive may appear.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum DirectiveUsage {
    #[default]
    Unrestricted,
    /// At most once per document.
    FileScopedSinglyOccurring,
    /// Any number of times, but only at document level.
    FileScopedMultipleOccurring,
}

/// Kind of a typed directive argument.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DirectiveTokenKind {
    /// Type name, possibly generic, qualified, nullable or an array.
    Type,
    /// Dotted qualified identifier.
    Namespace,
    /// Simple identifier.
    Member,
    /// Regular quoted string literal.
    String,
    /// `true` or `false`.
    Boolean,
    /// Bracketed attribute list `[...]`.
    Attribute,
    /// `where T : constraint, ...` clause.
    GenericTypeConstraint,
    /// Identifier or parenthesized expression.
    IdentifierOrExpression,
}

impl fmt::Display for DirectiveTokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DirectiveTokenKind::Type => "type",
            DirectiveTokenKind::Namespace => "namespace",
            DirectiveTokenKind::Member => "member",
            DirectiveTokenKind::String => "string",
            DirectiveTokenKind::Boolean => "boolean",
            DirectiveTokenKind::Attribute => "attribute",
            DirectiveTokenKind::GenericTypeConstraint => "generic type constraint",
            DirectiveTokenKind::IdentifierOrExpression => "identifier or expression",
        };
        f.write_str(name)
    }
}

/// One argument slot of a directive.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DirectiveTokenDescriptor {
    pub kind: DirectiveTokenKind,
    pub optional: bool,
    pub name: Option<String>,
}

/// Full description of a directive.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DirectiveDescriptor {
    pub directive: String,
    pub kind: DirectiveKind,
    pub usage: DirectiveUsage,
    pub tokens: Vec<DirectiveTokenDescriptor>,
}

/// Invalid descriptor shape.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    #[error("directive name must not be empty")]
    EmptyName,
    #[error("directive name `{0}` must be letters, digits or `_`, starting with a letter")]
    InvalidName(String),
    #[error("required token {index} of directive `{directive}` follows an optional token")]
    RequiredAfterOptional { directive: String, index: usize },
}

impl DirectiveDescriptor {
    /// Start building a descriptor.
    pub fn builder(directive: impl Into<String>, kind: DirectiveKind) -> DirectiveDescriptorBuilder {
        DirectiveDescriptorBuilder {
            descriptor: DirectiveDescriptor {
                directive: directive.into(),
                kind,
                usage: DirectiveUsage::Unrestricted,
                tokens: Vec::new(),
            },
        }
    }

    /// File-scoped directives may not appear inside code blocks.
    pub fn is_file_scoped(&self) -> bool {
        self.usage != DirectiveUsage::Unrestricted
    }
}

/// Builder for [`DirectiveDescriptor`], validated on [`build`](Self::build).
#[derive(Clone, Debug)]
pub struct DirectiveDescriptorBuilder {
    descriptor: DirectiveDescriptor,
}

impl DirectiveDescriptorBuilder {
    #[must_use]
    pub fn usage(mut self, usage: DirectiveUsage) -> Self {
        self.descriptor.usage = usage;
        self
    }

    #[must_use]
    pub fn token(mut self, kind: DirectiveTokenKind) -> Self {
        self.descriptor.tokens.push(DirectiveTokenDescriptor {
            kind,
            optional: false,
            name: None,
        });
        self
    }

    #[must_use]
    pub fn named_token(mut self, kind: DirectiveTokenKind, name: impl Into<String>) -> Self {
        self.descriptor.tokens.push(DirectiveTokenDescriptor {
            kind,
            optional: false,
            name: Some(name.into()),
        });
        self
    }

    #[must_use]
    pub fn optional_token(mut self, kind: DirectiveTokenKind) -> Self {
        self.descriptor.tokens.push(DirectiveTokenDescriptor {
            kind,
            optional: true,
            name: None,
        });
        self
    }

    pub fn build(self) -> Result<DirectiveDescriptor, DescriptorError> {
        let d = self.descriptor;
        let mut chars = d.directive.chars();
        match chars.next() {
            None => return Err(DescriptorError::EmptyName),
            Some(first) if !first.is_alphabetic() => {
                return Err(DescriptorError::InvalidName(d.directive));
            }
            Some(_) => {}
        }
        if !chars.all(|c| c.is_alphanumeric() || c == '_') {
            return Err(DescriptorError::InvalidName(d.directive));
        }
        let mut seen_optional = false;
        for (index, token) in d.tokens.iter().enumerate() {
            if token.optional {
                seen_optional = true;
            } else if seen_optional {
                return Err(DescriptorError::RequiredAfterOptional {
                    directive: d.directive.clone(),
                    index,
                });
            }
        }
        Ok(d)
    }
}

#[cfg(test)]
mod tests;
