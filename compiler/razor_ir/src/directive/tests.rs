use super::*;

#[test]
fn builds_single_line_descriptor() {
    let Ok(d) = DirectiveDescriptor::builder("inject", DirectiveKind::SingleLine)
        .token(DirectiveTokenKind::Type)
        .named_token(DirectiveTokenKind::Member, "PropertyName")
        .build()
    else {
        panic!("descriptor should be valid");
    };
    assert_eq!(d.directive, "inject");
    assert_eq!(d.tokens.len(), 2);
    assert_eq!(d.tokens[1].name.as_deref(), Some("PropertyName"));
    assert!(!d.is_file_scoped());
}

#[test]
fn rejects_required_after_optional() {
    let result = DirectiveDescriptor::builder("page", DirectiveKind::SingleLine)
        .optional_token(DirectiveTokenKind::String)
        .token(DirectiveTokenKind::Member)
        .build();
    assert_eq!(
        result,
        Err(DescriptorError::RequiredAfterOptional {
            directive: "page".to_string(),
            index: 1
        })
    );
}

#[test]
fn rejects_bad_names() {
    let empty = DirectiveDescriptor::builder("", DirectiveKind::SingleLine).build();
    assert_eq!(empty, Err(DescriptorError::EmptyName));

    let digit = DirectiveDescriptor::builder("1abc", DirectiveKind::SingleLine).build();
    assert!(matches!(digit, Err(DescriptorError::InvalidName(_))));

    let dash = DirectiveDescriptor::builder("a-b", DirectiveKind::CodeBlock).build();
    assert!(matches!(dash, Err(DescriptorError::InvalidName(_))));
}

#[test]
fn file_scoped_usage() {
    let Ok(d) = DirectiveDescriptor::builder("inherits", DirectiveKind::SingleLine)
        .usage(DirectiveUsage::FileScopedSinglyOccurring)
        .token(DirectiveTokenKind::Type)
        .build()
    else {
        panic!("descriptor should be valid");
    };
    assert!(d.is_file_scoped());
}
