use super::*;
use pretty_assertions::assert_eq;

#[test]
fn defaults_register_builtins() {
    let options = ParserOptions::default();
    assert_eq!(options.tokenizer, TokenizerKind::Scanning);
    let section = options.directive("section");
    assert!(matches!(
        section.map(|d| d.kind),
        Some(DirectiveKind::RazorBlock)
    ));
    assert!(options.directive("namespace").is_none());
    assert_eq!(options.directives().count(), builtin_directives().len());
}

#[test]
fn builtins_are_valid_descriptors() {
    for d in builtin_directives() {
        let mut builder = DirectiveDescriptor::builder(d.directive.clone(), d.kind).usage(d.usage);
        for token in &d.tokens {
            builder = if token.optional {
                builder.optional_token(token.kind)
            } else {
                builder.token(token.kind)
            };
        }
        assert_eq!(builder.build(), Ok(d));
    }
}

#[test]
fn registering_a_reserved_word_lifts_the_reservation() {
    let options = ParserOptions::default();
    assert!(options.is_reserved(Keyword::Class));
    assert!(options.is_reserved(Keyword::Namespace));
    assert!(!options.is_reserved(Keyword::If));

    let namespace = DirectiveDescriptor::builder("namespace", DirectiveKind::SingleLine)
        .token(DirectiveTokenKind::Namespace)
        .build();
    let Ok(namespace) = namespace else {
        panic!("valid descriptor")
    };
    let options = options.with_directive(namespace);
    assert!(!options.is_reserved(Keyword::Namespace));
    assert!(options.is_reserved(Keyword::Class));
}

#[test]
fn empty_options_have_no_directives() {
    let options = ParserOptions::empty().with_tokenizer(TokenizerKind::Adapter);
    assert_eq!(options.directives().count(), 0);
    assert_eq!(options.tokenizer, TokenizerKind::Adapter);
}

#[test]
fn cancellation_is_shared_between_clones() {
    let token = CancellationToken::new();
    let options = ParserOptions::default().with_cancellation(token.clone());
    assert!(!options.cancellation().is_cancelled());
    token.cancel();
    assert!(options.cancellation().is_cancelled());
}
