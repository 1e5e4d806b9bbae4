#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn collect<T: Tokenizer>(mut tokenizer: T) -> Vec<Token<T::Kind>> {
    std::iter::from_fn(|| tokenizer.next_token()).collect()
}

fn joined<T: Tokenizer>(tokenizer: T) -> String {
    collect(tokenizer).iter().map(Token::text).collect()
}

#[test]
fn kinds_dispatch() {
    for kind in [TokenizerKind::Scanning, TokenizerKind::Adapter] {
        let tokenizer = CodeTokenizer::new(kind, "a.b()");
        assert_eq!(tokenizer.kind(), kind);
        assert_eq!(tokenizer.source(), "a.b()");
        assert_eq!(collect(tokenizer).len(), 5);
    }
}

#[test]
fn tokenizers_agree_on_common_code() {
    let text = "@{ var list = new List<string> { \"a\", @\"b\"\"c\" };\n\
                foreach (var x in list) { <p>@x</p> } // done\n\
                @* note *@ y ??= z?.w ?? 0x2Au + 1.5e3m; }";
    let scanning = collect(CodeScanner::new(text));
    let adapter = collect(AdapterTokenizer::new(text));
    assert_eq!(scanning, adapter);
}

#[test]
fn only_adapter_recognizes_preprocessor_lines() {
    let text = "#region x\n";
    let scanning = collect(CodeScanner::new(text));
    let adapter = collect(AdapterTokenizer::new(text));
    assert_eq!(scanning[0].kind, CodeTokenKind::Hash);
    assert_eq!(adapter[0].kind, CodeTokenKind::CSharpDirective);
    assert_eq!(adapter[0].text(), "#region x");
}

fn code_text() -> impl Strategy<Value = String> {
    // Biased toward the characters that start multi-character tokens.
    prop::collection::vec(
        prop_oneof![
            3 => "[a-z_0-9 ]{1,4}",
            1 => prop::sample::select(vec![
                "@", "*", "\"", "'", "$", "/", "{", "}", "<", ">", "=", "?", ".",
                "\n", "\r", "\\", "é", "\u{2028}", "`",
            ])
            .prop_map(str::to_owned),
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn scanning_round_trips(text in code_text()) {
        prop_assert_eq!(joined(CodeScanner::new(&text)), text);
    }

    #[test]
    fn adapter_round_trips(text in code_text()) {
        prop_assert_eq!(joined(AdapterTokenizer::new(&text)), text);
    }

    #[test]
    fn markup_round_trips(text in "[<>/!?=\"'@*a-z \n\\[\\]{}:-]{0,60}") {
        prop_assert_eq!(joined(MarkupScanner::new(&text)), text);
    }

    #[test]
    fn tokenizers_agree(text in code_text()) {
        let scanning = collect(CodeScanner::new(&text));
        let adapter = collect(AdapterTokenizer::new(&text));
        prop_assert_eq!(scanning, adapter);
    }

    #[test]
    fn tokens_are_contiguous(text in code_text()) {
        let mut expected = 0;
        for token in collect(CodeScanner::new(&text)) {
            // Only an unterminated comment's body at end of input is empty.
            prop_assert!(!token.is_empty() || token.kind == CodeTokenKind::RazorComment);
            prop_assert_eq!(token.start, expected);
            expected = token.end();
        }
    }
}
