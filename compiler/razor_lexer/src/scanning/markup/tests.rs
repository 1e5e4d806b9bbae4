#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

fn kinds(text: &str) -> Vec<(MarkupTokenKind, String)> {
    let mut scanner = MarkupScanner::new(text);
    std::iter::from_fn(|| scanner.next_token())
        .map(|t| (t.kind, t.text().to_owned()))
        .collect()
}

fn k(kind: MarkupTokenKind, text: &str) -> (MarkupTokenKind, String) {
    (kind, text.to_owned())
}

#[test]
fn element_with_attribute() {
    use MarkupTokenKind as K;
    assert_eq!(
        kinds("<a href=\"x\">hi there</a>"),
        vec![
            k(K::OpenAngle, "<"),
            k(K::Text, "a"),
            k(K::Whitespace, " "),
            k(K::Text, "href"),
            k(K::Equals, "="),
            k(K::DoubleQuote, "\""),
            k(K::Text, "x"),
            k(K::DoubleQuote, "\""),
            k(K::CloseAngle, ">"),
            k(K::Text, "hi"),
            k(K::Whitespace, " "),
            k(K::Text, "there"),
            k(K::OpenAngle, "<"),
            k(K::ForwardSlash, "/"),
            k(K::Text, "a"),
            k(K::CloseAngle, ">"),
        ]
    );
}

#[test]
fn transition_splits_text() {
    use MarkupTokenKind as K;
    assert_eq!(
        kinds("a@b.c"),
        vec![k(K::Text, "a"), k(K::Transition, "@"), k(K::Text, "b.c")]
    );
}

#[test]
fn html_comment_markers() {
    use MarkupTokenKind as K;
    assert_eq!(
        kinds("<!--x-y-->"),
        vec![
            k(K::OpenAngle, "<"),
            k(K::Bang, "!"),
            k(K::DoubleHyphen, "--"),
            k(K::Text, "x-y"),
            k(K::DoubleHyphen, "--"),
            k(K::CloseAngle, ">"),
        ]
    );
}

#[test]
fn razor_comment_in_markup() {
    use MarkupTokenKind as K;
    assert_eq!(
        kinds("@**@\n"),
        vec![
            k(K::RazorCommentTransition, "@"),
            k(K::RazorCommentStar, "*"),
            k(K::RazorCommentStar, "*"),
            k(K::RazorCommentTransition, "@"),
            k(K::NewLine, "\n"),
        ]
    );
}

#[test]
fn reset_replays_identically() {
    let text = "<p>@* a *@ text</p>";
    let mut scanner = MarkupScanner::new(text);
    let all: Vec<_> = std::iter::from_fn(|| scanner.next_token()).collect();
    for boundary in all.iter().map(|t| t.start) {
        scanner.reset(boundary);
        let replay: Vec<_> = std::iter::from_fn(|| scanner.next_token()).collect();
        let expected: Vec<_> = all.iter().filter(|t| t.start >= boundary).cloned().collect();
        assert_eq!(replay, expected, "from {boundary}");
    }
}
