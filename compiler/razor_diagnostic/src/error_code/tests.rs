use super::*;
use std::collections::HashSet;

#[test]
fn ids_are_unique() {
    let mut seen = HashSet::new();
    for code in ErrorCode::ALL {
        assert!(seen.insert(code.id()), "duplicate id {}", code.id());
    }
}

#[test]
fn ids_are_sorted_like_all() {
    let ids: Vec<_> = ErrorCode::ALL.iter().map(|c| c.id()).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}

#[test]
fn ids_follow_category_ranges() {
    assert!(ErrorCode::UnterminatedStringLiteral.id().starts_with("RZ10"));
    assert!(ErrorCode::ExpectedEndOfBlockBeforeEof.id().starts_with("RZ11"));
    assert!(ErrorCode::DuplicateDirective.id().starts_with("RZ12"));
    assert!(ErrorCode::ReservedWord.id().starts_with("RZ13"));
}

#[test]
fn display_is_id() {
    assert_eq!(ErrorCode::ReservedWord.to_string(), "RZ1300");
}
