use super::*;

#[test]
fn test_span_basic() {
    let span = Span::new(10, 20);
    assert_eq!(span.len(), 10);
    assert!(!span.is_empty());
    assert!(span.contains(15));
    assert!(!span.contains(20));
}

#[test]
fn test_span_from_len() {
    let span = Span::from_len(4, 3);
    assert_eq!(span, Span::new(4, 7));
    assert!(Span::from_len(9, 0).is_empty());
}

#[test]
fn test_span_merge_reversed_order() {
    let merged = Span::new(20, 30).merge(Span::new(10, 25));
    assert_eq!(merged, Span::new(10, 30));
}

#[test]
fn test_span_try_from_range_end_too_large() {
    let large_end = u32::MAX as usize + 1;
    let result = Span::try_from_range(0..large_end);
    assert!(matches!(result, Err(SpanError::EndTooLarge(_))));
}

#[test]
fn test_span_error_display() {
    let msg = SpanError::StartTooLarge(0x1_0000_0000).to_string();
    assert!(msg.contains("start"));
    assert!(msg.contains("0x100000000"));
}

#[test]
fn test_span_point_and_range() {
    let point = Span::point(42);
    assert!(point.is_empty());
    assert_eq!(Span::new(10, 20).to_range(), 10..20);
}

#[test]
fn test_span_debug_display() {
    let span = Span::new(100, 200);
    assert_eq!(format!("{span:?}"), "100..200");
    assert_eq!(format!("{span}"), "100..200");
}
