use super::*;
use pretty_assertions::assert_eq;

#[test]
fn location_tracks_mixed_line_endings() {
    let src = SourceText::new("ab\r\ncd\ne\rf");
    assert_eq!(src.line_count(), 4);
    assert_eq!(
        src.location(5),
        SourceLocation {
            absolute_index: 5,
            line: 1,
            column: 1
        }
    );
    assert_eq!(src.location(9).line, 3);
}

#[test]
fn location_counts_chars_not_bytes() {
    let src = SourceText::new("é@x");
    let loc = src.location(2);
    assert_eq!(loc.column, 1);
}

#[test]
fn offset_of_round_trips_location() {
    let src = SourceText::new("one\ntwo\nthree");
    for offset in 0..src.len() {
        let loc = src.location(offset);
        assert_eq!(src.offset_of(loc.line, loc.column), Some(offset));
    }
    assert_eq!(src.offset_of(9, 0), None);
}

#[test]
fn cursor_peek_read_and_seek() {
    let src = SourceText::new("a@ü");
    let mut cursor = src.cursor();
    assert_eq!(cursor.peek(), 'a');
    assert_eq!(cursor.peek_at(2), 'ü');
    assert_eq!(cursor.read(), 'a');
    assert_eq!(cursor.read(), '@');
    assert_eq!(cursor.position(), 2);
    assert_eq!(cursor.read(), 'ü');
    assert!(cursor.is_eof());
    assert_eq!(cursor.read(), EOF_CHAR);

    cursor.set_position(3);
    assert_eq!(cursor.position(), 2, "snaps to char boundary");
    cursor.set_position(100);
    assert!(cursor.is_eof());
}

#[test]
fn cursor_slice_from() {
    let src = SourceText::new("hello world");
    let mut cursor = src.cursor();
    cursor.advance_bytes(5);
    assert_eq!(cursor.slice_from(0), "hello");
    assert!(cursor.starts_with(" wor"));
}
