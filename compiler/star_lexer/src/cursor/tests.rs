use super::Cursor;

#[test]
fn advance_tracks_lines_and_columns() {
    let mut cursor = Cursor::new("ab\nc");
    cursor.advance();
    cursor.advance();
    assert_eq!((cursor.line(), cursor.column()), (1, 2));
    cursor.advance();
    assert_eq!((cursor.line(), cursor.column()), (2, 0));
    cursor.advance();
    assert_eq!((cursor.line(), cursor.column(), cursor.last()), (2, 1, 'c'));
    assert_eq!(cursor.current(), None);
    assert_eq!(cursor.advance(), None);
}

#[test]
fn peek_does_not_consume() {
    let cursor = Cursor::new("xy");
    assert_eq!(cursor.current(), Some('x'));
    assert_eq!(cursor.peek_next(), Some('y'));
    assert_eq!(cursor.pos(), 0);
}

#[test]
fn steps_over_multibyte_characters() {
    let mut cursor = Cursor::new("é{");
    assert_eq!(cursor.advance(), Some('é'));
    assert_eq!(cursor.pos(), 2);
    assert_eq!(cursor.current(), Some('{'));
    assert_eq!(cursor.slice_from(0), "é");
}

#[test]
fn eat_and_eat_while() {
    let mut cursor = Cursor::new("==123x");
    assert!(cursor.eat('='));
    assert!(!cursor.eat('!'));
    cursor.advance();
    cursor.eat_while(|c| c.is_ascii_digit());
    assert_eq!(cursor.current(), Some('x'));
    assert_eq!(cursor.slice_from(2), "123");
}
