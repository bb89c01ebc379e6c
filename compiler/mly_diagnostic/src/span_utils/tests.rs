use super::*;

#[test]
fn single_line() {
    let source = "%token A";
    assert_eq!(offset_to_line_col(source, 0), (1, 1));
    assert_eq!(offset_to_line_col(source, 7), (1, 8));
}

#[test]
fn multiple_lines() {
    let source = "abc\ndefgh\nij";
    assert_eq!(offset_to_line_col(source, 0), (1, 1));
    assert_eq!(offset_to_line_col(source, 2), (1, 3));
    assert_eq!(offset_to_line_col(source, 3), (1, 4)); // the newline itself
    assert_eq!(offset_to_line_col(source, 4), (2, 1));
    assert_eq!(offset_to_line_col(source, 7), (2, 4));
    assert_eq!(offset_to_line_col(source, 10), (3, 1));
}

#[test]
fn empty_source() {
    assert_eq!(offset_to_line_col("", 0), (1, 1));
}

#[test]
fn offset_past_end_clamps() {
    assert_eq!(offset_to_line_col("ab", 10), (1, 3));
}

#[test]
fn columns_count_characters() {
    let source = "αβγ\nδε";
    assert_eq!(offset_to_line_col(source, 2), (1, 2));
    assert_eq!(offset_to_line_col(source, 4), (1, 3));
    assert_eq!(offset_to_line_col(source, 7), (2, 1));
}

#[test]
fn line_number_of_span() {
    let source = "a\nb\nc";
    assert_eq!(line_number(source, Span::new(0, 1)), 1);
    assert_eq!(line_number(source, Span::new(2, 3)), 2);
    assert_eq!(line_number(source, Span::new(4, 5)), 3);
}

#[test]
fn table_line_starts() {
    let source = "a\nbb\n\nccc";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.line_count(), 4);
    assert_eq!(table.line_start_offset(0), None);
    assert_eq!(table.line_start_offset(1), Some(0));
    assert_eq!(table.line_start_offset(2), Some(2));
    assert_eq!(table.line_start_offset(3), Some(5));
    assert_eq!(table.line_start_offset(4), Some(6));
    assert_eq!(table.line_start_offset(5), None);
}

#[test]
fn table_agrees_with_one_shot_lookup() {
    let source = "%token A\r\n%%\r\nstart: A\n";
    let table = LineOffsetTable::build(source);
    for offset in 0..=source.len() as u32 {
        assert_eq!(
            table.offset_to_line_col(source, offset),
            offset_to_line_col(source, offset),
            "offset {offset}"
        );
    }
}

#[test]
fn line_text_strips_line_endings() {
    let source = "one\r\ntwo\nthree";
    assert_eq!(line_text(source, 1), Some("one"));
    assert_eq!(line_text(source, 2), Some("two"));
    assert_eq!(line_text(source, 3), Some("three"));
    assert_eq!(line_text(source, 4), None);
    assert_eq!(line_text(source, 0), None);
}
