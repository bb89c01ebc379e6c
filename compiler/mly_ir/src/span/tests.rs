use super::*;

#[test]
fn span_basic() {
    let span = Span::new(10, 20);
    assert_eq!(span.len(), 10);
    assert!(!span.is_empty());
    assert!(span.contains(15));
    assert!(!span.contains(20));
}

#[test]
fn span_merge() {
    let merged = Span::new(10, 20).merge(Span::new(15, 30));
    assert_eq!(merged, Span::new(10, 30));
}

#[test]
fn point_span_is_empty() {
    let span = Span::point(7);
    assert!(span.is_empty());
    assert!(!span.contains(7));
    assert!(Span::new(0, 10).contains_span(span));
}

#[test]
fn try_from_range_rejects_overflow() {
    let too_big = u32::MAX as usize + 1;
    assert_eq!(
        Span::try_from_range(0..too_big),
        Err(SpanError::EndTooLarge(too_big))
    );
    assert_eq!(
        Span::try_from_range(too_big..too_big),
        Err(SpanError::StartTooLarge(too_big))
    );
    assert_eq!(Span::try_from_range(3..9), Ok(Span::new(3, 9)));
}

#[test]
fn debug_and_display_are_ranges() {
    let span = Span::new(4, 11);
    assert_eq!(format!("{span:?}"), "4..11");
    assert_eq!(span.to_string(), "4..11");
    assert_eq!(span.to_range(), 4..11);
}
