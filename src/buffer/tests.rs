//! Unit tests for the accumulation buffer.

use rstest::{fixture, rstest};

use super::*;

#[fixture]
fn abc() -> AccumulationBuffer {
    let mut buffer = AccumulationBuffer::new();
    buffer.append(b"abc");
    buffer
}

fn assert_positions(buffer: &AccumulationBuffer) {
    assert!(buffer.checkpoint_position() <= buffer.cursor());
    assert!(buffer.cursor() <= buffer.write_position());
    assert!(buffer.write_position() <= buffer.capacity());
}

#[rstest]
fn read_moves_cursor_and_copies_bytes(mut abc: AccumulationBuffer) {
    let bytes = abc.read(2).expect("two bytes are buffered");
    assert_eq!(bytes.as_ref(), b"ab");
    assert_eq!(abc.cursor(), 2);
    assert_eq!(abc.readable_bytes(), 1);
    assert_positions(&abc);
}

#[rstest]
fn short_read_suspends_without_moving_cursor(mut abc: AccumulationBuffer) {
    abc.skip(1).expect("one byte is buffered");
    assert_eq!(abc.read(3), Err(Suspend));
    assert_eq!(abc.skip(3), Err(Suspend));
    assert_eq!(abc.cursor(), 1);
}

#[rstest]
fn rewind_returns_to_checkpoint(mut abc: AccumulationBuffer) {
    abc.skip(1).expect("skip");
    abc.checkpoint();
    abc.skip(2).expect("skip");
    abc.rewind();
    assert_eq!(abc.cursor(), 1);
    assert_eq!(abc.read_u8(), Ok(b'b'));
}

#[rstest]
fn peek_does_not_consume(abc: AccumulationBuffer) {
    assert_eq!(abc.peek_u8(), Ok(b'a'));
    assert_eq!(abc.cursor(), 0);
}

#[test]
fn peek_on_empty_buffer_suspends() {
    assert_eq!(AccumulationBuffer::new().peek_u8(), Err(Suspend));
}

#[rstest]
fn read_array_reads_fixed_width(mut abc: AccumulationBuffer) {
    assert_eq!(abc.read_array::<2>(), Ok([b'a', b'b']));
    assert_eq!(abc.read_array::<2>(), Err(Suspend));
}

#[rstest]
#[case::found_first(b"\nabc".as_slice(), None, Ok(0))]
#[case::found_later(b"abc\n".as_slice(), None, Ok(3))]
#[case::absent_unbounded(b"abcdef".as_slice(), None, Err(ScanError::Suspend))]
#[case::absent_within_limit(b"abc".as_slice(), Some(3), Err(ScanError::Suspend))]
#[case::found_at_limit(b"abc\n".as_slice(), Some(3), Ok(3))]
#[case::absent_beyond_limit(
    b"abcd".as_slice(),
    Some(3),
    Err(ScanError::LimitExceeded { scanned: 4, limit: 3 })
)]
#[case::found_beyond_limit(
    b"abcd\n".as_slice(),
    Some(3),
    Err(ScanError::LimitExceeded { scanned: 5, limit: 3 })
)]
fn scan_reports_offset_or_suspension(
    #[case] input: &[u8],
    #[case] limit: Option<usize>,
    #[case] expected: Result<usize, ScanError>,
) {
    let mut buffer = AccumulationBuffer::new();
    buffer.append(input);
    assert_eq!(buffer.scan_for(b'\n', limit), expected);
    assert_eq!(buffer.cursor(), 0);
}

#[test]
fn scan_starts_at_cursor() {
    let mut buffer = AccumulationBuffer::new();
    buffer.append(b"a\nb\n");
    buffer.skip(2).expect("skip");
    assert_eq!(buffer.scan_for(b'\n', None), Ok(1));
}

#[test]
fn compact_releases_committed_prefix() {
    let mut buffer = AccumulationBuffer::with_capacity(16);
    buffer.append(b"hello world");
    buffer.skip(6).expect("skip");
    buffer.checkpoint();
    buffer.skip(2).expect("skip");

    assert_eq!(buffer.compact(), 6);
    assert_eq!(buffer.checkpoint_position(), 0);
    assert_eq!(buffer.cursor(), 2);
    assert_eq!(buffer.buffered_bytes(), 5);
    buffer.rewind();
    assert_eq!(buffer.unread(), b"world");
    assert_positions(&buffer);
}

#[rstest]
fn compact_without_checkpoint_is_a_no_op(mut abc: AccumulationBuffer) {
    assert_eq!(abc.compact(), 0);
    assert_eq!(abc.write_position(), 3);
}

#[rstest]
fn clear_reports_unread_bytes(mut abc: AccumulationBuffer) {
    abc.skip(1).expect("skip");
    assert_eq!(abc.clear(), 2);
    assert_eq!(abc.write_position(), 0);
    assert_eq!(abc.cursor(), 0);
}

#[test]
fn append_after_partial_read_extends_unread_region() {
    let mut buffer = AccumulationBuffer::new();
    buffer.append(b"ab");
    buffer.skip(1).expect("skip");
    buffer.append(b"cd");
    assert_eq!(buffer.unread(), b"bcd");
    assert_eq!(buffer.buffered_bytes(), 4);
}
