//! Unit tests for replay error types.

use std::{convert::Infallible, io};

use rstest::rstest;

use super::{FramingError, ReplayError};

#[derive(Debug, thiserror::Error)]
#[error("bad opcode")]
struct BadOpcode;

#[test]
fn buffer_limit_is_a_distinct_framing_fault() {
    let err: ReplayError<Infallible> = FramingError::BufferLimitExceeded {
        buffered: 33,
        limit: 32,
    }
    .into();
    assert!(err.is_framing());
    assert!(err.is_buffer_limit());
    assert_eq!(err.to_string(), "framing error: buffered bytes exceed limit: 33 > 32");
}

#[test]
fn delimiter_scan_fault_is_not_the_buffer_limit() {
    let err: ReplayError<Infallible> = FramingError::DelimiterNotFound {
        scanned: 10,
        limit: 8,
    }
    .into();
    assert!(err.is_framing());
    assert!(!err.is_buffer_limit());
}

#[test]
fn decode_fault_exposes_its_source() {
    use std::error::Error as _;

    let err = ReplayError::Decode(BadOpcode);
    assert!(!err.is_framing());
    let source = err.source().expect("decode fault should carry a source");
    assert_eq!(source.to_string(), "bad opcode");
}

#[rstest]
#[case::framing(ReplayError::Framing(FramingError::InvalidLengthEncoding), "framing")]
#[case::decode(ReplayError::Decode(BadOpcode), "decode")]
#[case::stalled(ReplayError::Stalled, "stalled")]
#[case::closed(ReplayError::Closed, "closed")]
#[case::faulted(ReplayError::Faulted, "faulted")]
#[case::io(ReplayError::Io(io::Error::other("reset")), "io")]
fn error_type_names_each_category(#[case] err: ReplayError<BadOpcode>, #[case] expected: &str) {
    assert_eq!(err.error_type(), expected);
}

#[test]
fn framing_error_converts_to_invalid_data() {
    let err: io::Error = FramingError::OversizedFrame {
        size: 2000,
        max: 1024,
    }
    .into();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}

#[test]
fn io_variant_round_trips_to_original_kind() {
    let err: ReplayError<BadOpcode> = io::Error::new(io::ErrorKind::ConnectionReset, "gone").into();
    let io_err: io::Error = err.into();
    assert_eq!(io_err.kind(), io::ErrorKind::ConnectionReset);
}

#[test]
fn decode_fault_converts_to_invalid_data() {
    let io_err: io::Error = ReplayError::Decode(BadOpcode).into();
    assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);
    assert!(io_err.to_string().contains("bad opcode"));
}
