//! Newline-delimited framing.

use std::convert::Infallible;

use bytes::Bytes;

use crate::{
    decoder::{DecodeResult, ReplayDecoder},
    replay::ReplayBuf,
    state::NoState,
};

const NEWLINE: u8 = b'\n';

/// Splits input on `\n`, yielding each line without its terminator.
///
/// A trailing `\r` is stripped by default so `\r\n` endings decode the same
/// as `\n`. A line still missing its terminator when the stream ends is
/// discarded.
///
/// # Examples
///
/// ```
/// use replayframe::{DecoderEmbedder, FramingError, LineDecoder, ReplayError};
///
/// let mut lines = DecoderEmbedder::new(LineDecoder::new().max_length(4));
/// lines.offer("ok\r\n").unwrap();
/// assert_eq!(lines.poll().as_deref(), Some(&b"ok"[..]));
///
/// let err = lines.offer("too long").unwrap_err();
/// assert!(matches!(
///     err,
///     ReplayError::Framing(FramingError::DelimiterNotFound { limit: 4, .. })
/// ));
/// ```
#[derive(Clone, Debug)]
pub struct LineDecoder {
    strip_cr: bool,
    max_length: Option<usize>,
}

impl Default for LineDecoder {
    fn default() -> Self {
        Self {
            strip_cr: true,
            max_length: None,
        }
    }
}

impl LineDecoder {
    /// Decoder stripping `\r` with no line length bound.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Reject lines whose terminator is not found within `max` bytes.
    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Keep or strip a `\r` preceding the terminator.
    #[must_use]
    pub fn strip_carriage_return(mut self, strip: bool) -> Self {
        self.strip_cr = strip;
        self
    }
}

impl ReplayDecoder for LineDecoder {
    type Item = Bytes;
    type Error = Infallible;
    type State = NoState;

    fn decode(&mut self, buf: &mut ReplayBuf<'_, NoState>) -> DecodeResult<Bytes, Infallible> {
        let offset = match self.max_length {
            Some(max) => buf.bytes_before_within(NEWLINE, max)?,
            None => buf.bytes_before(NEWLINE)?,
        };
        let mut line = buf.read_bytes(offset)?;
        buf.skip(1)?;
        if self.strip_cr && line.last() == Some(&b'\r') {
            line.truncate(line.len() - 1);
        }
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::DecoderEmbedder;

    fn decode_all(decoder: LineDecoder, input: &[u8]) -> Vec<Bytes> {
        let mut embedder = DecoderEmbedder::new(decoder);
        embedder.offer(input).expect("offer");
        embedder.drain().collect()
    }

    #[rstest]
    #[case::plain(LineDecoder::new(), b"a\n", b"a".as_slice())]
    #[case::crlf_stripped(LineDecoder::new(), b"a\r\n", b"a".as_slice())]
    #[case::crlf_kept(LineDecoder::new().strip_carriage_return(false), b"a\r\n", b"a\r".as_slice())]
    #[case::empty_line(LineDecoder::new(), b"\n", b"".as_slice())]
    fn decodes_single_line(
        #[case] decoder: LineDecoder,
        #[case] input: &[u8],
        #[case] expected: &[u8],
    ) {
        assert_eq!(decode_all(decoder, input), vec![Bytes::copy_from_slice(expected)]);
    }

    #[test]
    fn line_at_max_length_is_accepted() {
        let lines = decode_all(LineDecoder::new().max_length(3), b"abc\n");
        assert_eq!(lines, vec![Bytes::from_static(b"abc")]);
    }

    #[test]
    fn partial_line_within_max_length_waits() {
        let mut embedder = DecoderEmbedder::new(LineDecoder::new().max_length(8));
        assert!(!embedder.offer("abc").expect("offer"));
        assert!(embedder.offer("\n").expect("offer"));
    }
}
