//! Multi-step decoding resumes from the committed checkpoint and state.

use bytes::Bytes;
use replayframe::{
    DecodeResult,
    DecoderEmbedder,
    Interrupt,
    ReplayBuf,
    ReplayDecoder,
    codec::examples::{LengthPrefixedDecoder, LengthState},
};
use rstest::rstest;
use thiserror::Error;

#[rstest]
#[case::header_split(vec![&[0_u8][..], &[3_u8][..], &b"abc"[..]])]
#[case::body_split(vec![&[0_u8, 3, b'a'][..], &b"b"[..], &b"c"[..]])]
#[case::whole(vec![&[0_u8, 3, b'a', b'b', b'c'][..]])]
fn length_prefixed_resumes_from_checkpoint(#[case] chunks: Vec<&[u8]>) {
    let mut embedder = DecoderEmbedder::new(LengthPrefixedDecoder::new(16));
    for chunk in chunks {
        embedder.offer(chunk).expect("offer");
    }
    assert_eq!(embedder.poll(), Some(Bytes::from_static(b"abc")));
    assert_eq!(
        embedder.driver().protocol_state(),
        &LengthState::AwaitingHeader
    );
}

#[test]
fn committed_header_survives_suspension() {
    let mut embedder = DecoderEmbedder::new(LengthPrefixedDecoder::new(16));
    embedder.offer([0, 4, b'x']).expect("offer");
    assert_eq!(
        embedder.driver().protocol_state(),
        &LengthState::AwaitingBody { length: 4 }
    );
    assert_eq!(embedder.driver().buffered_bytes(), 1);
    assert!(!embedder.finish().expect("truncated body is discarded"));
}

#[derive(Debug, Error)]
#[error("unsupported version {0}")]
struct UnsupportedVersion(u8);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Handshake {
    #[default]
    Version,
    Name {
        version: u8,
    },
}

/// A version byte, then a NUL-terminated name, recording every step taken.
#[derive(Default)]
struct HandshakeDecoder {
    steps: Vec<&'static str>,
}

impl ReplayDecoder for HandshakeDecoder {
    type Item = (u8, Bytes);
    type Error = UnsupportedVersion;
    type State = Handshake;

    fn decode(
        &mut self,
        buf: &mut ReplayBuf<'_, Handshake>,
    ) -> DecodeResult<(u8, Bytes), UnsupportedVersion> {
        let version = match *buf.state() {
            Handshake::Version => {
                self.steps.push("version");
                let version = buf.read_u8()?;
                if version != 1 {
                    return Err(Interrupt::Fault(UnsupportedVersion(version)));
                }
                buf.checkpoint_with(Handshake::Name { version });
                version
            }
            Handshake::Name { version } => version,
        };
        self.steps.push("name");
        let len = buf.bytes_before(0)?;
        let name = buf.read_bytes(len)?;
        buf.skip(1)?;
        buf.checkpoint_with(Handshake::Version);
        Ok(Some((version, name)))
    }
}

#[test]
fn each_step_runs_once_per_commit() {
    let mut embedder = DecoderEmbedder::new(HandshakeDecoder::default());
    embedder.offer([1, b'a']).expect("offer");
    embedder.offer(b"bc").expect("offer");
    embedder.offer([0_u8]).expect("offer");

    assert_eq!(embedder.poll(), Some((1, Bytes::from_static(b"abc"))));
    assert_eq!(
        embedder.driver().decoder().steps,
        ["version", "name", "name", "name"]
    );
}

#[test]
fn protocol_fault_reports_decoder_error() {
    let mut embedder = DecoderEmbedder::new(HandshakeDecoder::default());
    let err = embedder.offer([2_u8]).expect_err("bad version");
    assert_eq!(err.error_type(), "decode");
    assert_eq!(err.to_string(), "decode error: unsupported version 2");
}
