//! Utilities for driving a [`ReplayDecoder`](replayframe::ReplayDecoder)
//! during tests.
//!
//! These helpers split input into arbitrary chunks, feed them through a
//! [`DecoderEmbedder`](replayframe::DecoderEmbedder) or over an in-memory
//! `tokio::io::duplex` stream, and return whatever was decoded for easy
//! assertions.
//!
//! ```rust
//! use replayframe::LineDecoder;
//! use replayframe_testing::{decode_bytewise, decode_whole};
//!
//! let input = b"one\ntwo\n";
//! assert_eq!(
//!     decode_bytewise(LineDecoder::new, input).unwrap(),
//!     decode_whole(LineDecoder::new, input).unwrap(),
//! );
//! ```

pub mod helpers;
pub mod logging;

pub use helpers::{
    chunking::{decode_bytewise, decode_chunks, decode_whole, split_at_points, split_every},
    drive::{drive_with_chunks, drive_with_chunks_config},
    strategies::{deterministic_runner, line_payloads, split_points},
};
pub use logging::{LoggerHandle, logger};
