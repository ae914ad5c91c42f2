#![doc(html_root_url = "https://docs.rs/replayframe/latest")]
//! Public API for the `replayframe` library.
//!
//! This crate provides a replaying incremental decoder: protocol decode logic
//! is written as if a whole message were already buffered, and the
//! [`ReplayDriver`] transparently rewinds and retries as fragments arrive.
//! [`DecoderEmbedder`] drives a decoder deterministically for tests, and
//! [`ReplayCodec`] plugs the same driver into `tokio_util`'s `FramedRead`.

pub mod buffer;
pub mod byte_order;
pub mod codec;
pub mod config;
pub mod decoder;
pub mod driver;
pub mod embedder;
pub mod error;
pub mod line;
pub mod metrics;
pub mod replay;
pub mod state;

pub use buffer::AccumulationBuffer;
pub use codec::ReplayCodec;
pub use config::ReplayConfig;
pub use decoder::{DecodeResult, Interrupt, ReplayDecoder};
pub use driver::{DriverState, ReplayDriver};
pub use embedder::DecoderEmbedder;
pub use error::{FramingError, ReplayError};
pub use line::LineDecoder;
pub use metrics::{FAULTS_TOTAL, MESSAGES_DECODED, SUSPENSIONS_TOTAL, TRUNCATED_BYTES};
pub use replay::{ReplayBuf, ScanError, Suspend};
pub use state::{NoState, StateCarrier};
