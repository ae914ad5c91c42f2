//! Deterministic harness for driving a decoder without a transport.
//!
//! [`DecoderEmbedder`] feeds byte chunks straight into a [`ReplayDriver`] and
//! queues whatever it produces. Tests use it to exercise decode logic exactly
//! as the transport path would, without sockets or an executor.

use std::collections::VecDeque;

use crate::{
    config::ReplayConfig,
    decoder::ReplayDecoder,
    driver::ReplayDriver,
    error::ReplayError,
};

/// Offer bytes, poll messages, finish the stream.
///
/// # Examples
///
/// ```
/// use bytes::Bytes;
/// use replayframe::{DecoderEmbedder, LineDecoder};
///
/// let mut embedder = DecoderEmbedder::new(LineDecoder::new());
/// assert!(!embedder.offer("A").unwrap());
/// assert!(!embedder.offer("B").unwrap());
/// assert!(embedder.offer("C\n").unwrap());
/// assert_eq!(embedder.poll(), Some(Bytes::from_static(b"ABC")));
/// assert_eq!(embedder.poll(), None);
/// ```
#[derive(Debug)]
pub struct DecoderEmbedder<D: ReplayDecoder> {
    driver: ReplayDriver<D>,
    output: VecDeque<D::Item>,
}

impl<D: ReplayDecoder> DecoderEmbedder<D> {
    /// Embed `decoder` with the default limits.
    #[must_use]
    pub fn new(decoder: D) -> Self { Self::with_config(decoder, ReplayConfig::default()) }

    /// Embed `decoder` with `config`.
    #[must_use]
    pub fn with_config(decoder: D, config: ReplayConfig) -> Self {
        Self {
            driver: ReplayDriver::with_config(decoder, config),
            output: VecDeque::new(),
        }
    }

    /// Deliver `chunk` to the decoder.
    ///
    /// Returns `true` if at least one message is waiting to be polled.
    ///
    /// # Errors
    ///
    /// Propagates any terminal [`ReplayError`] from the driver.
    pub fn offer(&mut self, chunk: impl AsRef<[u8]>) -> Result<bool, ReplayError<D::Error>> {
        self.driver
            .on_bytes_received(chunk.as_ref(), &mut self.output)?;
        Ok(!self.output.is_empty())
    }

    /// Signal the end of the stream.
    ///
    /// Returns `true` if at least one message is waiting to be polled.
    ///
    /// # Errors
    ///
    /// Propagates any terminal [`ReplayError`] from the driver.
    pub fn finish(&mut self) -> Result<bool, ReplayError<D::Error>> {
        self.driver.on_stream_end(&mut self.output)?;
        Ok(!self.output.is_empty())
    }

    /// Remove and return the oldest queued message.
    pub fn poll(&mut self) -> Option<D::Item> { self.output.pop_front() }

    /// Oldest queued message, left in place.
    #[must_use]
    pub fn peek(&self) -> Option<&D::Item> { self.output.front() }

    /// Number of queued messages.
    #[must_use]
    pub fn len(&self) -> usize { self.output.len() }

    /// True when no message is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.output.is_empty() }

    /// Remove every queued message in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = D::Item> + '_ { self.output.drain(..) }

    /// The driver behind this harness.
    #[must_use]
    pub fn driver(&self) -> &ReplayDriver<D> { &self.driver }
}
