//! Bridge from [`ReplayDecoder`] to Tokio's codec machinery.
//!
//! [`ReplayCodec`] implements [`tokio_util::codec::Decoder`] on top of the
//! same [`ReplayDriver`] used by
//! [`DecoderEmbedder`](crate::DecoderEmbedder), so a decoder behaves the same
//! under `FramedRead` as it does in tests.
//!
//! Every chunk handed over by the reader is moved into the driver's
//! accumulation buffer; messages completed by that chunk are queued and
//! yielded one per `decode` call. A fault detected in the same chunk is held
//! back until those messages have been yielded. At end of input `decode_eof`
//! drains the queue, then signals stream end to the driver exactly once.

use std::collections::VecDeque;

use bytes::BytesMut;
use tokio::io::AsyncRead;
use tokio_util::codec::{Decoder, FramedRead};

use crate::{
    config::ReplayConfig,
    decoder::ReplayDecoder,
    driver::ReplayDriver,
    error::ReplayError,
};

#[doc(hidden)]
pub mod examples;

/// Tokio decoder driving a [`ReplayDecoder`].
#[derive(Debug)]
pub struct ReplayCodec<D: ReplayDecoder> {
    driver: ReplayDriver<D>,
    pending: VecDeque<D::Item>,
    deferred: Option<ReplayError<D::Error>>,
}

impl<D: ReplayDecoder> ReplayCodec<D> {
    /// Wrap `decoder` with the default limits.
    #[must_use]
    pub fn new(decoder: D) -> Self { Self::with_config(decoder, ReplayConfig::default()) }

    /// Wrap `decoder` with `config`.
    #[must_use]
    pub fn with_config(decoder: D, config: ReplayConfig) -> Self {
        Self {
            driver: ReplayDriver::with_config(decoder, config),
            pending: VecDeque::new(),
            deferred: None,
        }
    }

    /// The driver behind this codec.
    #[must_use]
    pub fn driver(&self) -> &ReplayDriver<D> { &self.driver }
}

impl<D: ReplayDecoder> Decoder for ReplayCodec<D> {
    type Item = D::Item;
    type Error = ReplayError<D::Error>;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if !src.is_empty() && self.deferred.is_none() {
            let chunk = src.split();
            if let Err(err) = self.driver.on_bytes_received(&chunk, &mut self.pending) {
                self.deferred = Some(err);
            }
        }
        if let Some(message) = self.pending.pop_front() {
            return Ok(Some(message));
        }
        self.deferred.take().map_or(Ok(None), Err)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(message) = self.decode(src)? {
            return Ok(Some(message));
        }
        self.driver.on_stream_end(&mut self.pending)?;
        Ok(self.pending.pop_front())
    }
}

/// Decode messages from `reader` with `decoder`.
///
/// # Examples
///
/// ```no_run
/// use futures::StreamExt;
/// use replayframe::{LineDecoder, ReplayConfig, codec::framed_read};
///
/// # async fn run(stream: tokio::net::TcpStream) {
/// let mut lines = framed_read(stream, LineDecoder::new(), ReplayConfig::default());
/// while let Some(Ok(line)) = lines.next().await {
///     println!("{}", String::from_utf8_lossy(&line));
/// }
/// # }
/// ```
pub fn framed_read<R, D>(reader: R, decoder: D, config: ReplayConfig) -> FramedRead<R, ReplayCodec<D>>
where
    R: AsyncRead,
    D: ReplayDecoder,
{
    FramedRead::new(reader, ReplayCodec::with_config(decoder, config))
}
