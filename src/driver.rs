//! Decode driver state machine.
//!
//! [`ReplayDriver`] owns one connection's [`AccumulationBuffer`] and
//! [`StateCarrier`], and turns delivered chunks into messages by repeatedly
//! invoking a [`ReplayDecoder`]:
//!
//! ```text
//!   Idle ──bytes──▶ Decoding ──┬─ produced / consumed ──▶ Decoding
//!                              ├─ suspended ────────────▶ Suspended
//!                              ├─ no progress ──────────▶ Idle
//!                              └─ fault ────────────────▶ Faulted
//!   Idle | Suspended ──end──▶ Finishing ──▶ Closed
//! ```
//!
//! A driver is bound to a single connection and needs `&mut self` for every
//! call, so the buffer and state are never shared.

use crate::{
    buffer::AccumulationBuffer,
    config::ReplayConfig,
    decoder::{Interrupt, ReplayDecoder},
    error::{FramingError, ReplayError},
    metrics,
    replay::ReplayBuf,
    state::StateCarrier,
};

/// Lifecycle phase of a [`ReplayDriver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// Waiting for input with nothing partially decoded.
    Idle,
    /// Inside the decode loop.
    Decoding,
    /// Waiting for input after an attempt ran out of bytes.
    Suspended,
    /// Running the final attempt after the stream ended.
    Finishing,
    /// Stream ended; no further input is accepted.
    Closed,
    /// A terminal fault was returned; no further input is accepted.
    Faulted,
}

/// Outcome of a single decode attempt as seen by the driver.
enum Attempt<T> {
    Produced(T),
    Consumed,
    NoProgress,
    Suspended,
}

/// Drives a [`ReplayDecoder`] over incrementally delivered bytes.
///
/// # Examples
///
/// ```
/// use replayframe::{LineDecoder, ReplayDriver};
///
/// let mut driver = ReplayDriver::new(LineDecoder::new());
/// let mut out = Vec::new();
///
/// driver.on_bytes_received(b"hel", &mut out).unwrap();
/// assert!(out.is_empty());
///
/// driver.on_bytes_received(b"lo\nwor", &mut out).unwrap();
/// assert_eq!(out, vec![bytes::Bytes::from_static(b"hello")]);
/// ```
#[derive(Debug)]
pub struct ReplayDriver<D: ReplayDecoder> {
    decoder: D,
    buffer: AccumulationBuffer,
    state: StateCarrier<D::State>,
    config: ReplayConfig,
    phase: DriverState,
}

impl<D: ReplayDecoder> ReplayDriver<D> {
    /// Attach `decoder` to a new connection using the default limits.
    #[must_use]
    pub fn new(decoder: D) -> Self { Self::with_config(decoder, ReplayConfig::default()) }

    /// Attach `decoder` to a new connection using `config`.
    #[must_use]
    pub fn with_config(decoder: D, config: ReplayConfig) -> Self {
        Self {
            decoder,
            buffer: AccumulationBuffer::with_capacity(config.capacity_hint()),
            state: StateCarrier::default(),
            config,
            phase: DriverState::Idle,
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn state(&self) -> DriverState { self.phase }

    /// Protocol state as of the last checkpoint.
    #[must_use]
    pub fn protocol_state(&self) -> &D::State { self.state.get() }

    /// Bytes retained but not yet committed by a decoded message.
    #[must_use]
    pub fn buffered_bytes(&self) -> usize { self.buffer.buffered_bytes() }

    /// True once the stream has ended or a fault was returned.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        matches!(self.phase, DriverState::Closed | DriverState::Faulted)
    }

    /// Limits in force for this connection.
    #[must_use]
    pub fn config(&self) -> &ReplayConfig { &self.config }

    /// Borrow the decoder.
    #[must_use]
    pub fn decoder(&self) -> &D { &self.decoder }

    /// Mutably borrow the decoder.
    pub fn decoder_mut(&mut self) -> &mut D { &mut self.decoder }

    /// Append `chunk` and decode every message it completes into `sink`.
    ///
    /// Returns the number of messages emitted. Messages decoded before a
    /// fault is detected are still emitted.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::Closed`] after [`on_stream_end`], and
    /// [`ReplayError::Faulted`] after an earlier fault. Decode faults, framing
    /// faults (including [`FramingError::BufferLimitExceeded`]) and
    /// [`ReplayError::Stalled`] are terminal.
    ///
    /// [`on_stream_end`]: Self::on_stream_end
    pub fn on_bytes_received<X>(
        &mut self,
        chunk: &[u8],
        sink: &mut X,
    ) -> Result<usize, ReplayError<D::Error>>
    where
        X: Extend<D::Item>,
    {
        self.ensure_accepting()?;
        self.buffer.append(chunk);

        let produced = self.decode_loop(sink)?;
        self.compact_if_due();
        self.enforce_limit()?;
        Ok(produced)
    }

    /// Signal the end of the stream.
    ///
    /// Any readable bytes get one final attempt through
    /// [`ReplayDecoder::decode_last`]. If that attempt suspends, the bytes are
    /// a truncated message and are discarded. The driver is closed
    /// afterwards and a second call returns `Ok(0)`.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::Faulted`] after an earlier fault, or the fault
    /// raised by the final attempt.
    pub fn on_stream_end<X>(&mut self, sink: &mut X) -> Result<usize, ReplayError<D::Error>>
    where
        X: Extend<D::Item>,
    {
        match self.phase {
            DriverState::Closed => return Ok(0),
            DriverState::Faulted => return Err(ReplayError::Faulted),
            _ => {}
        }
        self.phase = DriverState::Finishing;

        let mut produced = 0;
        if self.buffer.readable_bytes() > 0 {
            match self.attempt(true)? {
                Attempt::Produced(message) => {
                    sink.extend(std::iter::once(message));
                    produced = 1;
                }
                Attempt::Suspended => {
                    let discarded = self.buffer.readable_bytes();
                    tracing::debug!(discarded, "stream ended mid-message; discarding");
                    metrics::add_truncated_bytes(discarded);
                }
                Attempt::Consumed | Attempt::NoProgress => {}
            }
        }

        let leftover = self.buffer.clear();
        if leftover > 0 {
            tracing::trace!(leftover, "cleared unread bytes at stream end");
        }
        metrics::inc_messages(produced);
        self.phase = DriverState::Closed;
        Ok(produced)
    }

    fn ensure_accepting(&self) -> Result<(), ReplayError<D::Error>> {
        match self.phase {
            DriverState::Closed => Err(ReplayError::Closed),
            DriverState::Faulted => Err(ReplayError::Faulted),
            _ => Ok(()),
        }
    }

    fn decode_loop<X>(&mut self, sink: &mut X) -> Result<usize, ReplayError<D::Error>>
    where
        X: Extend<D::Item>,
    {
        let mut produced = 0;
        self.phase = DriverState::Idle;
        while self.buffer.readable_bytes() > 0 {
            self.phase = DriverState::Decoding;
            match self.attempt(false)? {
                Attempt::Produced(message) => {
                    sink.extend(std::iter::once(message));
                    metrics::inc_messages(1);
                    produced += 1;
                }
                Attempt::Consumed => {}
                Attempt::NoProgress => {
                    self.phase = DriverState::Idle;
                    break;
                }
                Attempt::Suspended => {
                    self.phase = DriverState::Suspended;
                    break;
                }
            }
        }
        if self.phase == DriverState::Decoding {
            self.phase = DriverState::Idle;
        }
        Ok(produced)
    }

    /// Run one decode attempt from the current checkpoint.
    ///
    /// On return the buffer cursor equals its checkpoint.
    fn attempt(&mut self, finishing: bool) -> Result<Attempt<D::Item>, ReplayError<D::Error>> {
        self.buffer.rewind();
        let start = self.buffer.cursor();
        let generation = self.state.generation();

        let outcome = {
            let mut buf = ReplayBuf::new(
                &mut self.buffer,
                &mut self.state,
                self.config.scan_limit(),
                finishing,
            );
            if finishing {
                self.decoder.decode_last(&mut buf)
            } else {
                self.decoder.decode(&mut buf)
            }
        };
        let progressed = self.buffer.cursor() != start || self.state.generation() != generation;

        match outcome {
            Ok(Some(message)) if progressed || finishing => {
                self.buffer.checkpoint();
                Ok(Attempt::Produced(message))
            }
            Ok(Some(_)) => Err(self.fail(ReplayError::Stalled)),
            Ok(None) if progressed => {
                self.buffer.checkpoint();
                Ok(Attempt::Consumed)
            }
            Ok(None) => Ok(Attempt::NoProgress),
            Err(Interrupt::Suspend) => {
                self.buffer.rewind();
                tracing::debug!(
                    committed = self.buffer.checkpoint_position(),
                    readable = self.buffer.readable_bytes(),
                    "decode suspended; waiting for more input"
                );
                metrics::inc_suspensions();
                Ok(Attempt::Suspended)
            }
            Err(Interrupt::Framing(err)) => Err(self.fail(ReplayError::Framing(err))),
            Err(Interrupt::Fault(err)) => Err(self.fail(ReplayError::Decode(err))),
        }
    }

    fn compact_if_due(&mut self) {
        let committed = self.buffer.checkpoint_position();
        if committed == 0 {
            return;
        }
        if committed >= self.config.compaction_threshold() || self.buffer.buffered_bytes() == 0 {
            let released = self.buffer.compact();
            tracing::trace!(released, "compacted accumulation buffer");
        }
    }

    fn enforce_limit(&mut self) -> Result<(), ReplayError<D::Error>> {
        let buffered = self.buffer.buffered_bytes();
        let limit = self.config.buffer_limit();
        if buffered > limit {
            return Err(self.fail(FramingError::BufferLimitExceeded { buffered, limit }.into()));
        }
        Ok(())
    }

    fn fail(&mut self, err: ReplayError<D::Error>) -> ReplayError<D::Error> {
        self.phase = DriverState::Faulted;
        log::warn!(
            "decode fault: kind={}, buffered={}, error={err}",
            err.error_type(),
            self.buffer.buffered_bytes()
        );
        metrics::inc_faults(err.error_type());
        err
    }
}
