//! Shared example decoders for tests and documentation.
//!
//! These implementations are intentionally minimal and meant to illustrate
//! replaying decode logic, with and without a protocol state carrier.

use std::convert::Infallible;

use bytes::Bytes;

use crate::{
    decoder::{DecodeResult, Interrupt, ReplayDecoder},
    error::FramingError,
    replay::ReplayBuf,
    state::NoState,
};

/// Steps of a header-then-body protocol.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LengthState {
    /// Next bytes are the length header.
    #[default]
    AwaitingHeader,
    /// Header committed; `length` body bytes follow.
    AwaitingBody { length: usize },
}

/// Two-byte network-order length prefix followed by the body.
///
/// The header is committed with a checkpoint, so a body split across chunks
/// never causes the header to be parsed again.
#[derive(Clone, Debug)]
pub struct LengthPrefixedDecoder {
    max_frame_length: usize,
}

impl LengthPrefixedDecoder {
    #[must_use]
    pub fn new(max_frame_length: usize) -> Self { Self { max_frame_length } }
}

impl ReplayDecoder for LengthPrefixedDecoder {
    type Item = Bytes;
    type Error = Infallible;
    type State = LengthState;

    fn decode(&mut self, buf: &mut ReplayBuf<'_, LengthState>) -> DecodeResult<Bytes, Infallible> {
        let length = match *buf.state() {
            LengthState::AwaitingHeader => {
                let length = usize::from(buf.read_u16()?);
                if length > self.max_frame_length {
                    return Err(FramingError::OversizedFrame {
                        size: length,
                        max: self.max_frame_length,
                    }
                    .into());
                }
                buf.checkpoint_with(LengthState::AwaitingBody { length });
                length
            }
            LengthState::AwaitingBody { length } => length,
        };
        let body = buf.read_bytes(length)?;
        buf.checkpoint_with(LengthState::AwaitingHeader);
        Ok(Some(body))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HotlineFrame {
    pub transaction_id: u32,
    pub payload: Bytes,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum HotlineState {
    #[default]
    Header,
    Payload {
        transaction_id: u32,
        data_size: usize,
    },
}

/// Hotline transactions: a 20-byte header carrying the data size, the total
/// size and a transaction id, then the payload.
#[derive(Clone, Debug)]
pub struct HotlineDecoder {
    max_frame_length: usize,
}

impl HotlineDecoder {
    const HEADER_LEN: usize = 20;

    #[must_use]
    pub fn new(max_frame_length: usize) -> Self { Self { max_frame_length } }
}

impl ReplayDecoder for HotlineDecoder {
    type Item = HotlineFrame;
    type Error = Infallible;
    type State = HotlineState;

    fn decode(
        &mut self,
        buf: &mut ReplayBuf<'_, HotlineState>,
    ) -> DecodeResult<HotlineFrame, Infallible> {
        let (transaction_id, data_size) = match *buf.state() {
            HotlineState::Header => {
                let data_size = buf.read_u32()? as usize;
                let total_size = buf.read_u32()? as usize;
                let transaction_id = buf.read_u32()?;
                buf.skip(8)?;
                if data_size > self.max_frame_length {
                    return Err(Interrupt::Framing(FramingError::OversizedFrame {
                        size: data_size,
                        max: self.max_frame_length,
                    }));
                }
                if data_size.checked_add(Self::HEADER_LEN) != Some(total_size) {
                    return Err(Interrupt::Framing(FramingError::InvalidLengthEncoding));
                }
                buf.checkpoint_with(HotlineState::Payload {
                    transaction_id,
                    data_size,
                });
                (transaction_id, data_size)
            }
            HotlineState::Payload {
                transaction_id,
                data_size,
            } => (transaction_id, data_size),
        };
        let payload = buf.read_bytes(data_size)?;
        buf.checkpoint_with(HotlineState::Header);
        Ok(Some(HotlineFrame {
            transaction_id,
            payload,
        }))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MysqlFrame {
    pub sequence_id: u8,
    pub payload: Bytes,
}

/// MySQL packets: a 3-byte little-endian length and a sequence id.
///
/// Stateless: a suspended attempt re-reads the four header bytes.
#[derive(Clone, Debug)]
pub struct MysqlDecoder {
    max_frame_length: usize,
}

impl MysqlDecoder {
    #[must_use]
    pub fn new(max_frame_length: usize) -> Self { Self { max_frame_length } }
}

impl ReplayDecoder for MysqlDecoder {
    type Item = MysqlFrame;
    type Error = Infallible;
    type State = NoState;

    fn decode(&mut self, buf: &mut ReplayBuf<'_, NoState>) -> DecodeResult<MysqlFrame, Infallible> {
        let len = usize::from(buf.read_u8()?)
            | (usize::from(buf.read_u8()?) << 8)
            | (usize::from(buf.read_u8()?) << 16);
        let sequence_id = buf.read_u8()?;
        if len > self.max_frame_length {
            return Err(FramingError::OversizedFrame {
                size: len,
                max: self.max_frame_length,
            }
            .into());
        }
        let payload = buf.read_bytes(len)?;
        Ok(Some(MysqlFrame {
            sequence_id,
            payload,
        }))
    }
}
