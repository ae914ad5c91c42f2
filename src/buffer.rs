//! Per-connection accumulation of undecoded bytes.
//!
//! [`AccumulationBuffer`] keeps three positions over a [`BytesMut`]:
//!
//! ```text
//!   0 ........ checkpoint ........ cursor ........ write_pos
//!   | committed |   read this attempt  |  unread input   |
//! ```
//!
//! `write_pos` is the length of the underlying storage. Bytes before the
//! checkpoint can never be re-read and are released by [`compact`].
//!
//! [`compact`]: AccumulationBuffer::compact

use bytes::{Buf, Bytes, BytesMut};

use crate::replay::{ScanError, Suspend};

/// Growable byte store with a rewindable read cursor.
///
/// Reads that need more bytes than are buffered return [`Suspend`] and leave
/// the cursor untouched.
///
/// # Examples
///
/// ```
/// use replayframe::AccumulationBuffer;
///
/// let mut buffer = AccumulationBuffer::new();
/// buffer.append(b"ab");
/// assert_eq!(buffer.read_u8(), Ok(b'a'));
/// assert!(buffer.read(2).is_err());
/// buffer.rewind();
/// assert_eq!(buffer.readable_bytes(), 2);
/// ```
#[derive(Debug, Default)]
pub struct AccumulationBuffer {
    bytes: BytesMut,
    cursor: usize,
    checkpoint: usize,
}

impl AccumulationBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Create an empty buffer with `capacity` bytes reserved.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: BytesMut::with_capacity(capacity),
            cursor: 0,
            checkpoint: 0,
        }
    }

    /// Append a delivered chunk after the write position.
    pub fn append(&mut self, chunk: &[u8]) { self.bytes.extend_from_slice(chunk); }

    /// Bytes between the cursor and the write position.
    #[must_use]
    pub fn readable_bytes(&self) -> usize { self.bytes.len() - self.cursor }

    /// Bytes retained from the checkpoint onwards.
    #[must_use]
    pub fn buffered_bytes(&self) -> usize { self.bytes.len() - self.checkpoint }

    /// Current read position.
    #[must_use]
    pub fn cursor(&self) -> usize { self.cursor }

    /// Current rewind position.
    #[must_use]
    pub fn checkpoint_position(&self) -> usize { self.checkpoint }

    /// End of delivered data.
    #[must_use]
    pub fn write_position(&self) -> usize { self.bytes.len() }

    /// Allocated capacity of the underlying storage.
    #[must_use]
    pub fn capacity(&self) -> usize { self.bytes.capacity() }

    /// Unread bytes, without moving the cursor.
    #[must_use]
    pub fn unread(&self) -> &[u8] { &self.bytes[self.cursor..] }

    fn require(&self, n: usize) -> Result<(), Suspend> {
        if self.readable_bytes() < n {
            Err(Suspend)
        } else {
            Ok(())
        }
    }

    /// Read `n` bytes into an owned [`Bytes`].
    ///
    /// # Errors
    ///
    /// Returns [`Suspend`] if fewer than `n` bytes are readable.
    pub fn read(&mut self, n: usize) -> Result<Bytes, Suspend> {
        self.require(n)?;
        let start = self.cursor;
        self.cursor += n;
        Ok(Bytes::copy_from_slice(&self.bytes[start..self.cursor]))
    }

    /// Read exactly `N` bytes into an array.
    ///
    /// # Errors
    ///
    /// Returns [`Suspend`] if fewer than `N` bytes are readable.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], Suspend> {
        self.require(N)?;
        let mut out = [0_u8; N];
        out.copy_from_slice(&self.bytes[self.cursor..self.cursor + N]);
        self.cursor += N;
        Ok(out)
    }

    /// Read one byte.
    ///
    /// # Errors
    ///
    /// Returns [`Suspend`] if no byte is readable.
    pub fn read_u8(&mut self) -> Result<u8, Suspend> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    /// Look at the next byte without consuming it.
    ///
    /// # Errors
    ///
    /// Returns [`Suspend`] if no byte is readable.
    pub fn peek_u8(&self) -> Result<u8, Suspend> {
        self.bytes.get(self.cursor).copied().ok_or(Suspend)
    }

    /// Advance the cursor by `n` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Suspend`] if fewer than `n` bytes are readable.
    pub fn skip(&mut self, n: usize) -> Result<(), Suspend> {
        self.require(n)?;
        self.cursor += n;
        Ok(())
    }

    /// Distance from the cursor to the first `delimiter`.
    ///
    /// The cursor does not move. When `limit` is set, the delimiter must sit
    /// at an offset no greater than `limit`; once more than `limit` bytes are
    /// readable without a match the scan fails permanently.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Suspend`] while the delimiter may still arrive and
    /// [`ScanError::LimitExceeded`] once it cannot appear within `limit`.
    pub fn scan_for(&self, delimiter: u8, limit: Option<usize>) -> Result<usize, ScanError> {
        let unread = self.unread();
        let window = match limit {
            Some(limit) => &unread[..unread.len().min(limit.saturating_add(1))],
            None => unread,
        };
        if let Some(offset) = window.iter().position(|&b| b == delimiter) {
            return Ok(offset);
        }
        match limit {
            Some(limit) if unread.len() > limit => Err(ScanError::LimitExceeded {
                scanned: unread.len(),
                limit,
            }),
            _ => Err(ScanError::Suspend),
        }
    }

    /// Commit the cursor as the rewind point.
    pub fn checkpoint(&mut self) { self.checkpoint = self.cursor; }

    /// Move the cursor back to the last checkpoint.
    pub fn rewind(&mut self) { self.cursor = self.checkpoint; }

    /// Release bytes before the checkpoint.
    ///
    /// Positions are rebased so the checkpoint becomes zero. Returns the
    /// number of bytes released.
    pub fn compact(&mut self) -> usize {
        let released = self.checkpoint;
        if released > 0 {
            self.bytes.advance(released);
            self.cursor -= released;
            self.checkpoint = 0;
        }
        released
    }

    /// Drop every buffered byte and reset all positions.
    ///
    /// Returns the number of unread bytes discarded.
    pub fn clear(&mut self) -> usize {
        let discarded = self.readable_bytes();
        self.bytes.clear();
        self.cursor = 0;
        self.checkpoint = 0;
        discarded
    }
}

#[cfg(test)]
mod tests;
