//! Per-connection decoding limits.
//!
//! A [`ReplayConfig`] is handed to each [`ReplayDriver`](crate::ReplayDriver)
//! when a decoder is attached to a connection. Limits are clamped into a sane
//! range on construction so a misconfigured caller cannot disable the buffer
//! bound entirely.

/// Smallest accepted buffer limit in bytes.
pub const MIN_BUFFER_LIMIT: usize = 16;

/// Largest accepted buffer limit in bytes (64 MiB).
pub const MAX_BUFFER_LIMIT: usize = 64 * 1024 * 1024;

/// Default buffer limit (1 MiB).
pub const DEFAULT_BUFFER_LIMIT: usize = 1024 * 1024;

const DEFAULT_INITIAL_CAPACITY: usize = 8 * 1024;
const DEFAULT_COMPACT_THRESHOLD: usize = 4 * 1024;

pub(crate) fn clamp_buffer_limit(value: usize) -> usize {
    value.clamp(MIN_BUFFER_LIMIT, MAX_BUFFER_LIMIT)
}

/// Limits applied to one connection's accumulation buffer.
///
/// # Examples
///
/// ```
/// use replayframe::ReplayConfig;
///
/// let config = ReplayConfig::default()
///     .max_buffered_bytes(4096)
///     .max_scan_length(Some(512));
///
/// assert_eq!(config.buffer_limit(), 4096);
/// assert_eq!(config.scan_limit(), Some(512));
/// ```
///
/// Limits can only be set through the builder methods:
///
/// ```compile_fail
/// use replayframe::ReplayConfig;
///
/// let config = ReplayConfig {
///     max_buffered_bytes: usize::MAX,
///     ..ReplayConfig::default()
/// };
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayConfig {
    /// Maximum buffered-but-undecoded bytes before the connection faults.
    ///
    /// Default: 1 MiB.
    max_buffered_bytes: usize,

    /// Maximum distance a delimiter may appear at when scanning with
    /// [`ReplayBuf::bytes_before`](crate::ReplayBuf::bytes_before).
    ///
    /// `None` scans without bound; the buffer limit still applies.
    max_scan_length: Option<usize>,

    /// Capacity reserved when the buffer is created.
    initial_capacity: usize,

    /// Committed bytes tolerated at the front of the buffer before they are
    /// discarded.
    ///
    /// A value of zero compacts after every delivery.
    compact_threshold: usize,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            max_buffered_bytes: DEFAULT_BUFFER_LIMIT,
            max_scan_length: None,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            compact_threshold: DEFAULT_COMPACT_THRESHOLD,
        }
    }
}

impl ReplayConfig {
    /// Set the buffered byte limit, clamped to
    /// [`MIN_BUFFER_LIMIT`]..=[`MAX_BUFFER_LIMIT`].
    #[must_use]
    pub fn max_buffered_bytes(mut self, limit: usize) -> Self {
        self.max_buffered_bytes = clamp_buffer_limit(limit);
        self
    }

    /// Set the delimiter scan limit.
    #[must_use]
    pub fn max_scan_length(mut self, limit: Option<usize>) -> Self {
        self.max_scan_length = limit;
        self
    }

    /// Set the initial buffer capacity.
    #[must_use]
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Set the compaction threshold.
    #[must_use]
    pub fn compact_threshold(mut self, bytes: usize) -> Self {
        self.compact_threshold = bytes;
        self
    }

    /// Maximum buffered-but-undecoded bytes.
    #[must_use]
    pub fn buffer_limit(&self) -> usize { self.max_buffered_bytes }

    /// Delimiter scan limit, if any.
    #[must_use]
    pub fn scan_limit(&self) -> Option<usize> { self.max_scan_length }

    /// Capacity reserved when the buffer is created.
    #[must_use]
    pub fn capacity_hint(&self) -> usize { self.initial_capacity }

    /// Committed bytes tolerated before compaction.
    #[must_use]
    pub fn compaction_threshold(&self) -> usize { self.compact_threshold }
}
