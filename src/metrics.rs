//! Metric helpers for `replayframe`.
//!
//! This module defines metric names and simple helper functions
//! wrapping the [`metrics`](https://docs.rs/metrics) crate. With the
//! `metrics` feature disabled the helpers compile to nothing.

#[cfg(feature = "metrics")]
use metrics::counter;

/// Name of the counter tracking messages delivered by drivers.
pub const MESSAGES_DECODED: &str = "replayframe_messages_decoded_total";
/// Name of the counter tracking decode attempts that suspended.
pub const SUSPENSIONS_TOTAL: &str = "replayframe_suspensions_total";
/// Name of the counter tracking terminal faults.
pub const FAULTS_TOTAL: &str = "replayframe_faults_total";
/// Name of the counter tracking bytes discarded as truncated at stream end.
pub const TRUNCATED_BYTES: &str = "replayframe_truncated_bytes_total";

/// Record `count` delivered messages.
pub fn inc_messages(count: usize) {
    #[cfg(feature = "metrics")]
    counter!(MESSAGES_DECODED).increment(count as u64);
    #[cfg(not(feature = "metrics"))]
    let _ = count;
}

/// Record a suspended decode attempt.
pub fn inc_suspensions() {
    #[cfg(feature = "metrics")]
    counter!(SUSPENSIONS_TOTAL).increment(1);
}

/// Record a terminal fault, labelled with its kind.
pub fn inc_faults(kind: &'static str) {
    #[cfg(feature = "metrics")]
    counter!(FAULTS_TOTAL, "kind" => kind).increment(1);
    #[cfg(not(feature = "metrics"))]
    let _ = kind;
}

/// Record bytes discarded because the stream ended mid-message.
pub fn add_truncated_bytes(bytes: usize) {
    #[cfg(feature = "metrics")]
    counter!(TRUNCATED_BYTES).increment(bytes as u64);
    #[cfg(not(feature = "metrics"))]
    let _ = bytes;
}
