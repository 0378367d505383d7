//! Storage-layer shapes exchanged with the chat log store.
//!
//! The store never sees a `Message`: it holds opaque encoded payloads scored
//! by send time.

/// One stored chat log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Ordering score (the message's send time).
    pub score: i64,
    /// Encoded message bytes.
    pub payload: Vec<u8>,
}

/// Result of a single atomic range read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSlice {
    /// Up to `limit + 1` entries with score >= cursor, ascending.
    pub entries: Vec<LogEntry>,
    /// Count of all entries with score >= cursor at the time of the read.
    pub total_matching: u64,
}
