//! ChatLogStore trait definition.
//!
//! The store is an ordered key-value capability: one collection per chat id,
//! entries scored by send time, with range-by-score and count-by-score reads.

use imlog_types::error::StoreError;
use imlog_types::storage::{LogEntry, RangeSlice};

/// Storage port for per-chat ordered logs.
///
/// Implementations live in imlog-infra (e.g., `SqliteChatLogStore`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ChatLogStore: Send + Sync {
    /// Insert an entry into the chat's log, scored by `entry.score`.
    ///
    /// Not idempotent: appending the same entry twice stores it twice.
    /// The chat's log is created on first append.
    fn append(
        &self,
        chat: &str,
        entry: LogEntry,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Read entries with score >= `cursor`, ascending.
    ///
    /// Returns up to `limit + 1` entries (the extra one is a peek used to
    /// detect continuation) together with the count of all entries with
    /// score >= `cursor`. Both are taken from one atomic read. An unknown
    /// chat yields an empty slice.
    fn range_from(
        &self,
        chat: &str,
        cursor: i64,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<RangeSlice, StoreError>> + Send;
}
