//! In-crate mock store used by the core unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use imlog_types::error::StoreError;
use imlog_types::storage::{LogEntry, RangeSlice};

use crate::repository::chat_log::ChatLogStore;

/// A mock store keeping entries sorted by score, with switchable failure.
#[derive(Default)]
pub struct MockStore {
    logs: Mutex<HashMap<String, Vec<LogEntry>>>,
    failing: AtomicBool,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `StoreError::Unavailable`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Insert raw bytes, bypassing the codec.
    pub fn insert_raw(&self, chat: &str, score: i64, payload: &[u8]) {
        let mut logs = self.logs.lock().unwrap();
        let log = logs.entry(chat.to_string()).or_default();
        let at = log.partition_point(|e| e.score <= score);
        log.insert(
            at,
            LogEntry {
                score,
                payload: payload.to_vec(),
            },
        );
    }

    pub fn len(&self, chat: &str) -> usize {
        self.logs
            .lock()
            .unwrap()
            .get(chat)
            .map(Vec::len)
            .unwrap_or(0)
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

impl ChatLogStore for MockStore {
    async fn append(&self, chat: &str, entry: LogEntry) -> Result<(), StoreError> {
        self.check()?;
        self.insert_raw(chat, entry.score, &entry.payload);
        Ok(())
    }

    async fn range_from(
        &self,
        chat: &str,
        cursor: i64,
        limit: u32,
    ) -> Result<RangeSlice, StoreError> {
        self.check()?;
        let logs = self.logs.lock().unwrap();
        let Some(log) = logs.get(chat) else {
            return Ok(RangeSlice::default());
        };
        let start = log.partition_point(|e| e.score < cursor);
        let matching = &log[start..];
        Ok(RangeSlice {
            entries: matching.iter().take(limit as usize + 1).cloned().collect(),
            total_matching: matching.len() as u64,
        })
    }
}
