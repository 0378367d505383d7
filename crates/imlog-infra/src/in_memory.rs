//! In-process chat log store.
//!
//! Keeps every chat's log in a sorted `Vec` behind one `RwLock`. Used for
//! deterministic tests of the service stack and for running the server
//! without a database (`imlog serve --in-memory`).

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use imlog_core::repository::chat_log::ChatLogStore;
use imlog_types::error::StoreError;
use imlog_types::storage::{LogEntry, RangeSlice};

/// In-memory implementation of `ChatLogStore`.
///
/// Clones share the same logs. `set_unavailable` makes every call fail,
/// which stands in for a lost connection in tests.
#[derive(Clone, Debug, Default)]
pub struct InMemoryChatLogStore {
    logs: Arc<RwLock<HashMap<String, Vec<LogEntry>>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryChatLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "in-memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("in-memory store lock poisoned".to_string())
}

impl ChatLogStore for InMemoryChatLogStore {
    async fn append(&self, chat: &str, entry: LogEntry) -> Result<(), StoreError> {
        self.check_available()?;
        let mut logs = self.logs.write().map_err(|_| poisoned())?;
        let log = logs.entry(chat.to_string()).or_default();
        // After any equal scores, so ties keep insertion order.
        let at = log.partition_point(|e| e.score <= entry.score);
        log.insert(at, entry);
        Ok(())
    }

    async fn range_from(
        &self,
        chat: &str,
        cursor: i64,
        limit: u32,
    ) -> Result<RangeSlice, StoreError> {
        self.check_available()?;
        let logs = self.logs.read().map_err(|_| poisoned())?;
        let Some(log) = logs.get(chat) else {
            return Ok(RangeSlice::default());
        };

        let start = log.partition_point(|e| e.score < cursor);
        let matching = &log[start..];
        let take = (limit as usize).saturating_add(1);

        Ok(RangeSlice {
            entries: matching.iter().take(take).cloned().collect(),
            total_matching: matching.len() as u64,
        })
    }
}
