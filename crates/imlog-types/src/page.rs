//! Pagination query and result types.

use serde::{Deserialize, Serialize};

use crate::message::Message;

/// A validated-at-use request for one page of a chat log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullQuery {
    /// Chat to read. Must be non-empty.
    pub chat: String,
    /// Inclusive lower bound on `send_time`. 0 reads from the start.
    pub cursor: i64,
    /// Maximum page size. Negative values are rejected.
    pub limit: i32,
    /// Return the page newest-first instead of oldest-first.
    pub reverse: bool,
}

impl PullQuery {
    pub fn new(chat: impl Into<String>, cursor: i64, limit: i32) -> Self {
        Self {
            chat: chat.into(),
            cursor,
            limit,
            reverse: false,
        }
    }

    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }
}

/// One page of a chat log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Page contents, ascending by `send_time` (descending when reversed).
    pub messages: Vec<Message>,
    /// Entries exist beyond this page for the given cursor.
    pub has_more: bool,
    /// `send_time` of the first message beyond this page, when it was seen.
    pub next_cursor: Option<i64>,
}
