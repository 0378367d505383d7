//! Cursor-based pagination over a chat log.
//!
//! A page is computed from one atomic store read that returns up to
//! `limit + 1` ascending messages and the count of all messages at or after
//! the cursor. The extra message, when present, becomes `next_cursor`.
//! Cursors always walk forward in time; `reverse` only flips the order of
//! the returned page.

use imlog_types::error::ChatLogError;
use imlog_types::message::Message;
use imlog_types::page::{Page, PullQuery};
use tracing::debug;

use crate::chat::log::ChatLog;
use crate::repository::chat_log::ChatLogStore;

pub use imlog_types::config::DEFAULT_MAX_PULL_LIMIT;

/// Build a page from an ascending read of at most `limit + 1` messages.
///
/// - More than `limit` messages: `has_more`, `next_cursor` is the send time
///   of message `limit + 1`, which is dropped from the page.
/// - Otherwise: `has_more` iff `total_matching` exceeds what was returned,
///   and there is no `next_cursor`.
///
/// `limit = 0` yields an empty page whose `has_more` reports whether any
/// message exists at or after the cursor.
pub fn paginate(
    mut messages: Vec<Message>,
    total_matching: u64,
    limit: usize,
    reverse: bool,
) -> Page {
    let (has_more, next_cursor) = if messages.len() > limit {
        let next = messages[limit].send_time;
        messages.truncate(limit);
        (true, Some(next))
    } else {
        (total_matching > messages.len() as u64, None)
    };

    if reverse {
        messages.reverse();
    }

    Page {
        messages,
        has_more,
        next_cursor,
    }
}

/// Validates pull queries and runs them against a chat log.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    max_limit: u32,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PULL_LIMIT)
    }
}

impl Paginator {
    pub fn new(max_limit: u32) -> Self {
        Self { max_limit }
    }

    /// Check a query's arguments and resolve its effective limit.
    ///
    /// Rejects an empty chat id and negative limits; clamps limits above
    /// the configured maximum.
    pub fn resolve_limit(&self, query: &PullQuery) -> Result<u32, ChatLogError> {
        if query.chat.is_empty() {
            return Err(ChatLogError::InvalidArgument("chat is required".to_string()));
        }
        let requested = u32::try_from(query.limit).map_err(|_| {
            ChatLogError::InvalidArgument(format!(
                "limit must not be negative, got {}",
                query.limit
            ))
        })?;
        if requested > self.max_limit {
            debug!(
                requested,
                max = self.max_limit,
                "Pull limit clamped to maximum"
            );
            return Ok(self.max_limit);
        }
        Ok(requested)
    }

    /// Fetch one page for `query`.
    ///
    /// An unknown chat yields an empty page with `has_more = false`.
    pub async fn fetch<S: ChatLogStore>(
        &self,
        log: &ChatLog<S>,
        query: &PullQuery,
    ) -> Result<Page, ChatLogError> {
        let limit = self.resolve_limit(query)?;
        let (messages, total_matching) =
            log.range_from(&query.chat, query.cursor, limit).await?;
        let page = paginate(messages, total_matching, limit as usize, query.reverse);
        debug!(
            chat = %query.chat,
            cursor = query.cursor,
            limit,
            returned = page.messages.len(),
            has_more = page.has_more,
            "Page fetched"
        );
        Ok(page)
    }
}
