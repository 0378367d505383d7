//! Typed chat log over a `ChatLogStore`.

use imlog_types::error::ChatLogError;
use imlog_types::message::Message;
use imlog_types::storage::LogEntry;
use tracing::debug;

use crate::codec;
use crate::repository::chat_log::ChatLogStore;

/// Encodes messages on the way into the store and decodes them on the way out.
///
/// Generic over `ChatLogStore` so tests can run against a mock store while
/// production pins it to the SQLite implementation.
pub struct ChatLog<S: ChatLogStore> {
    store: S,
}

impl<S: ChatLogStore> ChatLog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Encode and append a message to its chat's log, scored by `send_time`.
    pub async fn append(&self, message: &Message) -> Result<(), ChatLogError> {
        let payload = codec::encode(message)?;
        self.store
            .append(
                &message.chat,
                LogEntry {
                    score: message.send_time,
                    payload,
                },
            )
            .await?;
        debug!(chat = %message.chat, send_time = message.send_time, "Message appended");
        Ok(())
    }

    /// Read up to `limit + 1` messages with `send_time >= cursor`, ascending,
    /// plus the total number of matching messages.
    ///
    /// Any undecodable entry fails the whole read.
    pub async fn range_from(
        &self,
        chat: &str,
        cursor: i64,
        limit: u32,
    ) -> Result<(Vec<Message>, u64), ChatLogError> {
        let slice = self.store.range_from(chat, cursor, limit).await?;
        let messages = slice
            .entries
            .iter()
            .map(|entry| codec::decode(&entry.payload))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((messages, slice.total_matching))
    }
}
