//! Chat message domain type.
//!
//! A `Message` is an immutable value appended to a chat log. Its `send_time`
//! doubles as the ordering score inside the log and as the pagination cursor.

use serde::{Deserialize, Serialize};

/// Separator between participant ids in a canonical chat id.
pub const CHAT_ID_SEPARATOR: char = ':';

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Logical chat identifier (usually built with [`chat_id`]).
    pub chat: String,
    /// Who sent the message.
    pub sender: String,
    /// Message body.
    pub text: String,
    /// Send timestamp. Sort key within the chat log; not guaranteed unique.
    pub send_time: i64,
}

impl Message {
    pub fn new(
        chat: impl Into<String>,
        sender: impl Into<String>,
        text: impl Into<String>,
        send_time: i64,
    ) -> Self {
        Self {
            chat: chat.into(),
            sender: sender.into(),
            text: text.into(),
            send_time,
        }
    }
}

/// Build the canonical chat id for a pair of participants.
///
/// Participants are sorted so both sides of a conversation resolve to the
/// same log: `chat_id("b", "a") == chat_id("a", "b") == "a:b"`.
pub fn chat_id(participant_a: &str, participant_b: &str) -> String {
    let (first, second) = if participant_a <= participant_b {
        (participant_a, participant_b)
    } else {
        (participant_b, participant_a)
    };
    format!("{first}{CHAT_ID_SEPARATOR}{second}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
