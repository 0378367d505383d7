//! Message codec for stored chat log entries.
//!
//! Messages are stored as JSON objects carrying a format version `v`
//! alongside the message fields. Entries written without `v` (plain message
//! JSON) decode as version 1.

use imlog_types::error::CodecError;
use imlog_types::message::Message;
use serde::{Deserialize, Serialize};

/// Format version written by [`encode`].
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    v: u32,
    #[serde(flatten)]
    message: &'a Message,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default = "legacy_version")]
    v: u32,
    #[serde(flatten)]
    message: Message,
}

fn legacy_version() -> u32 {
    1
}

/// Encode a message into its stored byte form.
pub fn encode(message: &Message) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(&EnvelopeRef {
        v: FORMAT_VERSION,
        message,
    })
    .map_err(|e| CodecError::Serialize(e.to_string()))
}

/// Decode a stored entry back into a message.
pub fn decode(bytes: &[u8]) -> Result<Message, CodecError> {
    let envelope: Envelope =
        serde_json::from_slice(bytes).map_err(|e| CodecError::Deserialize(e.to_string()))?;
    if envelope.v != FORMAT_VERSION {
        return Err(CodecError::UnsupportedVersion(envelope.v));
    }
    Ok(envelope.message)
}
