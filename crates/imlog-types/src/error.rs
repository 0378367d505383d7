use thiserror::Error;

/// Errors from chat log store operations (used by the store trait in imlog-core).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached or a transaction failed.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A statement ran but its result could not be used.
    #[error("query error: {0}")]
    Query(String),
}

/// Errors from encoding or decoding a stored message.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to encode message: {0}")]
    Serialize(String),

    #[error("failed to decode message: {0}")]
    Deserialize(String),

    #[error("unsupported message format version {0}")]
    UnsupportedVersion(u32),
}

/// Errors surfaced by the chat log service.
#[derive(Debug, Error)]
pub enum ChatLogError {
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("encoding failure: {0}")]
    EncodingFailure(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<StoreError> for ChatLogError {
    fn from(e: StoreError) -> Self {
        ChatLogError::StorageUnavailable(e.to_string())
    }
}

impl From<CodecError> for ChatLogError {
    fn from(e: CodecError) -> Self {
        ChatLogError::EncodingFailure(e.to_string())
    }
}
