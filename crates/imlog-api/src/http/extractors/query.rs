//! Query parameters for the query-string form of Pull.

use serde::Deserialize;

use imlog_types::rpc::PullRequest;

/// Query parameters for `GET /api/v1/chats/{chat}/messages`.
#[derive(Debug, Deserialize, Default)]
pub struct PullParams {
    /// Inclusive lower bound on send time (default 0).
    #[serde(default)]
    pub cursor: i64,
    /// Maximum messages to return (default 20).
    #[serde(default = "default_limit")]
    pub limit: i32,
    /// Return newest-first.
    pub reverse: Option<bool>,
}

fn default_limit() -> i32 {
    20
}

impl PullParams {
    pub fn into_request(self, chat: String) -> PullRequest {
        PullRequest {
            chat,
            cursor: self.cursor,
            limit: self.limit,
            reverse: self.reverse,
        }
    }
}
