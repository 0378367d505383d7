//! Send/Pull wire types.
//!
//! These are the request and response bodies exchanged over the service
//! boundary. Every response carries a numeric `code` and a `msg`; `code = 0`
//! is success.

use serde::{Deserialize, Serialize};

use crate::message::Message;
use crate::page::{Page, PullQuery};

/// Response code for a successful call.
pub const CODE_SUCCESS: i32 = 0;
/// Response code for a rejected request (bad caller input).
pub const CODE_INVALID_ARGUMENT: i32 = 400;
/// Response code for a store or codec failure.
pub const CODE_STORAGE_FAILURE: i32 = 500;

pub const MSG_SUCCESS: &str = "success";
pub const MSG_STORAGE_FAILURE: &str = "storage failure";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendRequest {
    pub message: Message,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendResponse {
    pub code: i32,
    pub msg: String,
}

impl SendResponse {
    pub fn success() -> Self {
        Self {
            code: CODE_SUCCESS,
            msg: MSG_SUCCESS.to_string(),
        }
    }

    pub fn failure(code: i32, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub chat: String,
    #[serde(default)]
    pub cursor: i64,
    pub limit: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse: Option<bool>,
}

impl From<PullRequest> for PullQuery {
    fn from(req: PullRequest) -> Self {
        PullQuery {
            chat: req.chat,
            cursor: req.cursor,
            limit: req.limit,
            reverse: req.reverse.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullResponse {
    pub code: i32,
    pub msg: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<i64>,
}

impl PullResponse {
    pub fn success(page: Page) -> Self {
        Self {
            code: CODE_SUCCESS,
            msg: MSG_SUCCESS.to_string(),
            messages: page.messages,
            has_more: page.has_more,
            next_cursor: page.next_cursor,
        }
    }

    /// A failure carries no partial page.
    pub fn failure(code: i32, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            messages: Vec::new(),
            has_more: false,
            next_cursor: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == CODE_SUCCESS
    }
}
