//! Send/Pull service facade.
//!
//! `ImService` owns the single shared store handle (injected at construction)
//! and exposes two API levels:
//!
//! - typed: [`ImService::send_message`] / [`ImService::pull_page`] return
//!   `Result<_, ChatLogError>` carrying the underlying cause;
//! - wire: [`ImService::send`] / [`ImService::pull`] translate outcomes into
//!   response codes. Store and codec causes are logged, and only reach the
//!   caller when `expose_error_details` is switched on.
//!
//! There are no retries: every failure surfaces on the call that hit it.

use imlog_types::config::ServerConfig;
use imlog_types::error::ChatLogError;
use imlog_types::message::Message;
use imlog_types::page::{Page, PullQuery};
use imlog_types::rpc::{
    CODE_INVALID_ARGUMENT, CODE_STORAGE_FAILURE, MSG_STORAGE_FAILURE, PullRequest, PullResponse,
    SendRequest, SendResponse,
};
use tracing::{error, info, warn};

use crate::chat::log::ChatLog;
use crate::chat::pagination::Paginator;
use crate::repository::chat_log::ChatLogStore;

/// Chat message service: ordered append and paginated reads.
///
/// Generic over `ChatLogStore` so the facade never depends on imlog-infra.
pub struct ImService<S: ChatLogStore> {
    log: ChatLog<S>,
    paginator: Paginator,
    expose_error_details: bool,
}

impl<S: ChatLogStore> ImService<S> {
    /// Create a service with default limits and masked error details.
    pub fn new(store: S) -> Self {
        Self {
            log: ChatLog::new(store),
            paginator: Paginator::default(),
            expose_error_details: false,
        }
    }

    /// Create a service using the limits and error policy from `config`.
    pub fn from_config(store: S, config: &ServerConfig) -> Self {
        Self::new(store)
            .with_max_pull_limit(config.max_pull_limit)
            .with_error_details(config.expose_error_details)
    }

    pub fn with_max_pull_limit(mut self, max_limit: u32) -> Self {
        self.paginator = Paginator::new(max_limit);
        self
    }

    /// Include underlying causes in failure responses.
    pub fn with_error_details(mut self, expose: bool) -> Self {
        self.expose_error_details = expose;
        self
    }

    /// Access the chat log.
    pub fn chat_log(&self) -> &ChatLog<S> {
        &self.log
    }

    // --- Typed API ---

    /// Append a message to its chat's log.
    pub async fn send_message(&self, message: &Message) -> Result<(), ChatLogError> {
        if message.chat.is_empty() {
            return Err(ChatLogError::InvalidArgument(
                "message.chat is required".to_string(),
            ));
        }
        self.log.append(message).await
    }

    /// Read one page of a chat's log.
    pub async fn pull_page(&self, query: &PullQuery) -> Result<Page, ChatLogError> {
        self.paginator.fetch(&self.log, query).await
    }

    // --- Wire API ---

    /// Send: `code = 0` on success, 400 on invalid input, 500 on store failure.
    pub async fn send(&self, request: SendRequest) -> SendResponse {
        match self.send_message(&request.message).await {
            Ok(()) => {
                info!(
                    chat = %request.message.chat,
                    sender = %request.message.sender,
                    send_time = request.message.send_time,
                    "Message stored"
                );
                SendResponse::success()
            }
            Err(err) => {
                let (code, msg) = self.failure("send", &err);
                SendResponse::failure(code, msg)
            }
        }
    }

    /// Pull: the page on success; on failure an empty response with the code.
    pub async fn pull(&self, request: PullRequest) -> PullResponse {
        let query = PullQuery::from(request);
        match self.pull_page(&query).await {
            Ok(page) => PullResponse::success(page),
            Err(err) => {
                let (code, msg) = self.failure("pull", &err);
                PullResponse::failure(code, msg)
            }
        }
    }

    fn failure(&self, operation: &'static str, err: &ChatLogError) -> (i32, String) {
        match err {
            ChatLogError::InvalidArgument(_) => {
                warn!(operation, error = %err, "Rejected request");
                (CODE_INVALID_ARGUMENT, err.to_string())
            }
            ChatLogError::StorageUnavailable(_) | ChatLogError::EncodingFailure(_) => {
                error!(operation, error = %err, "Chat log operation failed");
                let msg = if self.expose_error_details {
                    format!("{MSG_STORAGE_FAILURE}: {err}")
                } else {
                    MSG_STORAGE_FAILURE.to_string()
                };
                (CODE_STORAGE_FAILURE, msg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::MockStore;
    use imlog_types::rpc::{CODE_SUCCESS, MSG_SUCCESS};

    fn send_request(chat: &str, send_time: i64) -> SendRequest {
        SendRequest {
            message: Message::new(chat, "test2", "test_content", send_time),
        }
    }

    fn pull_request(chat: &str, cursor: i64, limit: i32, reverse: Option<bool>) -> PullRequest {
        PullRequest {
            chat: chat.to_string(),
            cursor,
            limit,
            reverse,
        }
    }

    #[tokio::test]
    async fn test_send_success() {
        let service = ImService::new(MockStore::new());
        let resp = service.send(send_request("test1:test2", 0)).await;

        assert_eq!(resp.code, CODE_SUCCESS);
        assert_eq!(resp.msg, MSG_SUCCESS);
        assert_eq!(service.chat_log().store().len("test1:test2"), 1);
    }

    #[tokio::test]
    async fn test_send_store_failure_masks_cause() {
        let service = ImService::new(MockStore::new());
        service.chat_log().store().set_failing(true);

        let resp = service.send(send_request("test1:test2", 0)).await;
        assert_eq!(resp.code, CODE_STORAGE_FAILURE);
        assert_eq!(resp.msg, MSG_STORAGE_FAILURE);
        assert!(!resp.msg.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_send_store_failure_exposed_when_enabled() {
        let service = ImService::new(MockStore::new()).with_error_details(true);
        service.chat_log().store().set_failing(true);

        let resp = service.send(send_request("test1:test2", 0)).await;
        assert_eq!(resp.code, CODE_STORAGE_FAILURE);
        assert!(resp.msg.starts_with(MSG_STORAGE_FAILURE));
        assert!(resp.msg.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_send_empty_chat_rejected() {
        let service = ImService::new(MockStore::new());
        let resp = service.send(send_request("", 0)).await;

        assert_eq!(resp.code, CODE_INVALID_ARGUMENT);
        assert!(resp.msg.contains("chat"));
    }

    #[tokio::test]
    async fn test_pull_returns_page() {
        let service = ImService::new(MockStore::new());
        for t in [1, 2, 4] {
            service.send(send_request("a:b", t)).await;
        }

        let resp = service.pull(pull_request("a:b", 0, 2, Some(true))).await;
        assert!(resp.is_success());
        let times: Vec<i64> = resp.messages.iter().map(|m| m.send_time).collect();
        assert_eq!(times, vec![2, 1]);
        assert!(resp.has_more);
        assert_eq!(resp.next_cursor, Some(4));
    }

    #[tokio::test]
    async fn test_pull_store_failure_has_no_partial_page() {
        let service = ImService::new(MockStore::new());
        service.send(send_request("a:b", 1)).await;
        service.chat_log().store().set_failing(true);

        let resp = service.pull(pull_request("a:b", 0, 10, None)).await;
        assert_eq!(resp.code, CODE_STORAGE_FAILURE);
        assert!(resp.messages.is_empty());
        assert!(!resp.has_more);
        assert_eq!(resp.next_cursor, None);
    }

    #[tokio::test]
    async fn test_pull_typed_error_carries_cause() {
        let service = ImService::new(MockStore::new());
        service.chat_log().store().set_failing(true);

        let err = service
            .pull_page(&PullQuery::new("a:b", 0, 10))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_pull_corrupt_entry_is_storage_failure_code() {
        let service = ImService::new(MockStore::new());
        service.chat_log().store().insert_raw("a:b", 1, b"not json");

        let resp = service.pull(pull_request("a:b", 0, 10, None)).await;
        assert_eq!(resp.code, CODE_STORAGE_FAILURE);
        assert_eq!(resp.msg, MSG_STORAGE_FAILURE);
    }

    #[tokio::test]
    async fn test_pull_negative_limit_rejected() {
        let service = ImService::new(MockStore::new());
        let resp = service.pull(pull_request("a:b", 0, -5, None)).await;
        assert_eq!(resp.code, CODE_INVALID_ARGUMENT);
    }

    #[tokio::test]
    async fn test_from_config_applies_max_limit() {
        let config = ServerConfig {
            max_pull_limit: 2,
            ..ServerConfig::default()
        };
        let service = ImService::from_config(MockStore::new(), &config);
        for t in 1..=5 {
            service.send(send_request("a:b", t)).await;
        }

        let resp = service.pull(pull_request("a:b", 0, 100, None)).await;
        assert_eq!(resp.messages.len(), 2);
        assert!(resp.has_more);
        assert_eq!(resp.next_cursor, Some(3));
    }
}
