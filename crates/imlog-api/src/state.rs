//! Application state wiring the chat log service together.
//!
//! AppState holds the single `ImService` instance used by both CLI commands
//! and HTTP handlers. The service is generic over `ChatLogStore`; AppState
//! pins it to [`ChatLogBackend`], which is SQLite in normal operation and an
//! in-process store for `serve --in-memory` and tests.

use std::path::PathBuf;
use std::sync::Arc;

use imlog_core::repository::chat_log::ChatLogStore;
use imlog_core::service::im::ImService;
use imlog_infra::config::{load_server_config, resolve_data_dir};
use imlog_infra::in_memory::InMemoryChatLogStore;
use imlog_infra::sqlite::chat_log::SqliteChatLogStore;
use imlog_infra::sqlite::pool::{DatabasePool, database_url};
use imlog_types::config::ServerConfig;
use imlog_types::error::StoreError;
use imlog_types::storage::{LogEntry, RangeSlice};

/// The store implementations the binary can run on.
#[derive(Clone)]
pub enum ChatLogBackend {
    Sqlite(SqliteChatLogStore),
    InMemory(InMemoryChatLogStore),
}

impl ChatLogStore for ChatLogBackend {
    async fn append(&self, chat: &str, entry: LogEntry) -> Result<(), StoreError> {
        match self {
            ChatLogBackend::Sqlite(store) => store.append(chat, entry).await,
            ChatLogBackend::InMemory(store) => store.append(chat, entry).await,
        }
    }

    async fn range_from(
        &self,
        chat: &str,
        cursor: i64,
        limit: u32,
    ) -> Result<RangeSlice, StoreError> {
        match self {
            ChatLogBackend::Sqlite(store) => store.range_from(chat, cursor, limit).await,
            ChatLogBackend::InMemory(store) => store.range_from(chat, cursor, limit).await,
        }
    }
}

/// Concrete service type pinned to the binary's backend.
pub type ConcreteImService = ImService<ChatLogBackend>;

/// Shared application state.
///
/// Cloned into every request; the service (and with it the store's
/// connection pool) is shared behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ConcreteImService>,
    pub config: ServerConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Resolve the data directory and load `config.toml` from it.
    pub async fn load_config() -> (PathBuf, ServerConfig) {
        let data_dir = resolve_data_dir();
        let config = load_server_config(&data_dir).await;
        (data_dir, config)
    }

    /// Initialize the application state: connect to DB, wire the service.
    pub async fn init(data_dir: PathBuf, config: ServerConfig) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&data_dir).await?;

        let db_pool = DatabasePool::new(&database_url(&data_dir)).await?;
        tracing::debug!(data_dir = %data_dir.display(), "Database opened");

        let backend = ChatLogBackend::Sqlite(SqliteChatLogStore::new(db_pool));
        Ok(Self::with_backend(backend, config, data_dir))
    }

    /// State backed by a fresh in-process store. Nothing is persisted.
    pub fn in_memory(data_dir: PathBuf, config: ServerConfig) -> Self {
        Self::with_backend(
            ChatLogBackend::InMemory(InMemoryChatLogStore::new()),
            config,
            data_dir,
        )
    }

    pub fn with_backend(backend: ChatLogBackend, config: ServerConfig, data_dir: PathBuf) -> Self {
        let service = ImService::from_config(backend, &config);
        Self {
            service: Arc::new(service),
            config,
            data_dir,
        }
    }
}
