//! SQLite storage layer.
//!
//! Chat log store backed by SQLite with WAL mode and split read/write
//! connection pools.

pub mod chat_log;
pub mod pool;
