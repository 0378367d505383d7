//! Route handlers.

pub mod chat_log;
