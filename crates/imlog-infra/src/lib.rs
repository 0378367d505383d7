//! Infrastructure layer for imlog.
//!
//! Contains implementations of the `ChatLogStore` port defined in
//! `imlog-core` (SQLite and in-memory) and the configuration loader.

pub mod config;
pub mod in_memory;
pub mod sqlite;
