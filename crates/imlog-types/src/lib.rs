//! Shared domain types for imlog.
//!
//! This crate contains the types used across the imlog workspace: the chat
//! `Message`, the stored log entry shapes, the Send/Pull wire types, server
//! configuration, and the error enums.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod config;
pub mod error;
pub mod message;
pub mod page;
pub mod rpc;
pub mod storage;
