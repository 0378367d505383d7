//! Chat log business logic for imlog.
//!
//! This crate defines the `ChatLogStore` port that the infrastructure layer
//! implements, the message codec, the pagination engine and the Send/Pull
//! service facade. It depends only on `imlog-types` -- never on
//! `imlog-infra` or any database/IO crate.

pub mod chat;
pub mod codec;
pub mod repository;
pub mod service;

#[cfg(test)]
mod test_util;
