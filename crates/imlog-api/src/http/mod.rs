//! HTTP layer for imlog.
//!
//! Axum-based API at `/api/v1/` exposing the Send and Pull operations.
//! Every response body is the operation's response struct (`code`, `msg`, ...);
//! the HTTP status mirrors `code`.

pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
