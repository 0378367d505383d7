//! Chat log access and pagination.
//!
//! `ChatLog` turns the byte-level `ChatLogStore` into a typed message log;
//! `Paginator` computes pages over it.

pub mod log;
pub mod pagination;
