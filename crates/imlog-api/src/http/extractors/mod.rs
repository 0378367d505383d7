//! Request extractors and query parameter types.

pub mod query;
pub mod rpc_json;
