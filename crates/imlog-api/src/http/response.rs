//! Response wrapper mapping service response codes to HTTP statuses.
//!
//! The body is always the service response struct serialized as JSON:
//! ```json
//! { "code": 0, "msg": "success", "messages": [...], "has_more": true, "next_cursor": 4 }
//! ```

use axum::Json;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use imlog_types::rpc::{CODE_INVALID_ARGUMENT, CODE_SUCCESS};

/// Header carrying the per-request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// A service response plus the request id it was produced for.
#[derive(Debug)]
pub struct RpcReply<T: Serialize> {
    pub code: i32,
    pub request_id: String,
    pub body: T,
}

impl<T: Serialize> RpcReply<T> {
    pub fn new(code: i32, request_id: String, body: T) -> Self {
        Self {
            code,
            request_id,
            body,
        }
    }
}

/// HTTP status for a service response code.
pub fn status_for_code(code: i32) -> StatusCode {
    match code {
        CODE_SUCCESS => StatusCode::OK,
        CODE_INVALID_ARGUMENT => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl<T: Serialize> IntoResponse for RpcReply<T> {
    fn into_response(self) -> Response {
        let mut response = (status_for_code(self.code), Json(self.body)).into_response();
        if let Ok(value) = HeaderValue::from_str(&self.request_id) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        response
    }
}
