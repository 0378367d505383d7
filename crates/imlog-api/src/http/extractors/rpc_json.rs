//! JSON body extractor that rejects in the service's response shape.
//!
//! A body that fails to parse is an invalid argument: the client gets
//! HTTP 400 with `{ "code": 400, "msg": ... }` instead of axum's plain-text
//! rejection.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use imlog_types::rpc::{
    CODE_INVALID_ARGUMENT, PullRequest, PullResponse, SendRequest, SendResponse,
};

use crate::http::response::RpcReply;

/// A request body paired with the response type it is answered with.
pub trait RpcRequest: DeserializeOwned + Send {
    type Response: Serialize + Send;

    /// Failure response for a body that could not be parsed.
    fn rejected(msg: String) -> Self::Response;
}

impl RpcRequest for SendRequest {
    type Response = SendResponse;

    fn rejected(msg: String) -> SendResponse {
        SendResponse::failure(CODE_INVALID_ARGUMENT, msg)
    }
}

impl RpcRequest for PullRequest {
    type Response = PullResponse;

    fn rejected(msg: String) -> PullResponse {
        PullResponse::failure(CODE_INVALID_ARGUMENT, msg)
    }
}

/// `Json<T>` whose rejection is an `RpcReply` with code 400.
pub struct RpcJson<T>(pub T);

impl<S, T> FromRequest<S> for RpcJson<T>
where
    S: Send + Sync,
    T: RpcRequest,
{
    type Rejection = RpcReply<T::Response>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(body)) => Ok(Self(body)),
            Err(rejection) => {
                let msg = rejection.body_text();
                let request_id = Uuid::now_v7().to_string();
                tracing::warn!(request_id = %request_id, error = %msg, "Rejected request body");
                Err(RpcReply::new(
                    CODE_INVALID_ARGUMENT,
                    request_id,
                    T::rejected(msg),
                ))
            }
        }
    }
}
