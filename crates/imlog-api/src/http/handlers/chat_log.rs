//! Send/Pull handlers.

use axum::extract::{Path, Query, State};
use tracing::info_span;
use tracing::Instrument;
use uuid::Uuid;

use imlog_types::rpc::{PullRequest, PullResponse, SendRequest, SendResponse};

use crate::http::extractors::query::PullParams;
use crate::http::extractors::rpc_json::RpcJson;
use crate::http::response::RpcReply;
use crate::state::AppState;

/// POST /api/v1/send - Append a message to its chat's log.
pub async fn send(
    State(state): State<AppState>,
    RpcJson(body): RpcJson<SendRequest>,
) -> RpcReply<SendResponse> {
    let request_id = Uuid::now_v7().to_string();
    let span = info_span!("send", request_id = %request_id, chat = %body.message.chat);

    let resp = state.service.send(body).instrument(span).await;
    RpcReply::new(resp.code, request_id, resp)
}

/// POST /api/v1/pull - Read one page of a chat's log.
pub async fn pull(
    State(state): State<AppState>,
    RpcJson(body): RpcJson<PullRequest>,
) -> RpcReply<PullResponse> {
    run_pull(&state, body).await
}

/// GET /api/v1/chats/{chat}/messages - Query-string form of pull.
pub async fn list_messages(
    State(state): State<AppState>,
    Path(chat): Path<String>,
    Query(params): Query<PullParams>,
) -> RpcReply<PullResponse> {
    run_pull(&state, params.into_request(chat)).await
}

async fn run_pull(state: &AppState, request: PullRequest) -> RpcReply<PullResponse> {
    let request_id = Uuid::now_v7().to_string();
    let span = info_span!(
        "pull",
        request_id = %request_id,
        chat = %request.chat,
        cursor = request.cursor,
        limit = request.limit
    );

    let resp = state.service.pull(request).instrument(span).await;
    RpcReply::new(resp.code, request_id, resp)
}
