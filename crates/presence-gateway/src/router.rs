//! Axum router wiring.
//!
//! Presence operations under `/v1/presence/*`, operational endpoints at the
//! root.

use axum::{
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, ops, transport::http};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/presence/connect", post(http::user_connected))
        .route("/v1/presence/disconnect", post(http::user_disconnected))
        .route("/v1/presence/typing", post(http::set_typing).get(http::typing_users))
        .route("/v1/presence/online", get(http::online_users))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
