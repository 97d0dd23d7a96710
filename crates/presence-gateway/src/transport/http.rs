//! Presence request façade (JSON over HTTP).
//!
//! One handler per store operation:
//! - `POST /v1/presence/connect`    `{username}`            -> `{usernames}`
//! - `POST /v1/presence/disconnect` `{username}`            -> `{}`
//! - `POST /v1/presence/typing`     `{username, is_typing}` -> `{}`
//! - `GET  /v1/presence/online`                             -> `{usernames}`
//! - `GET  /v1/presence/typing`                             -> `{usernames}`
//!
//! Usernames are opaque keys; the only validation is non-emptiness.

use std::time::Instant;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use presence_core::error::{PresenceError, Result};

use crate::app_state::AppState;
use crate::transport::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct UserRequest {
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct SetTypingRequest {
    pub username: String,
    #[serde(default)]
    pub is_typing: bool,
}

#[derive(Debug, Serialize)]
pub struct UsernamesResponse {
    pub usernames: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct Empty {}

fn require_username<'a>(state: &AppState, op: &'static str, username: &'a str) -> Result<&'a str> {
    if username.is_empty() {
        state.metrics().bad_requests.inc(&[("op", op)]);
        return Err(PresenceError::BadRequest("username must not be empty".into()));
    }
    Ok(username)
}

fn observe(state: &AppState, op: &'static str, started: Instant) {
    let m = state.metrics();
    m.requests.inc(&[("op", op)]);
    m.request_duration.observe(&[("op", op)], started.elapsed());
}

pub async fn user_connected(
    State(state): State<AppState>,
    Json(req): Json<UserRequest>,
) -> std::result::Result<Json<UsernamesResponse>, ApiError> {
    let started = Instant::now();
    let username = require_username(&state, "connect", &req.username)?;

    let usernames = state.store().connect(username);
    tracing::info!(username, online_count = usernames.len(), "user connected");

    observe(&state, "connect", started);
    Ok(Json(UsernamesResponse { usernames }))
}

pub async fn user_disconnected(
    State(state): State<AppState>,
    Json(req): Json<UserRequest>,
) -> std::result::Result<Json<Empty>, ApiError> {
    let started = Instant::now();
    let username = require_username(&state, "disconnect", &req.username)?;

    state.store().disconnect(username);
    tracing::info!(username, "user disconnected");

    observe(&state, "disconnect", started);
    Ok(Json(Empty {}))
}

pub async fn set_typing(
    State(state): State<AppState>,
    Json(req): Json<SetTypingRequest>,
) -> std::result::Result<Json<Empty>, ApiError> {
    let started = Instant::now();
    let username = require_username(&state, "set_typing", &req.username)?;

    state.store().set_typing(username, req.is_typing);
    let action = if req.is_typing { "started" } else { "stopped" };
    tracing::info!(username, action, "user typing");

    observe(&state, "set_typing", started);
    Ok(Json(Empty {}))
}

pub async fn online_users(State(state): State<AppState>) -> Json<UsernamesResponse> {
    let started = Instant::now();
    let usernames = state.store().online_users();
    tracing::debug!(count = usernames.len(), "get online users");

    observe(&state, "online", started);
    Json(UsernamesResponse { usernames })
}

pub async fn typing_users(State(state): State<AppState>) -> Json<UsernamesResponse> {
    let started = Instant::now();
    let usernames = state.store().typing_users();
    tracing::debug!(count = usernames.len(), "get typing users");

    observe(&state, "typing", started);
    Json(UsernamesResponse { usernames })
}
