//! HTTP server over wrapped environment variables.
//!
//! State is built once at startup and shared read-only across requests:
//! the signing key is loaded once per server lifetime and never mutated.
//! Rotating the key while an instance is serving makes in-flight unwraps of
//! old tokens fail immediately; that is expected behavior, not a bug.
//!
//! The endpoints carry no authentication. Binding to localhost only is the
//! operational assumption.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::core::envfile::EnvMap;
use crate::core::keystore::SigningKey;
use crate::core::token;

/// Read-only per-server state, injected into every handler.
pub struct AppState {
    /// Wrapped variables served at `/env.json`.
    pub vars: EnvMap,
    /// Key used to redeem tokens posted to `/unwrap`.
    pub key: SigningKey,
}

/// Build the router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/env.json", get(env_json))
        // Kept as an alias for existing consumers.
        .route("/env", get(env_json))
        .route("/unwrap", post(unwrap_token))
        .route("/health", get(health))
        .with_state(state)
}

/// `GET /env.json` — JSON object of all wrapped variables.
pub async fn env_json(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(state.vars.clone()),
    )
}

#[derive(Deserialize)]
pub struct UnwrapRequest {
    #[serde(default)]
    pub token: String,
}

/// `POST /unwrap` — redeem a token for its plaintext value.
///
/// The body is parsed by hand so malformed JSON also produces a JSON error
/// body rather than a plain-text rejection. Every failure is a 400 with
/// `{"error": ...}`; the cause is not distinguished.
pub async fn unwrap_token(State(state): State<Arc<AppState>>, body: String) -> Response {
    let request: UnwrapRequest = match serde_json::from_str(&body) {
        Ok(r) => r,
        Err(e) => {
            debug!(error = %e, "rejected malformed unwrap request body");
            return error_response(format!("invalid request body: {}", e));
        }
    };

    if !token::is_wrapped(&request.token) {
        return error_response("not a wrapped token".to_string());
    }

    match token::unwrap(&request.token, &state.key) {
        Some(value) => Json(json!({ "value": value })).into_response(),
        None => {
            debug!("unwrap failed for posted token");
            error_response("invalid or expired token".to_string())
        }
    }
}

/// `GET /health` — plain `OK`.
pub async fn health() -> &'static str {
    "OK"
}

fn error_response(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}
