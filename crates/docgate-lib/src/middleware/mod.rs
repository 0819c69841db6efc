// ============================
// docgate-lib/src/middleware/mod.rs
// ============================
//! Middleware applying the access gate to content routes.
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use metrics::counter;
use tracing::debug;

use crate::auth::{Decision, SessionEvidence};
use crate::metrics::{GATE_ALLOWED, GATE_CHALLENGED};
use crate::AppState;

/// Gate middleware for content routes.
///
/// The login routes are never wrapped by this, so they stay reachable
/// without a session by construction.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let evidence = SessionEvidence::from_headers(request.headers());

    match state.gate.decide(evidence.as_ref()) {
        Decision::Allow => {
            counter!(GATE_ALLOWED).increment(1);
            next.run(request).await
        }
        Decision::Challenge => {
            counter!(GATE_CHALLENGED).increment(1);
            debug!(path = %request.uri().path(), "challenging unauthenticated request");
            Redirect::to("/login").into_response()
        }
    }
}
