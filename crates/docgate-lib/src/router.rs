// ============================
// docgate-lib/src/router.rs
// ============================
//! Router wiring the gate, the login flow, and document serving.
use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::handlers::{login_bad_method, login_form, login_submit};
use crate::middleware::require_session;
use crate::AppState;

/// Create the application router.
///
/// Content is served through the gate middleware; the login routes are
/// mounted outside it (and only on protected servers), so the login flow is
/// exempt by construction rather than by a path list.
pub fn create_router(state: Arc<AppState>) -> Router {
    let content = Router::new()
        .fallback_service(ServeDir::new(&state.settings.document_dir))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    let mut app = Router::new();
    if state.gate.is_protected() {
        app = app.route(
            "/login",
            get(login_form).post(login_submit).fallback(login_bad_method),
        );
    }

    app.merge(content)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
