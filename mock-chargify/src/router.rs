//! Router configuration for the mock Chargify server

use crate::handlers::calls::handle_call_lookup;
use crate::handlers::signup::handle_signup;
use crate::state::AppState;
use axum::Router;
use axum::routing::MethodRouter;
use axum::routing::any;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Mount point of the signup redirect
pub const SIGNUPS_PREFIX: &str = "/signups";
/// Mount point of the call lookup
pub const CALLS_PREFIX: &str = "/calls";

/// Create the application router
///
/// Each handler answers every method on its prefix and anything below it.
/// Unmatched paths get axum's default 404.
pub fn create_router(state: AppState) -> Router {
    info!(
        "Mounting {SIGNUPS_PREFIX} and {CALLS_PREFIX}, redirecting signups to {}",
        state.config().redirect_base()
    );

    let app = Router::new();
    let app = mount(app, SIGNUPS_PREFIX, any(handle_signup));
    let app = mount(app, CALLS_PREFIX, any(handle_call_lookup));

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Route `prefix`, `prefix/` and everything under `prefix/` to `handler`
fn mount(
    router: Router<AppState>,
    prefix: &str,
    handler: MethodRouter<AppState>,
) -> Router<AppState> {
    router
        .route(prefix, handler.clone())
        .route(&format!("{prefix}/"), handler.clone())
        .route(&format!("{prefix}/{{*rest}}"), handler)
}
