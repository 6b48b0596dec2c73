//! Call lookup handler

use crate::error::MockResult;
use crate::state::AppState;
use axum::extract::State;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;

/// Fixture served by the call lookup endpoint
pub const CALL_FIXTURE: &str = "chargify_v2_subscription_call_response.json";

/// Call lookup endpoint
///
/// Returns the canned `GET /calls/{id}` document verbatim, whatever the
/// method, path suffix or body.
///
/// ## Response
///
/// `200 OK`, `Content-Type: application/json`, fixture bytes. A missing
/// fixture is a 500.
pub async fn handle_call_lookup(
    State(state): State<AppState>,
) -> MockResult<(StatusCode, [(HeaderName, &'static str); 1], Vec<u8>)> {
    let body = state.fixtures().load(CALL_FIXTURE).await?;
    tracing::debug!(bytes = body.len(), "Serving call fixture");

    Ok((StatusCode::OK, [(CONTENT_TYPE, "application/json")], body))
}
