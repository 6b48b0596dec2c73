//! Signup redirect handler

use crate::error::MockResult;
use crate::signing::SignedParameterSet;
use crate::state::AppState;
use axum::extract::State;
use axum::http::HeaderName;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::http::header::LOCATION;

/// Path on the application under test that receives the signup callback
pub const VERIFY_PATH: &str = "/subscription/verify";

/// Signup endpoint
///
/// Plays the part of a successful Chargify Direct signup: the browser is
/// sent back to the application under test with a freshly signed callback.
/// Method, query and body of the incoming request are ignored.
///
/// ## Response
///
/// `302 Found` with
/// `Location: http://{redirect_host}:{redirect_port}/subscription/verify?{signed query}`
pub async fn handle_signup(
    State(state): State<AppState>,
) -> MockResult<(StatusCode, [(HeaderName, HeaderValue); 1])> {
    let config = state.config();
    let parameters = SignedParameterSet::generate(
        &config.api_secret,
        &config.api_id,
        state.clock(),
        state.time_zone(),
    )?;

    let location = format!(
        "{}{VERIFY_PATH}?{}",
        config.redirect_base(),
        parameters.to_query_string()
    );
    tracing::debug!(
        nonce = parameters.get("nonce").unwrap_or_default(),
        "Redirecting signup to {}",
        config.redirect_base()
    );

    Ok((StatusCode::FOUND, [(LOCATION, HeaderValue::from_str(&location)?)]))
}
