//! Error types for the mock Chargify server

use thiserror::Error;

/// Errors that can occur while configuring or serving the mock
#[derive(Error, Debug)]
pub enum MockError {
    /// Missing or invalid configuration (secret, API id, ports, time zone)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The canned JSON document for `/calls` could not be loaded
    #[error("Fixture '{name}' not found: {reason}")]
    FixtureNotFound {
        /// Fixture name that was requested
        name: String,
        /// Underlying cause reported by the fixture store
        reason: String,
    },

    /// The redirect target could not be turned into a header value
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] axum::http::header::InvalidHeaderValue),

    /// Server start errors
    #[error("Server start error: {0}")]
    ServerStart(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Result type alias for mock server operations
pub type MockResult<T> = Result<T, MockError>;

impl MockError {
    /// Build a [`MockError::FixtureNotFound`] for `name`
    pub fn fixture_not_found(name: impl Into<String>, reason: impl ToString) -> Self {
        MockError::FixtureNotFound {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}

impl axum::response::IntoResponse for MockError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status = match self {
            MockError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            MockError::FixtureNotFound { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            MockError::InvalidHeader(_) => StatusCode::INTERNAL_SERVER_ERROR,
            MockError::ServerStart(_) => StatusCode::INTERNAL_SERVER_ERROR,
            MockError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        tracing::error!(status = status.as_u16(), "{self}");

        let body = Json(serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}
