use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::error::{message_response, SERVER_ERROR};

pub const MISSING_FIELDS: &str = "All fields are required";

/// Failures of the signup, login and token-check paths.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("User already exists")]
    Conflict,

    // Reveals that the email is unregistered, unlike InvalidCredentials.
    #[error("User not found")]
    NotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Unauthorized(String),

    #[error("internal error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    pub fn missing_fields() -> Self {
        AuthError::Validation(MISSING_FIELDS.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Validation(_)
            | AuthError::Conflict
            | AuthError::NotFound
            | AuthError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AuthError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AuthError::Internal(e) => {
                error!(error = ?e, "auth request failed");
                message_response(status, SERVER_ERROR)
            }
            other => message_response(status, other.to_string()),
        }
    }
}
