use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// JSON body shared by every non-success response.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

pub fn message_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(MessageBody {
            message: message.into(),
        }),
    )
        .into_response()
}

/// Text sent to clients for any 5xx; details stay in the server log.
pub const SERVER_ERROR: &str = "Server error";
