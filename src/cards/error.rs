use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::error::message_response;

#[derive(Error, Debug, PartialEq)]
pub enum CardError {
    #[error("{0}")]
    Validation(String),

    #[error("Card not found")]
    NotFound,
}

impl IntoResponse for CardError {
    fn into_response(self) -> Response {
        let status = match self {
            CardError::Validation(_) => StatusCode::BAD_REQUEST,
            CardError::NotFound => StatusCode::NOT_FOUND,
        };
        message_response(status, self.to_string())
    }
}
