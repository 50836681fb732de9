//! HTTP error responses.
//!
//! | Error        | Status | Body                              |
//! |--------------|--------|-----------------------------------|
//! | `NotFound`   | 404    | `{"message": "Movie not Found"}`  |
//! | `Validation` | 400    | `{"error": [issues]}`             |

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use schema::ValidationError;

pub const NOT_FOUND_MESSAGE: &str = "Movie not Found";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Movie not Found")]
    NotFound,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// `{"message": ...}` body used for not-found and delete confirmations
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ValidationError,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(MessageBody {
                    message: NOT_FOUND_MESSAGE,
                }),
            )
                .into_response(),
            ApiError::Validation(error) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody { error })).into_response()
            }
        }
    }
}
