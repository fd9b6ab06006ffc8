use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnhanceError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Missing file in request")]
    MissingFile,

    #[error("Unknown profile: {0}")]
    UnknownProfile(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Image too large: {size} bytes (max: {max} bytes)")]
    ImageTooLarge { size: usize, max: usize },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for EnhanceError {
    fn from(err: std::io::Error) -> Self {
        EnhanceError::Io(err.to_string())
    }
}

impl From<image::ImageError> for EnhanceError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => EnhanceError::Io(e.to_string()),
            other => EnhanceError::Decode(other.to_string()),
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for EnhanceError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            EnhanceError::Decode(_) => (StatusCode::UNPROCESSABLE_ENTITY, "DECODE_ERROR"),
            EnhanceError::MissingFile => (StatusCode::BAD_REQUEST, "MISSING_FILE"),
            EnhanceError::UnknownProfile(_) => (StatusCode::BAD_REQUEST, "UNKNOWN_PROFILE"),
            EnhanceError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            EnhanceError::ImageTooLarge { .. } => (StatusCode::PAYLOAD_TOO_LARGE, "IMAGE_TOO_LARGE"),
            EnhanceError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            EnhanceError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        });

        (status, body).into_response()
    }
}
