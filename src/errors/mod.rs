use std::io;
use axum::{http::StatusCode, response::{IntoResponse, Response}};
use thiserror::Error;

/// Custom error types for the wiki application
#[derive(Debug, Error)]
pub enum WikiError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid path: {0}")]
    InvalidPath(String),
    #[error("invalid page title: {0:?}")]
    InvalidTitle(String),
    #[error("page not found: {0}")]
    PageNotFound(String),
    #[error("{0}")]
    RenderError(String),
    #[error("configuration error: {0}")]
    Config(String),
}

impl WikiError {
    /// True when the error means the store has no entry, as opposed to a failing medium
    pub fn is_missing_page(&self) -> bool {
        matches!(self, WikiError::PageNotFound(_))
    }
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        match self {
            WikiError::InvalidPath(_) | WikiError::InvalidTitle(_) | WikiError::PageNotFound(_) => {
                (StatusCode::NOT_FOUND, "404 page not found").into_response()
            }
            WikiError::Io(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("I/O error: {}", e),
            )
                .into_response(),
            WikiError::RenderError(e) => (StatusCode::INTERNAL_SERVER_ERROR, e).into_response(),
            WikiError::Config(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Configuration error: {}", e),
            )
                .into_response(),
        }
    }
}
