//! Request-level error handling.
//!
//! Handlers return `Result<_, AppError>`, so nothing of the success
//! response is committed once an error occurs — the dispatch layer sees
//! the `Err` before any bytes are written. The error converts into a
//! bare response carrying its messages as an extension; the error-page
//! layer in [`crate::web`] then swaps the body for the rendered shared
//! `400` template.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::render::RenderError;
use crate::store::StoreError;

/// Messages recorded on an error response, consumed by the error-page
/// layer.
#[derive(Debug, Clone)]
pub struct ErrorMessages(pub Vec<String>);

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn messages(&self) -> Vec<String> {
        match self {
            AppError::Validation(errors) => errors.clone(),
            other => vec![other.to_string()],
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "request failed");
        let mut response = self.status().into_response();
        response.extensions_mut().insert(ErrorMessages(self.messages()));
        response
    }
}
