//! The error boundary for every route.
//!
//! Handlers return `Result<_, ApiError>`; any `anyhow::Error` raised by the
//! store converts into `ApiError::Unexpected` through `?` and is answered as
//! a 500 with the error's message.

use rocket::{
    Request,
    http::Status,
    response::{self, Responder},
    serde::json::Json,
};
use serde::Serialize;
use thiserror::Error;

pub const RESOURCE_NOT_FOUND: &str = "Resource not found";
pub const RESOURCE_NAME_REQUIRED: &str = "Resource name is required";
pub const INVALID_RESOURCE_ID: &str = "Resource id must be a positive integer";
pub const NO_VALID_FIELDS: &str = "No valid fields provided";
pub const UNEXPECTED_ERROR: &str = "Unexpected error";

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(&'static str),

    #[error("{}", RESOURCE_NOT_FOUND)]
    NotFound,

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::BadRequest(_) => Status::BadRequest,
            ApiError::NotFound => Status::NotFound,
            ApiError::Unexpected(_) => Status::InternalServerError,
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        let message = match &self {
            ApiError::Unexpected(error) => {
                log::error!("[{} {}] Unexpected error: {:?}", request.method(), request.uri(), error);
                let message = error.to_string();
                if message.is_empty() {
                    UNEXPECTED_ERROR.to_string()
                } else {
                    message
                }
            }
            other => other.to_string(),
        };
        (status, ErrorBody::new(message)).respond_to(request)
    }
}
