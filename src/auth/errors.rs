use axum::http::StatusCode;
use thiserror::Error;

use super::{jwt::TokenError, password::PasswordError};
use crate::{db::RepoError, images::UploadError, response::ApiError};

/// Everything the account workflows can fail with.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("authentication required")]
    Unauthenticated,
    #[error("wrong password")]
    InvalidCredentials,
    #[error("user not found")]
    NotFound,
    #[error("already exists: {0}")]
    Conflict(String),
    #[error(transparent)]
    Password(PasswordError),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error("persistence failed: {0}")]
    Persistence(String),
}

impl From<PasswordError> for AuthError {
    fn from(e: PasswordError) -> Self {
        match e {
            PasswordError::Mismatch => AuthError::InvalidCredentials,
            other => AuthError::Password(other),
        }
    }
}

impl From<RepoError> for AuthError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Conflict(msg) => AuthError::Conflict(msg),
            RepoError::Database(msg) => AuthError::Persistence(msg),
        }
    }
}

impl From<validator::ValidationErrors> for AuthError {
    fn from(e: validator::ValidationErrors) -> Self {
        AuthError::Validation(e.to_string())
    }
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::Upload(UploadError::Hosting(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::Upload(_) => StatusCode::BAD_REQUEST,
            AuthError::Token(TokenError::Signing(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::Unauthenticated | AuthError::InvalidCredentials | AuthError::Token(_) => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::NotFound => StatusCode::NOT_FOUND,
            AuthError::Conflict(_) => StatusCode::CONFLICT,
            AuthError::Password(_) | AuthError::Persistence(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn is_server_fault(&self) -> bool {
        self.status().is_server_error()
    }

    /// Converts into an HTTP error with `context` as the summary message.
    pub fn into_api(self, context: &str) -> ApiError {
        ApiError::new(self.status(), context, self)
    }
}
