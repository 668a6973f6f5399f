use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// JSON envelope shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ApiBody<T: Serialize> {
    pub code: u16,
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn reason(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or("Unknown").to_string()
}

#[derive(Debug)]
pub struct ApiSuccess<T: Serialize> {
    status: StatusCode,
    message: String,
    data: T,
}

impl<T: Serialize> ApiSuccess<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status: StatusCode::OK,
            message: message.into(),
            data,
        }
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            message: message.into(),
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        let body = ApiBody {
            code: self.status.as_u16(),
            status: reason(self.status),
            message: self.message,
            data: Some(self.data),
            error: None,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Error response: a short summary for humans plus the raw cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, detail: impl ToString) -> Self {
        Self {
            status,
            message: message.into(),
            detail: detail.to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>, detail: impl ToString) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, detail)
    }

    pub fn unauthorized(message: impl Into<String>, detail: impl ToString) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message, detail)
    }

    pub fn forbidden(message: impl Into<String>, detail: impl ToString) -> Self {
        Self::new(StatusCode::FORBIDDEN, message, detail)
    }

    pub fn internal(message: impl Into<String>, detail: impl ToString) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, detail)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body: ApiBody<()> = ApiBody {
            code: self.status.as_u16(),
            status: reason(self.status),
            message: self.message,
            data: None,
            error: Some(self.detail),
        };
        (self.status, Json(body)).into_response()
    }
}
