//! API response types.

use axum::{
    Json,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use mypoll_common::AppError;
use serde::Serialize;

use crate::pages;

/// Standard API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a success response.
    pub const fn ok(data: T) -> Self {
        Self {
            data,
            status: StatusCode::OK,
        }
    }

    /// Create a response for a newly created resource.
    pub const fn created(data: T) -> Self {
        Self {
            data,
            status: StatusCode::CREATED,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// An [`AppError`] rendered as an HTML page instead of JSON.
#[derive(Debug)]
pub struct HtmlError(pub AppError);

impl From<AppError> for HtmlError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for HtmlError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        if self.0.is_server_error() {
            tracing::error!(error = %self.0, "Server error occurred");
        } else {
            tracing::debug!(error = %self.0, "Client error occurred");
        }

        // Server error details stay in the log.
        let message = if self.0.is_server_error() {
            "Something went wrong.".to_string()
        } else {
            self.0.to_string()
        };

        (status, Html(pages::error(status, &message))).into_response()
    }
}
