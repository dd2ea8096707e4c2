//! Request extractors.
//!
//! axum's own extractors answer malformed requests with plain-text bodies.
//! The wrappers here route those rejections through [`AppError`] so JSON
//! clients get the usual error envelope and browsers get an HTML page.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use mypoll_common::AppError;
use serde::de::DeserializeOwned;

use crate::{middleware::AdminSession, response::HtmlError};

/// Administrator extractor.
///
/// Succeeds only when [`crate::middleware::admin_auth_middleware`] accepted
/// the request's bearer token.
#[derive(Debug, Clone, Copy)]
pub struct AdminAuth;

impl<S> FromRequestParts<S> for AdminAuth
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminSession>()
            .map(|_| Self)
            .ok_or(AppError::Unauthorized)
    }
}

/// The `{question_id}` path segment.
///
/// A segment that is not a number names no question, so it is a 404.
#[derive(Debug, Clone, Copy)]
pub struct QuestionId(pub i32);

impl<S> FromRequestParts<S> for QuestionId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<i32>::from_request_parts(parts, state)
            .await
            .map(|Path(id)| Self(id))
            .map_err(|rejection| {
                tracing::debug!(error = %rejection.body_text(), "Invalid question id");
                AppError::NotFound("Question".to_string())
            })
    }
}

/// [`QuestionId`] for the HTML pages.
#[derive(Debug, Clone, Copy)]
pub struct PageQuestionId(pub i32);

impl<S> FromRequestParts<S> for PageQuestionId
where
    S: Send + Sync,
{
    type Rejection = HtmlError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        QuestionId::from_request_parts(parts, state)
            .await
            .map(|QuestionId(id)| Self(id))
            .map_err(HtmlError)
    }
}

/// JSON body whose rejections become [`AppError::BadRequest`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
    }
}
