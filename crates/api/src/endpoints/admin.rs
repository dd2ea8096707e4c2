//! Admin endpoints for creating questions and choices.

use axum::{Router, extract::State, routing::post};
use chrono::{DateTime, Utc};
use mypoll_common::AppResult;
use mypoll_core::CreateQuestionInput;
use serde::Deserialize;
use validator::Validate;

use super::questions::{ChoiceResponse, QuestionDetailResponse};
use crate::{
    extractors::{AdminAuth, ApiJson, QuestionId},
    middleware::AppState,
    response::ApiResponse,
};

/// Create question request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 200))]
    pub question_text: String,
    /// Publication time; now when omitted. May lie in the future.
    #[serde(default)]
    pub pub_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub choices: Vec<String>,
}

/// Create a question.
async fn create_question(
    _admin: AdminAuth,
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateQuestionRequest>,
) -> AppResult<ApiResponse<QuestionDetailResponse>> {
    req.validate()?;

    let poll = state
        .poll_service
        .create_question(CreateQuestionInput {
            question_text: req.question_text,
            pub_date: req.pub_date,
            is_private: req.is_private,
            choices: req.choices,
        })
        .await?;

    Ok(ApiResponse::created(poll.into()))
}

/// Add choice request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddChoiceRequest {
    #[validate(length(min = 1, max = 200))]
    pub choice_text: String,
}

/// Add a choice to a question.
async fn add_choice(
    _admin: AdminAuth,
    State(state): State<AppState>,
    QuestionId(question_id): QuestionId,
    ApiJson(req): ApiJson<AddChoiceRequest>,
) -> AppResult<ApiResponse<ChoiceResponse>> {
    req.validate()?;

    let choice = state
        .poll_service
        .add_choice(question_id, &req.choice_text)
        .await?;

    Ok(ApiResponse::created(choice.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/questions", post(create_question))
        .route("/questions/{question_id}/choices", post(add_choice))
}
