//! Question JSON endpoints.

use axum::{
    Router,
    extract::State,
    routing::{get, post},
};
use chrono::Utc;
use mypoll_common::{AppError, AppResult};
use mypoll_core::{Category, QuestionWithChoices, VoteReceipt};
use mypoll_db::entities::{choice, question};
use serde::{Deserialize, Serialize};

use crate::{
    extractors::{ApiJson, QuestionId},
    middleware::AppState,
    response::ApiResponse,
};

/// Question response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub id: i32,
    pub question_text: String,
    pub pub_date: String,
    pub rate: i32,
    pub is_private: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'static str>,
    pub was_published_recently: bool,
}

impl From<question::Model> for QuestionResponse {
    fn from(q: question::Model) -> Self {
        Self {
            id: q.id,
            pub_date: q.pub_date.to_rfc3339(),
            rate: q.rate,
            is_private: q.is_private,
            category: Category::from_rate(q.rate).label(),
            was_published_recently: q.was_published_recently(Utc::now()),
            question_text: q.question_text,
        }
    }
}

/// Choice response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceResponse {
    pub id: i32,
    pub choice_text: String,
    pub votes: i32,
}

impl From<choice::Model> for ChoiceResponse {
    fn from(c: choice::Model) -> Self {
        Self {
            id: c.id,
            choice_text: c.choice_text,
            votes: c.votes,
        }
    }
}

/// Question with choices response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDetailResponse {
    #[serde(flatten)]
    pub question: QuestionResponse,
    pub choices: Vec<ChoiceResponse>,
}

impl From<QuestionWithChoices> for QuestionDetailResponse {
    fn from(poll: QuestionWithChoices) -> Self {
        Self {
            question: poll.question.into(),
            choices: poll.choices.into_iter().map(Into::into).collect(),
        }
    }
}

/// Vote receipt response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub question_id: i32,
    pub choice_id: i32,
    pub votes: i32,
    pub rate: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'static str>,
}

impl From<VoteReceipt> for VoteResponse {
    fn from(r: VoteReceipt) -> Self {
        Self {
            question_id: r.question_id,
            choice_id: r.choice_id,
            votes: r.votes,
            rate: r.rate,
            category: r.category.label(),
        }
    }
}

/// Latest public questions.
async fn list_latest(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<QuestionResponse>>> {
    let questions = state.poll_service.latest_questions().await?;
    Ok(ApiResponse::ok(questions.into_iter().map(Into::into).collect()))
}

/// Latest private questions.
async fn list_private(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<QuestionResponse>>> {
    let questions = state.poll_service.private_questions().await?;
    Ok(ApiResponse::ok(questions.into_iter().map(Into::into).collect()))
}

/// Get question details.
async fn show(
    State(state): State<AppState>,
    QuestionId(question_id): QuestionId,
) -> AppResult<ApiResponse<QuestionDetailResponse>> {
    let poll = state.poll_service.question_detail(question_id).await?;
    Ok(ApiResponse::ok(poll.into()))
}

/// Vote request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    /// Choice ID as a number or a numeric string.
    #[serde(default)]
    pub choice: Option<serde_json::Value>,
}

impl VoteRequest {
    /// The selected choice ID; anything that is not an `i32` counts as none.
    fn choice_id(&self) -> Option<i32> {
        match self.choice.as_ref()? {
            serde_json::Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Vote on a question.
///
/// A missing or unreadable body is treated like a vote without a choice.
async fn vote(
    State(state): State<AppState>,
    QuestionId(question_id): QuestionId,
    req: Result<ApiJson<VoteRequest>, AppError>,
) -> AppResult<ApiResponse<VoteResponse>> {
    let choice_id = req.ok().and_then(|ApiJson(req)| req.choice_id());
    let receipt = state.poll_service.vote(question_id, choice_id).await?;
    Ok(ApiResponse::ok(receipt.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/questions", get(list_latest))
        .route("/questions/private", get(list_private))
        .route("/questions/{question_id}", get(show))
        .route("/questions/{question_id}/vote", post(vote))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: &str) -> VoteRequest {
        serde_json::from_str(body).unwrap_or(VoteRequest { choice: None })
    }

    #[test]
    fn test_vote_request_choice_id() {
        assert_eq!(request(r#"{"choice":5}"#).choice_id(), Some(5));
        assert_eq!(request(r#"{"choice":"5"}"#).choice_id(), Some(5));
        assert_eq!(request(r#"{"choice":"abc"}"#).choice_id(), None);
        assert_eq!(request(r#"{"choice":5000000000}"#).choice_id(), None);
        assert_eq!(request(r#"{"choice":null}"#).choice_id(), None);
        assert_eq!(request("{}").choice_id(), None);
    }
}
