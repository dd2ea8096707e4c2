//! HTML poll pages.

use axum::{
    Form, Router,
    extract::{State, rejection::FormRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use mypoll_common::AppError;
use serde::Deserialize;

use crate::{extractors::PageQuestionId, middleware::AppState, pages, response::HtmlError};

type PageResult = Result<Html<String>, HtmlError>;

/// Public index of the latest questions.
async fn index(State(state): State<AppState>) -> PageResult {
    let questions = state.poll_service.latest_questions().await?;
    Ok(Html(pages::listing("Latest polls", &questions)))
}

/// Listing of private questions.
async fn private_index(State(state): State<AppState>) -> PageResult {
    let questions = state.poll_service.private_questions().await?;
    Ok(Html(pages::listing("Private polls", &questions)))
}

/// Voting page.
async fn detail(
    State(state): State<AppState>,
    PageQuestionId(question_id): PageQuestionId,
) -> PageResult {
    let poll = state.poll_service.question_detail(question_id).await?;
    Ok(Html(pages::detail(&poll, None)))
}

/// Results page.
async fn results(
    State(state): State<AppState>,
    PageQuestionId(question_id): PageQuestionId,
) -> PageResult {
    let poll = state.poll_service.results(question_id).await?;
    Ok(Html(pages::results(&poll)))
}

/// Vote form body.
#[derive(Debug, Deserialize)]
pub struct VoteForm {
    #[serde(default)]
    pub choice: Option<String>,
}

impl VoteForm {
    /// The selected choice ID; blank or non-numeric values count as none.
    fn choice_id(&self) -> Option<i32> {
        self.choice
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse().ok())
    }
}

/// Record a vote, then send the browser to the results page.
///
/// Without a valid choice the voting page is shown again with the error.
/// An unreadable form body counts as no choice.
async fn vote(
    State(state): State<AppState>,
    PageQuestionId(question_id): PageQuestionId,
    form: Result<Form<VoteForm>, FormRejection>,
) -> Result<Response, HtmlError> {
    let choice_id = form.ok().and_then(|Form(form)| form.choice_id());
    match state.poll_service.vote(question_id, choice_id).await {
        Ok(receipt) => {
            Ok(Redirect::to(&format!("/polls/{}/results/", receipt.question_id)).into_response())
        }
        Err(err @ AppError::NoChoiceSelected) => {
            let poll = state.poll_service.question_detail(question_id).await?;
            let page = pages::detail(&poll, Some(&err.to_string()));
            Ok((StatusCode::OK, Html(page)).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/polls/", get(index))
        .route("/polls/private/", get(private_index))
        .route("/polls/private/list/", get(private_index))
        .route("/polls/{question_id}/", get(detail))
        .route("/polls/{question_id}/results/", get(results))
        .route("/polls/{question_id}/vote/", post(vote))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(choice: Option<&str>) -> VoteForm {
        VoteForm {
            choice: choice.map(str::to_string),
        }
    }

    #[test]
    fn test_choice_id_parsing() {
        assert_eq!(form(Some("7")).choice_id(), Some(7));
        assert_eq!(form(Some(" 7 ")).choice_id(), Some(7));
        assert_eq!(form(Some("")).choice_id(), None);
        assert_eq!(form(Some("seven")).choice_id(), None);
        assert_eq!(form(None).choice_id(), None);
    }
}
