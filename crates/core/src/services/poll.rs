//! Poll service.

use chrono::{DateTime, Utc};
use mypoll_common::{AppError, AppResult};
use mypoll_db::{
    entities::{choice, question},
    repositories::{ChoiceRepository, QuestionRepository, VoteRepository},
};
use sea_orm::{ActiveValue, NotSet, Set};
use serde::Serialize;
use tracing::info;

use crate::Category;

/// Longest question or choice text accepted.
const MAX_TEXT_LEN: usize = 200;

/// Poll service for business logic.
#[derive(Clone)]
pub struct PollService {
    question_repo: QuestionRepository,
    choice_repo: ChoiceRepository,
    vote_repo: VoteRepository,
    latest_limit: u64,
}

/// Input for creating a question.
pub struct CreateQuestionInput {
    pub question_text: String,
    pub pub_date: Option<DateTime<Utc>>, // Defaults to now
    pub is_private: bool,
    pub choices: Vec<String>,
}

/// A question with its choices and display tier.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionWithChoices {
    pub question: question::Model,
    pub choices: Vec<choice::Model>,
    pub category: Category,
}

/// Outcome of a recorded vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoteReceipt {
    pub question_id: i32,
    pub choice_id: i32,
    pub votes: i32,
    pub rate: i32,
    pub category: Category,
}

impl PollService {
    /// Create a new poll service.
    #[must_use]
    pub const fn new(
        question_repo: QuestionRepository,
        choice_repo: ChoiceRepository,
        vote_repo: VoteRepository,
        latest_limit: u64,
    ) -> Self {
        Self {
            question_repo,
            choice_repo,
            vote_repo,
            latest_limit,
        }
    }

    /// Latest published public questions, newest first.
    pub async fn latest_questions(&self) -> AppResult<Vec<question::Model>> {
        self.question_repo
            .find_latest_published(false, Utc::now(), self.latest_limit)
            .await
    }

    /// Latest published private questions, newest first.
    pub async fn private_questions(&self) -> AppResult<Vec<question::Model>> {
        self.question_repo
            .find_latest_published(true, Utc::now(), self.latest_limit)
            .await
    }

    /// A published question with its choices, for the voting page.
    pub async fn question_detail(&self, question_id: i32) -> AppResult<QuestionWithChoices> {
        let question = self
            .question_repo
            .get_published(question_id, Utc::now())
            .await?;
        let choices = self.choice_repo.find_by_question(question.id).await?;
        let category = Category::from_rate(question.rate);

        Ok(QuestionWithChoices {
            question,
            choices,
            category,
        })
    }

    /// A published question with its current tallies.
    pub async fn results(&self, question_id: i32) -> AppResult<QuestionWithChoices> {
        self.question_detail(question_id).await
    }

    /// Record a vote for `choice_id` on a published question.
    ///
    /// The receipt carries the counters as they stand after the update,
    /// including votes other requests committed in the meantime.
    ///
    /// A missing choice, or one that belongs to another question, is
    /// rejected with [`AppError::NoChoiceSelected`] before anything is
    /// written.
    pub async fn vote(&self, question_id: i32, choice_id: Option<i32>) -> AppResult<VoteReceipt> {
        let question = self
            .question_repo
            .get_published(question_id, Utc::now())
            .await?;

        let choice_id = choice_id.ok_or(AppError::NoChoiceSelected)?;
        let choice = self
            .choice_repo
            .find_in_question(question.id, choice_id)
            .await?
            .ok_or(AppError::NoChoiceSelected)?;

        let recorded = self.vote_repo.record(question.id, choice.id).await?;

        let receipt = VoteReceipt {
            question_id: recorded.question.id,
            choice_id: recorded.choice.id,
            votes: recorded.choice.votes,
            rate: recorded.question.rate,
            category: Category::from_rate(recorded.question.rate),
        };

        info!(
            question_id = receipt.question_id,
            choice_id = receipt.choice_id,
            rate = receipt.rate,
            "Recorded vote"
        );

        Ok(receipt)
    }

    /// Create a question together with its initial choices.
    pub async fn create_question(
        &self,
        input: CreateQuestionInput,
    ) -> AppResult<QuestionWithChoices> {
        validate_text("Question", &input.question_text)?;
        for choice in &input.choices {
            validate_text("Choice", choice)?;
        }

        let pub_date = input.pub_date.unwrap_or_else(Utc::now);
        let model = question::ActiveModel {
            id: NotSet,
            question_text: Set(input.question_text.trim().to_string()),
            pub_date: Set(pub_date.into()),
            rate: Set(0),
            is_private: Set(input.is_private),
        };
        let choices = input
            .choices
            .iter()
            .map(|text| new_choice(NotSet, text))
            .collect();
        let (question, choices) = self
            .question_repo
            .create_with_choices(model, choices)
            .await?;

        info!(
            question_id = question.id,
            choices = choices.len(),
            is_private = question.is_private,
            "Created question"
        );

        let category = Category::from_rate(question.rate);
        Ok(QuestionWithChoices {
            question,
            choices,
            category,
        })
    }

    /// Append a choice to an existing question.
    pub async fn add_choice(&self, question_id: i32, text: &str) -> AppResult<choice::Model> {
        validate_text("Choice", text)?;

        let question = self
            .question_repo
            .find_by_id(question_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Question {question_id}")))?;

        self.choice_repo
            .create(new_choice(Set(question.id), text))
            .await
    }
}

fn new_choice(question_id: ActiveValue<i32>, text: &str) -> choice::ActiveModel {
    choice::ActiveModel {
        id: NotSet,
        question_id,
        choice_text: Set(text.trim().to_string()),
        votes: Set(0),
    }
}

fn validate_text(what: &str, text: &str) -> AppResult<()> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest(format!("{what} text cannot be empty")));
    }
    if text.chars().count() > MAX_TEXT_LEN {
        return Err(AppError::BadRequest(format!(
            "{what} text is too long (max {MAX_TEXT_LEN} chars)"
        )));
    }
    Ok(())
}
