//! Vote repository.
//!
//! A vote touches two rows: the chosen choice's `votes` and the owning
//! question's `rate`. Both are bumped with in-database `col = col + 1`
//! expressions inside one transaction, and the rows are read back with
//! `RETURNING` so callers see the committed counters.

use std::sync::Arc;

use crate::entities::{Choice, Question, choice, question};
use mypoll_common::{AppError, AppResult};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait,
    sea_query::Expr,
};

/// Rows as they stand right after a recorded vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedVote {
    /// The voted choice with its new tally.
    pub choice: choice::Model,
    /// The owning question with its new rate.
    pub question: question::Model,
}

/// Vote repository for database operations.
#[derive(Clone)]
pub struct VoteRepository {
    db: Arc<DatabaseConnection>,
}

impl VoteRepository {
    /// Create a new vote repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Increment the choice's votes and the question's rate by one.
    ///
    /// The choice must belong to the question; otherwise nothing is written
    /// and `NotFound` is returned.
    pub async fn record(&self, question_id: i32, choice_id: i32) -> AppResult<RecordedVote> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let choice = Choice::update_many()
            .col_expr(
                choice::Column::Votes,
                Expr::col(choice::Column::Votes).add(1),
            )
            .filter(choice::Column::Id.eq(choice_id))
            .filter(choice::Column::QuestionId.eq(question_id))
            .exec_with_returning(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .into_iter()
            .next();

        // Dropping the transaction rolls it back.
        let Some(choice) = choice else {
            return Err(AppError::NotFound(format!(
                "Choice {choice_id} of question {question_id}"
            )));
        };

        let question = Question::update_many()
            .col_expr(
                question::Column::Rate,
                Expr::col(question::Column::Rate).add(1),
            )
            .filter(question::Column::Id.eq(question_id))
            .exec_with_returning(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("Question {question_id}")))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(RecordedVote { choice, question })
    }
}
