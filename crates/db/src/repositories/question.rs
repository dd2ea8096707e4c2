//! Question repository.

use std::sync::Arc;

use crate::entities::{Question, choice, question};
use chrono::{DateTime, Utc};
use mypoll_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

/// Question repository for database operations.
#[derive(Clone)]
pub struct QuestionRepository {
    db: Arc<DatabaseConnection>,
}

impl QuestionRepository {
    /// Create a new question repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a question by ID, published or not.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<question::Model>> {
        Question::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a question by ID if it was published at or before `now`.
    pub async fn find_published_by_id(
        &self,
        id: i32,
        now: DateTime<Utc>,
    ) -> AppResult<Option<question::Model>> {
        Question::find_by_id(id)
            .filter(question::Column::PubDate.lte(now))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a published question, returning error if not found.
    pub async fn get_published(&self, id: i32, now: DateTime<Utc>) -> AppResult<question::Model> {
        self.find_published_by_id(id, now)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Question {id}")))
    }

    /// Latest published questions with the given privacy, newest first.
    pub async fn find_latest_published(
        &self,
        is_private: bool,
        now: DateTime<Utc>,
        limit: u64,
    ) -> AppResult<Vec<question::Model>> {
        Question::find()
            .filter(question::Column::PubDate.lte(now))
            .filter(question::Column::IsPrivate.eq(is_private))
            .order_by_desc(question::Column::PubDate)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a question and its choices in one transaction.
    ///
    /// Each choice's `question_id` is filled in from the inserted question.
    /// If any insert fails, nothing is kept.
    pub async fn create_with_choices(
        &self,
        model: question::ActiveModel,
        choices: Vec<choice::ActiveModel>,
    ) -> AppResult<(question::Model, Vec<choice::Model>)> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let question = model
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut created = Vec::with_capacity(choices.len());
        for mut choice in choices {
            choice.question_id = Set(question.id);
            created.push(
                choice
                    .insert(&txn)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?,
            );
        }

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok((question, created))
    }

    /// Create a new question.
    pub async fn create(&self, model: question::ActiveModel) -> AppResult<question::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
