//! Choice repository.

use std::sync::Arc;

use crate::entities::{Choice, choice};
use mypoll_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Choice repository for database operations.
#[derive(Clone)]
pub struct ChoiceRepository {
    db: Arc<DatabaseConnection>,
}

impl ChoiceRepository {
    /// Create a new choice repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// All choices of a question in creation order.
    pub async fn find_by_question(&self, question_id: i32) -> AppResult<Vec<choice::Model>> {
        Choice::find()
            .filter(choice::Column::QuestionId.eq(question_id))
            .order_by_asc(choice::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a choice only if it belongs to the given question.
    pub async fn find_in_question(
        &self,
        question_id: i32,
        choice_id: i32,
    ) -> AppResult<Option<choice::Model>> {
        Choice::find_by_id(choice_id)
            .filter(choice::Column::QuestionId.eq(question_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new choice.
    pub async fn create(&self, model: choice::ActiveModel) -> AppResult<choice::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
