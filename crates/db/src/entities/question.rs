//! Question entity.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "question")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub question_text: String,

    /// Questions are hidden until this moment.
    #[sea_orm(indexed)]
    pub pub_date: DateTimeWithTimeZone,

    /// Popularity counter, bumped once per recorded vote.
    pub rate: i32,

    /// Private questions only appear on the private listing.
    pub is_private: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::choice::Entity")]
    Choice,
}

impl Related<super::choice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Choice.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whether the question went public within the day before `now`.
    ///
    /// Questions scheduled after `now` are never recent.
    #[must_use]
    pub fn was_published_recently(&self, now: DateTime<Utc>) -> bool {
        let pub_date = self.pub_date.with_timezone(&Utc);
        now - Duration::days(1) <= pub_date && pub_date <= now
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.question_text)
    }
}
