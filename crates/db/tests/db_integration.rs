//! Database integration tests.
//!
//! These tests require a running `PostgreSQL` instance.
//! Run with: `cargo test --test db_integration -- --ignored`
//!
//! Environment variables:
//!   `TEST_DB_HOST` (default: localhost)
//!   `TEST_DB_PORT` (default: 5433)
//!   `TEST_DB_USER` (default: `mypoll_test`)
//!   `TEST_DB_PASSWORD` (default: `mypoll_test`)
//!   `TEST_DB_NAME` (default: `mypoll_test`)

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use mypoll_db::entities::{choice, question};
use mypoll_db::repositories::{ChoiceRepository, QuestionRepository, VoteRepository};
use mypoll_db::test_utils::{TestDatabase, TestDbConfig};
use sea_orm::{NotSet, Set};

fn new_question(text: &str, offset: Duration, is_private: bool) -> question::ActiveModel {
    question::ActiveModel {
        id: NotSet,
        question_text: Set(text.to_string()),
        pub_date: Set((Utc::now() + offset).into()),
        rate: Set(0),
        is_private: Set(is_private),
    }
}

fn new_choice(question_id: i32, text: &str) -> choice::ActiveModel {
    choice::ActiveModel {
        id: NotSet,
        question_id: Set(question_id),
        choice_text: Set(text.to_string()),
        votes: Set(0),
    }
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_record_vote_increments_counters() {
    let test_db = TestDatabase::create_unique().await.expect("Failed to create db");
    let db = test_db.connection();

    let questions = QuestionRepository::new(Arc::clone(&db));
    let choices = ChoiceRepository::new(Arc::clone(&db));
    let votes = VoteRepository::new(Arc::clone(&db));

    let q = questions
        .create(new_question("Test Question", Duration::zero(), false))
        .await
        .unwrap();
    let c = choices.create(new_choice(q.id, "Choice 1")).await.unwrap();

    let recorded = votes.record(q.id, c.id).await.unwrap();
    assert_eq!(recorded.choice.votes, 1);
    assert_eq!(recorded.question.rate, 1);

    let c = choices.find_in_question(q.id, c.id).await.unwrap().unwrap();
    let q = questions.find_by_id(q.id).await.unwrap().unwrap();
    assert_eq!(c.votes, 1);
    assert_eq!(q.rate, 1);

    test_db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_record_vote_rejects_foreign_choice_without_mutation() {
    let test_db = TestDatabase::create_unique().await.expect("Failed to create db");
    let db = test_db.connection();

    let questions = QuestionRepository::new(Arc::clone(&db));
    let choices = ChoiceRepository::new(Arc::clone(&db));
    let votes = VoteRepository::new(Arc::clone(&db));

    let first = questions
        .create(new_question("First", Duration::zero(), false))
        .await
        .unwrap();
    let second = questions
        .create(new_question("Second", Duration::zero(), false))
        .await
        .unwrap();
    let foreign = choices.create(new_choice(second.id, "Other")).await.unwrap();

    assert!(votes.record(first.id, foreign.id).await.is_err());

    let first = questions.find_by_id(first.id).await.unwrap().unwrap();
    let foreign = choices
        .find_in_question(second.id, foreign.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.rate, 0);
    assert_eq!(foreign.votes, 0);

    test_db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_latest_published_filters_future_and_privacy() {
    let test_db = TestDatabase::create_unique().await.expect("Failed to create db");
    let db = test_db.connection();
    let questions = QuestionRepository::new(Arc::clone(&db));

    let past = questions
        .create(new_question("Past question.", -Duration::days(30), false))
        .await
        .unwrap();
    questions
        .create(new_question("Future question.", Duration::days(30), false))
        .await
        .unwrap();
    let private = questions
        .create(new_question("Private question.", -Duration::days(1), true))
        .await
        .unwrap();

    let public = questions
        .find_latest_published(false, Utc::now(), 5)
        .await
        .unwrap();
    assert_eq!(public, vec![past]);

    let private_list = questions
        .find_latest_published(true, Utc::now(), 5)
        .await
        .unwrap();
    assert_eq!(private_list, vec![private]);

    test_db.cleanup().await.unwrap();
    assert!(
        questions
            .find_latest_published(false, Utc::now(), 5)
            .await
            .unwrap()
            .is_empty()
    );

    test_db.drop_database().await.unwrap();
}

#[test]
fn test_config_from_env() {
    let config = TestDbConfig::default();
    assert!(!config.host.is_empty());
    assert!(config.port > 0);
    assert!(!config.username.is_empty());
    assert!(!config.database.is_empty());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_create_with_choices_persists_together() {
    let test_db = TestDatabase::create_unique().await.expect("Failed to create db");
    let questions = QuestionRepository::new(test_db.connection());
    let choices = ChoiceRepository::new(test_db.connection());

    let (q, created) = questions
        .create_with_choices(
            new_question("What's new?", Duration::zero(), false),
            vec![new_choice(0, "Not much"), new_choice(0, "The sky")],
        )
        .await
        .unwrap();

    assert_eq!(created.len(), 2);
    let stored = choices.find_by_question(q.id).await.unwrap();
    assert_eq!(stored, created);

    test_db.drop_database().await.unwrap();
}
