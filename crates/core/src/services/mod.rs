//! Business logic services.

#![allow(missing_docs)]

pub mod poll;

pub use poll::{CreateQuestionInput, PollService, QuestionWithChoices, VoteReceipt};
