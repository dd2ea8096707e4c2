//! Repositories wrapping entity access.

pub mod choice;
pub mod question;
pub mod vote;

pub use choice::ChoiceRepository;
pub use question::QuestionRepository;
pub use vote::{RecordedVote, VoteRepository};
