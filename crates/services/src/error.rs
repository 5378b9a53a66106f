//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{BankError, SectionSummaryError};

/// Errors emitted while acquiring the question bank.
///
/// Any of these leaves the quiz unavailable: no section can be started until
/// a later load attempt succeeds.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankLoadError {
    #[error("bank request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("failed to read bank file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse bank document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] BankError),
}

/// Errors emitted by the quiz runner.
///
/// Apart from `SectionOutOfRange`, these are invalid state transitions: a
/// correct presenter never triggers them, and tests treat them as assertion
/// failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("section index {index} is out of range (bank has {len} sections)")]
    SectionOutOfRange { index: usize, len: usize },

    #[error("no section is in progress")]
    NoActiveSection,

    #[error("a section is already in progress")]
    SectionInProgress,

    #[error("current question was already answered")]
    AlreadyAnswered,

    #[error("current question has not been answered yet")]
    AnswerPending,

    #[error("section run already completed")]
    SessionDone,

    #[error(transparent)]
    Summary(#[from] SectionSummaryError),
}
