#![forbid(unsafe_code)]

pub mod bank_loader;
pub mod error;
pub mod sessions;

pub use quiz_core::Clock;

pub use bank_loader::BankLoader;
pub use error::{BankLoadError, QuizError};
pub use sessions::{
    AdvanceOutcome, AnswerFeedback, QuestionPrompt, QuizRunner, QuizSession, SectionListItem,
    SessionAnswer,
};
