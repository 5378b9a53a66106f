mod progress;
mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::QuizError;
pub use progress::ProgressTracker;
pub use service::{QuizSession, SessionAnswer, SessionStep};
pub use view::{QuestionPrompt, SectionListItem};
pub use workflow::{AdvanceOutcome, AnswerFeedback, QuizRunner};
