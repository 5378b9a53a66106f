mod bank;
mod progress;
mod question;
mod section;
mod summary;

pub use bank::{BankDocument, BankError, QuestionBank, QuestionDocument, SectionDocument};
pub use progress::{PersistedProgress, SectionProgress};
pub use question::{AnswerKey, Question, QuestionError, QuestionKind};
pub use section::{Section, SectionError};
pub use summary::{SectionSummary, SectionSummaryError};
