use thiserror::Error;

use crate::model::question::Question;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SectionError {
    #[error("section title cannot be empty")]
    EmptyTitle,

    #[error("section has no questions")]
    NoQuestions,
}

/// A named, ordered group of questions covering one topic.
///
/// The title doubles as the persistence key for scores and progress, so it
/// must be unique within a bank (enforced by `QuestionBank`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    title: String,
    questions: Vec<Question>,
}

impl Section {
    /// Creates a new section.
    ///
    /// # Errors
    ///
    /// Returns `SectionError::EmptyTitle` for a blank title and
    /// `SectionError::NoQuestions` for an empty question list.
    pub fn new(title: impl Into<String>, questions: Vec<Question>) -> Result<Self, SectionError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(SectionError::EmptyTitle);
        }
        if questions.is_empty() {
            return Err(SectionError::NoQuestions);
        }

        Ok(Self {
            title: title.trim().to_owned(),
            questions,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Questions in authored order.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
