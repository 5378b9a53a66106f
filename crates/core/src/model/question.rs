use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("multiple-choice question needs at least one option")]
    NoOptions,

    #[error("multiple-choice option cannot be empty")]
    EmptyOption,

    #[error("multiple-choice options must contain the answer")]
    AnswerNotInOptions,

    #[error("answer key for this question type must be a string")]
    ExpectedTextAnswer,

    #[error("answer key for a number question must be an integer")]
    ExpectedNumberAnswer,

    #[error("options are only valid on multiple-choice questions")]
    UnexpectedOptions,
}

//
// ─── KIND & ANSWER KEY ─────────────────────────────────────────────────────────
//

/// Question type as it appears in the bank document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Mcq,
    Text,
    Number,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::Mcq => write!(f, "mcq"),
            QuestionKind::Text => write!(f, "text"),
            QuestionKind::Number => write!(f, "number"),
        }
    }
}

/// Expected answer as authored in the bank: a string for mcq/text questions,
/// an integer for number questions.
///
/// `Number` comes first so untagged deserialization tries the integer shape
/// before falling back to a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerKey {
    Number(i64),
    Text(String),
}

impl AnswerKey {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerKey::Text(s) => Some(s),
            AnswerKey::Number(_) => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<i64> {
        match self {
            AnswerKey::Number(n) => Some(*n),
            AnswerKey::Text(_) => None,
        }
    }
}

impl fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerKey::Text(s) => write!(f, "{s}"),
            AnswerKey::Number(n) => write!(f, "{n}"),
        }
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single quiz question, immutable once the bank is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    kind: QuestionKind,
    prompt: String,
    options: Vec<String>,
    answer: AnswerKey,
    time_to_answer_secs: Option<u32>,
}

impl Question {
    /// Creates a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, the answer key does
    /// not match the question kind, or the mcq option list is missing,
    /// contains blanks, or does not include the answer.
    pub fn new(
        kind: QuestionKind,
        prompt: impl Into<String>,
        options: Vec<String>,
        answer: AnswerKey,
        time_to_answer_secs: Option<u32>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        match kind {
            QuestionKind::Mcq => {
                let key = answer.as_text().ok_or(QuestionError::ExpectedTextAnswer)?;
                if options.is_empty() {
                    return Err(QuestionError::NoOptions);
                }
                if options.iter().any(|option| option.trim().is_empty()) {
                    return Err(QuestionError::EmptyOption);
                }
                if !options.iter().any(|option| option == key) {
                    return Err(QuestionError::AnswerNotInOptions);
                }
            }
            QuestionKind::Text => {
                if answer.as_text().is_none() {
                    return Err(QuestionError::ExpectedTextAnswer);
                }
                if !options.is_empty() {
                    return Err(QuestionError::UnexpectedOptions);
                }
            }
            QuestionKind::Number => {
                if answer.as_number().is_none() {
                    return Err(QuestionError::ExpectedNumberAnswer);
                }
                if !options.is_empty() {
                    return Err(QuestionError::UnexpectedOptions);
                }
            }
        }

        Ok(Self {
            kind,
            prompt,
            options,
            answer,
            time_to_answer_secs,
        })
    }

    // Accessors
    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Option texts in authored order. Empty for non-mcq questions.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn answer(&self) -> &AnswerKey {
        &self.answer
    }

    #[must_use]
    pub fn time_to_answer_secs(&self) -> Option<u32> {
        self.time_to_answer_secs
    }

    /// Grades a raw answer against this question's key.
    ///
    /// - mcq: the selected option must equal the key exactly (case-sensitive).
    /// - number: the trimmed input must parse as an integer equal to the key;
    ///   unparseable input is simply incorrect.
    /// - text: trimmed, case-folded comparison.
    #[must_use]
    pub fn check_answer(&self, raw: &str) -> bool {
        match (&self.kind, &self.answer) {
            (QuestionKind::Mcq, AnswerKey::Text(key)) => raw == key,
            (QuestionKind::Number, AnswerKey::Number(key)) => {
                raw.trim().parse::<i64>().is_ok_and(|value| value == *key)
            }
            (QuestionKind::Text, AnswerKey::Text(key)) => {
                raw.trim().to_lowercase() == key.trim().to_lowercase()
            }
            // Constructor validation makes the key always match the kind.
            _ => false,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
