use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::question::{AnswerKey, Question, QuestionError, QuestionKind};
use crate::model::section::{Section, SectionError};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankError {
    #[error("bank has no sections")]
    Empty,

    #[error("duplicate section title: {0:?}")]
    DuplicateTitle(String),

    #[error("section {section:?}: {source}")]
    Section {
        section: String,
        #[source]
        source: SectionError,
    },

    #[error("section {section:?}, question {index}: {source}")]
    Question {
        section: String,
        index: usize,
        #[source]
        source: QuestionError,
    },
}

//
// ─── BANK ──────────────────────────────────────────────────────────────────────
//

/// The loaded catalog of sections, read-only for the rest of the process
/// lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    sections: Vec<Section>,
}

impl QuestionBank {
    /// Builds a bank from already-validated sections.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Empty` with no sections and
    /// `BankError::DuplicateTitle` when two sections share a title.
    pub fn new(sections: Vec<Section>) -> Result<Self, BankError> {
        if sections.is_empty() {
            return Err(BankError::Empty);
        }

        let mut seen = HashSet::new();
        for section in &sections {
            if !seen.insert(section.title()) {
                return Err(BankError::DuplicateTitle(section.title().to_owned()));
            }
        }

        Ok(Self { sections })
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// All section titles in bank order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(Section::title)
    }
}

//
// ─── WIRE DOCUMENTS ────────────────────────────────────────────────────────────
//

/// Raw wire shape of a question as served in the bank document.
///
/// This mirrors the domain `Question` so the loader can deserialize without
/// leaking serde concerns into the domain layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDocument {
    pub question_type: QuestionKind,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub answer: AnswerKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_to_answer: Option<u32>,
}

impl QuestionDocument {
    /// Convert the document into a validated domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the document violates the question
    /// invariants.
    pub fn into_question(self) -> Result<Question, QuestionError> {
        Question::new(
            self.question_type,
            self.question,
            self.options.unwrap_or_default(),
            self.answer,
            self.time_to_answer,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDocument {
    pub section_title: String,
    pub questions: Vec<QuestionDocument>,
}

/// Top-level bank document: `{ "sections": [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankDocument {
    pub sections: Vec<SectionDocument>,
}

impl BankDocument {
    /// Validate the document into a domain `QuestionBank`.
    ///
    /// # Errors
    ///
    /// Returns `BankError` naming the offending section (and question index)
    /// for any invariant violation.
    pub fn into_bank(self) -> Result<QuestionBank, BankError> {
        let mut sections = Vec::with_capacity(self.sections.len());

        for document in self.sections {
            let title = document.section_title.clone();
            let mut questions = Vec::with_capacity(document.questions.len());
            for (index, question) in document.questions.into_iter().enumerate() {
                questions.push(question.into_question().map_err(|source| {
                    BankError::Question {
                        section: title.clone(),
                        index,
                        source,
                    }
                })?);
            }

            sections.push(Section::new(title.as_str(), questions).map_err(|source| {
                BankError::Section {
                    section: title.clone(),
                    source,
                }
            })?);
        }

        QuestionBank::new(sections)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
