use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SectionSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("correct count ({correct}) exceeds total ({total})")]
    CountMismatch { correct: u32, total: u32 },
}

/// Aggregate result of one completed traversal of a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSummary {
    section_title: String,
    points: u32,
    correct: u32,
    total: u32,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl SectionSummary {
    /// Builds a summary for a finished run.
    ///
    /// # Errors
    ///
    /// Returns `SectionSummaryError::InvalidTimeRange` when `completed_at`
    /// precedes `started_at` and `CountMismatch` when `correct > total`.
    pub fn new(
        section_title: impl Into<String>,
        points: u32,
        correct: u32,
        total: u32,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, SectionSummaryError> {
        if completed_at < started_at {
            return Err(SectionSummaryError::InvalidTimeRange);
        }
        if correct > total {
            return Err(SectionSummaryError::CountMismatch { correct, total });
        }

        Ok(Self {
            section_title: section_title.into(),
            points,
            correct,
            total,
            started_at,
            completed_at,
        })
    }

    #[must_use]
    pub fn section_title(&self) -> &str {
        &self.section_title
    }

    /// Points earned during this run only, not the persisted cumulative score.
    #[must_use]
    pub fn points(&self) -> u32 {
        self.points
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}
