use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::{QuestionBank, SectionSummary};
use storage::repository::ProgressRepository;

use super::progress::ProgressTracker;
use super::service::{QuizSession, SessionStep};
use super::view::{QuestionPrompt, SectionListItem};
use crate::error::QuizError;

/// Per-answer feedback for the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub is_correct: bool,
    /// Rendered correct answer, shown when the answer was wrong.
    pub correct_answer: String,
    pub points_awarded: u32,
    /// Points earned so far in this run, for the live score line.
    pub running_score: u32,
}

/// Result of advancing past an answered question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Next(QuestionPrompt),
    SectionComplete(SectionSummary),
}

enum RunnerState {
    Idle,
    InProgress(QuizSession),
    SectionComplete(SectionSummary),
}

/// The quiz state machine: one live section run at a time, driven by
/// presenter events.
///
/// `Idle -> InProgress -> SectionComplete -> Idle`. Mutating methods take
/// `&mut self`; the presenter dispatches one event at a time and awaits each
/// (persistence included) before the next, so there is never an overlapping
/// in-flight transition.
pub struct QuizRunner {
    clock: Clock,
    bank: Arc<QuestionBank>,
    tracker: ProgressTracker,
    state: RunnerState,
}

impl QuizRunner {
    /// Build a runner over a loaded bank, reading stored progress once.
    pub async fn new(
        clock: Clock,
        bank: Arc<QuestionBank>,
        progress: Arc<dyn ProgressRepository>,
    ) -> Self {
        let tracker = ProgressTracker::load(progress, &bank).await;
        Self {
            clock,
            bank,
            tracker,
            state: RunnerState::Idle,
        }
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self.state, RunnerState::Idle)
    }

    #[must_use]
    pub fn in_progress(&self) -> bool {
        matches!(self.state, RunnerState::InProgress(_))
    }

    /// Summary of the most recently completed run, until the next transition.
    #[must_use]
    pub fn last_summary(&self) -> Option<&SectionSummary> {
        match &self.state {
            RunnerState::SectionComplete(summary) => Some(summary),
            _ => None,
        }
    }

    /// Menu rows for every section, with persisted score and completion.
    #[must_use]
    pub fn menu(&self) -> Vec<SectionListItem> {
        self.bank
            .sections()
            .iter()
            .enumerate()
            .map(|(index, section)| {
                SectionListItem::build(index, section, self.tracker.snapshot())
            })
            .collect()
    }

    /// Start a run over the section at `index` with a fresh shuffle.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::SectionInProgress` when a run is already live and
    /// `QuizError::SectionOutOfRange` for an invalid index.
    pub fn start_section(&mut self, index: usize) -> Result<QuestionPrompt, QuizError> {
        if self.in_progress() {
            return Err(QuizError::SectionInProgress);
        }
        let section = self
            .bank
            .section(index)
            .ok_or(QuizError::SectionOutOfRange {
                index,
                len: self.bank.len(),
            })?;

        let session = QuizSession::start(section, self.clock.now());
        self.state = RunnerState::InProgress(session);
        self.current_prompt()
    }

    /// The question currently under the cursor, as the presenter shows it.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoActiveSection` outside `InProgress`.
    pub fn current_prompt(&self) -> Result<QuestionPrompt, QuizError> {
        let RunnerState::InProgress(session) = &self.state else {
            return Err(QuizError::NoActiveSection);
        };
        let question = session.current_question().ok_or(QuizError::SessionDone)?;
        Ok(QuestionPrompt::for_question(
            session.position() + 1,
            session.total(),
            question,
        ))
    }

    /// Grade the raw answer for the current question, update the persisted
    /// score and per-question correctness, and return feedback.
    ///
    /// Grading happens at most once per question instance; persistence is
    /// fail-soft and never blocks the feedback.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoActiveSection` outside `InProgress` and
    /// `QuizError::AlreadyAnswered` for a repeated submit.
    pub async fn submit_answer(&mut self, raw: &str) -> Result<AnswerFeedback, QuizError> {
        let RunnerState::InProgress(session) = &mut self.state else {
            return Err(QuizError::NoActiveSection);
        };

        let answer = session.submit_answer(raw)?;
        let correct_answer = session
            .current_question()
            .map(|question| question.answer().to_string())
            .unwrap_or_default();
        let title = session.section_title().to_owned();
        let running_score = session.points_earned();

        self.tracker
            .record(&title, answer.question_index, answer.is_correct, answer.points_awarded)
            .await;

        Ok(AnswerFeedback {
            is_correct: answer.is_correct,
            correct_answer,
            points_awarded: answer.points_awarded,
            running_score,
        })
    }

    /// Move past the answered question: either the next prompt or the
    /// completed-section summary.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoActiveSection` outside `InProgress` and
    /// `QuizError::AnswerPending` before a submitted answer.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, QuizError> {
        let now = self.clock.now();
        let step = {
            let RunnerState::InProgress(session) = &mut self.state else {
                return Err(QuizError::NoActiveSection);
            };
            session.advance(now)?
        };

        match step {
            SessionStep::NextQuestion => self.current_prompt().map(AdvanceOutcome::Next),
            SessionStep::Completed => {
                match std::mem::replace(&mut self.state, RunnerState::Idle) {
                    RunnerState::InProgress(session) => {
                        let title = session.section_title();
                        let correct =
                            u32::try_from(self.tracker.snapshot().correct_count(title))
                                .unwrap_or(u32::MAX);
                        let total = u32::try_from(session.total()).unwrap_or(u32::MAX);
                        let summary = SectionSummary::new(
                            title,
                            session.points_earned(),
                            correct,
                            total,
                            session.started_at(),
                            session.completed_at().unwrap_or(now),
                        )?;
                        self.state = RunnerState::SectionComplete(summary.clone());
                        Ok(AdvanceOutcome::SectionComplete(summary))
                    }
                    other => {
                        self.state = other;
                        Err(QuizError::NoActiveSection)
                    }
                }
            }
        }
    }

    /// Drop the transient run and go back to `Idle`. Valid from any state;
    /// persisted scores and progress are untouched.
    pub fn return_to_menu(&mut self) {
        self.state = RunnerState::Idle;
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
