use chrono::{DateTime, Utc};
use rand::rng;
use rand::seq::SliceRandom;

use quiz_core::model::{Question, Section};
use quiz_core::scoring;

use crate::error::QuizError;

//
// ─── ANSWER RESULT ─────────────────────────────────────────────────────────────
//

/// Outcome of grading one answer within a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionAnswer {
    /// Original index of the question within its section, stable across
    /// shuffles.
    pub question_index: usize,
    pub is_correct: bool,
    pub points_awarded: u32,
}

/// What happened after advancing past an answered question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    NextQuestion,
    Completed,
}

#[derive(Debug, Clone)]
struct OrderedQuestion {
    original_index: usize,
    question: Question,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Transient traversal of one section: an owned shuffled copy of the
/// section's questions, a cursor, and the points earned so far.
///
/// A session is never persisted; only the scores and per-question
/// correctness it reports outlive it.
#[derive(Debug)]
pub struct QuizSession {
    section_title: String,
    questions: Vec<OrderedQuestion>,
    current: usize,
    answered_current: bool,
    points: u32,
    results: Vec<SessionAnswer>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Start a session over a fresh uniformly shuffled copy of the section's
    /// questions.
    pub(crate) fn start(section: &Section, started_at: DateTime<Utc>) -> Self {
        let mut order: Vec<usize> = (0..section.len()).collect();
        let mut rng = rng();
        order.shuffle(&mut rng);
        Self::with_order(section, order, started_at)
    }

    /// Start a session with an explicit question order (deterministic tests).
    pub(crate) fn with_order(
        section: &Section,
        order: Vec<usize>,
        started_at: DateTime<Utc>,
    ) -> Self {
        let questions = order
            .into_iter()
            .filter_map(|original_index| {
                section.question(original_index).map(|question| OrderedQuestion {
                    original_index,
                    question: question.clone(),
                })
            })
            .collect();

        Self {
            section_title: section.title().to_owned(),
            questions,
            current: 0,
            answered_current: false,
            points: 0,
            results: Vec::new(),
            started_at,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn section_title(&self) -> &str {
        &self.section_title
    }

    /// Total number of questions in this session.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Zero-based position of the cursor within the shuffled order.
    #[must_use]
    pub fn position(&self) -> usize {
        self.current
    }

    /// Number of questions graded so far.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.results.len()
    }

    /// Points earned during this run only.
    #[must_use]
    pub fn points_earned(&self) -> u32 {
        self.points
    }

    #[must_use]
    pub fn results(&self) -> &[SessionAnswer] {
        &self.results
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// True once the current question has been graded but not yet advanced
    /// past.
    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.answered_current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current).map(|entry| &entry.question)
    }

    /// Original section index of the question under the cursor.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.questions.get(self.current).map(|entry| entry.original_index)
    }

    /// Grade the raw answer for the current question and record the result.
    ///
    /// Grading happens at most once per question instance: a second call
    /// before `advance` fails and must not change the score.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::SessionDone` after completion and
    /// `QuizError::AlreadyAnswered` when the current question was graded
    /// already.
    pub fn submit_answer(&mut self, raw: &str) -> Result<SessionAnswer, QuizError> {
        if self.is_complete() {
            return Err(QuizError::SessionDone);
        }
        if self.answered_current {
            return Err(QuizError::AlreadyAnswered);
        }
        let Some(entry) = self.questions.get(self.current) else {
            return Err(QuizError::SessionDone);
        };

        let is_correct = entry.question.check_answer(raw);
        let answer = SessionAnswer {
            question_index: entry.original_index,
            is_correct,
            points_awarded: scoring::score(&entry.question, is_correct),
        };

        self.points = self.points.saturating_add(answer.points_awarded);
        self.results.push(answer.clone());
        self.answered_current = true;
        Ok(answer)
    }

    /// Move past the current (answered) question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AnswerPending` when the current question has not
    /// been graded yet and `QuizError::SessionDone` after completion.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<SessionStep, QuizError> {
        if self.is_complete() {
            return Err(QuizError::SessionDone);
        }
        if !self.answered_current {
            return Err(QuizError::AnswerPending);
        }

        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.answered_current = false;
            Ok(SessionStep::NextQuestion)
        } else {
            self.completed_at = Some(now);
            Ok(SessionStep::Completed)
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{AnswerKey, QuestionKind};
    use quiz_core::time::fixed_now;

    fn build_section() -> Section {
        let q1 = Question::new(
            QuestionKind::Mcq,
            "Which gas do we breathe in?",
            vec!["O2".into(), "CO2".into()],
            AnswerKey::Text("O2".into()),
            None,
        )
        .unwrap();
        let q2 = Question::new(
            QuestionKind::Number,
            "How many continents are there?",
            Vec::new(),
            AnswerKey::Number(7),
            None,
        )
        .unwrap();
        Section::new("Science", vec![q1, q2]).unwrap()
    }

    #[test]
    fn session_walks_questions_in_given_order() {
        let section = build_section();
        let mut session = QuizSession::with_order(&section, vec![1, 0], fixed_now());

        assert_eq!(session.current_index(), Some(1));
        session.submit_answer("7").unwrap();
        assert_eq!(session.advance(fixed_now()).unwrap(), SessionStep::NextQuestion);
        assert_eq!(session.current_index(), Some(0));
    }

    #[test]
    fn shuffled_start_is_a_permutation() {
        let section = build_section();
        let session = QuizSession::start(&section, fixed_now());

        let mut prompts: Vec<&str> = (0..session.total())
            .filter_map(|i| session.questions.get(i))
            .map(|entry| entry.question.prompt())
            .collect();
        prompts.sort_unstable();

        let mut expected: Vec<&str> =
            section.questions().iter().map(Question::prompt).collect();
        expected.sort_unstable();

        assert_eq!(prompts, expected);
    }

    #[test]
    fn double_submit_does_not_rescore() {
        let section = build_section();
        let mut session = QuizSession::with_order(&section, vec![0, 1], fixed_now());

        let first = session.submit_answer("O2").unwrap();
        assert!(first.is_correct);
        assert_eq!(session.points_earned(), 10);

        let err = session.submit_answer("O2").unwrap_err();
        assert!(matches!(err, QuizError::AlreadyAnswered));
        assert_eq!(session.points_earned(), 10);
        assert_eq!(session.answered_count(), 1);
    }

    #[test]
    fn advance_requires_an_answer() {
        let section = build_section();
        let mut session = QuizSession::with_order(&section, vec![0, 1], fixed_now());

        let err = session.advance(fixed_now()).unwrap_err();
        assert!(matches!(err, QuizError::AnswerPending));
    }

    #[test]
    fn session_completes_after_last_question() {
        let section = build_section();
        let mut session = QuizSession::with_order(&section, vec![0, 1], fixed_now());

        session.submit_answer("O2").unwrap();
        session.advance(fixed_now()).unwrap();
        let wrong = session.submit_answer("8").unwrap();
        assert!(!wrong.is_correct);
        assert_eq!(wrong.points_awarded, 0);

        assert_eq!(session.advance(fixed_now()).unwrap(), SessionStep::Completed);
        assert!(session.is_complete());
        assert_eq!(session.completed_at(), Some(fixed_now()));
        assert_eq!(session.points_earned(), 10);

        let err = session.submit_answer("7").unwrap_err();
        assert!(matches!(err, QuizError::SessionDone));
    }
}
