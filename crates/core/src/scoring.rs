//! Pure scoring rules for graded answers.
//!
//! `score` has no side effects and may be called repeatedly for the same
//! answer event; the caller is responsible for invoking it once per grading.

use crate::model::{Question, QuestionKind};

/// Points for any correct answer.
pub const BASE_POINTS: u32 = 10;
/// Extra points for a correct free-text answer.
pub const TEXT_BONUS: u32 = 5;
/// Extra points for a correct numeric answer.
pub const NUMBER_BONUS: u32 = 3;
/// Extra points when the question's time limit is tight.
pub const FAST_BONUS: u32 = 2;
/// A time limit strictly below this many seconds counts as tight.
pub const FAST_LIMIT_SECS: u32 = 10;

/// Points awarded for an answer to `question` graded as `is_correct`.
///
/// Incorrect answers always score 0. Correct answers earn the base plus a
/// kind bonus (text 5, number 3, mcq 0) plus the fast bonus when
/// `time_to_answer` is present and strictly under [`FAST_LIMIT_SECS`].
#[must_use]
pub fn score(question: &Question, is_correct: bool) -> u32 {
    if !is_correct {
        return 0;
    }

    let kind_bonus = match question.kind() {
        QuestionKind::Mcq => 0,
        QuestionKind::Text => TEXT_BONUS,
        QuestionKind::Number => NUMBER_BONUS,
    };
    let fast_bonus = match question.time_to_answer_secs() {
        Some(secs) if secs < FAST_LIMIT_SECS => FAST_BONUS,
        _ => 0,
    };

    BASE_POINTS + kind_bonus + fast_bonus
}
