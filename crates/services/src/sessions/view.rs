use rand::rng;
use rand::seq::SliceRandom;

use quiz_core::model::{PersistedProgress, Question, QuestionKind, Section};

/// Presentation-agnostic menu row for one section.
///
/// This is intentionally **not** a UI view-model: no pre-formatted strings,
/// no layout assumptions. The presenter formats counts and percentages as it
/// sees fit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionListItem {
    pub index: usize,
    pub title: String,
    /// Cumulative persisted score across all runs.
    pub score: u32,
    /// Questions with a recorded answer, across all runs.
    pub answered: usize,
    pub total: usize,
}

impl SectionListItem {
    pub(crate) fn build(index: usize, section: &Section, progress: &PersistedProgress) -> Self {
        Self {
            index,
            title: section.title().to_owned(),
            score: progress.score(section.title()),
            answered: progress.answered_count(section.title()),
            total: section.len(),
        }
    }

    /// Share of the section's questions with a recorded answer, 0..=100.
    #[must_use]
    pub fn completion_percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        u32::try_from(self.answered.saturating_mul(100) / self.total).unwrap_or(100)
    }
}

/// The current question as the presenter should show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPrompt {
    /// One-based position within the shuffled run.
    pub number: usize,
    pub total: usize,
    pub prompt: String,
    pub kind: QuestionKind,
    /// For mcq questions, a freshly shuffled copy of the options; empty
    /// otherwise. Display order is independent of question order.
    pub options: Vec<String>,
}

impl QuestionPrompt {
    pub(crate) fn for_question(number: usize, total: usize, question: &Question) -> Self {
        let mut options = question.options().to_vec();
        if options.len() > 1 {
            let mut rng = rng();
            options.shuffle(&mut rng);
        }

        Self {
            number,
            total,
            prompt: question.prompt().to_owned(),
            kind: question.kind(),
            options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::AnswerKey;

    #[test]
    fn completion_percent_rounds_down() {
        let item = SectionListItem {
            index: 0,
            title: "Science".into(),
            score: 10,
            answered: 1,
            total: 3,
        };
        assert_eq!(item.completion_percent(), 33);
    }

    #[test]
    fn completion_percent_handles_empty_section() {
        let item = SectionListItem {
            index: 0,
            title: "Science".into(),
            score: 0,
            answered: 0,
            total: 0,
        };
        assert_eq!(item.completion_percent(), 0);
    }

    #[test]
    fn prompt_options_are_a_permutation() {
        let question = Question::new(
            QuestionKind::Mcq,
            "Which gas do we breathe in?",
            vec!["O2".into(), "CO2".into(), "N2".into()],
            AnswerKey::Text("O2".into()),
            None,
        )
        .unwrap();

        let prompt = QuestionPrompt::for_question(1, 3, &question);
        assert_eq!(prompt.number, 1);
        assert_eq!(prompt.total, 3);

        let mut shown = prompt.options.clone();
        shown.sort_unstable();
        let mut expected = question.options().to_vec();
        expected.sort_unstable();
        assert_eq!(shown, expected);
    }

    #[test]
    fn prompt_for_text_question_has_no_options() {
        let question = Question::new(
            QuestionKind::Text,
            "Capital of France?",
            Vec::new(),
            AnswerKey::Text("Paris".into()),
            None,
        )
        .unwrap();

        let prompt = QuestionPrompt::for_question(2, 5, &question);
        assert!(prompt.options.is_empty());
        assert_eq!(prompt.kind, QuestionKind::Text);
    }
}
