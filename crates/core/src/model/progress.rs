use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-question correctness for one section, keyed by the question's original
/// index within the section (stable across shuffles).
pub type SectionProgress = BTreeMap<usize, bool>;

/// The durable snapshot: cumulative per-section scores plus per-question
/// correctness, written after every scored answer and read once at startup.
///
/// Scores only ever grow; correctness entries are overwritten when the same
/// index is answered again in a later run. Missing or malformed stored state
/// is replaced wholesale by `PersistedProgress::default()` at the services
/// layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedProgress {
    section_scores: BTreeMap<String, u32>,
    section_progress: BTreeMap<String, SectionProgress>,
}

impl PersistedProgress {
    /// Seeds a zero score for every known section title, so sections never
    /// seen in stored state still report a score of 0.
    pub fn ensure_sections<'a>(&mut self, titles: impl IntoIterator<Item = &'a str>) {
        for title in titles {
            self.section_scores.entry(title.to_owned()).or_insert(0);
        }
    }

    /// Adds points to a section's cumulative score.
    pub fn add_points(&mut self, title: &str, points: u32) {
        let score = self.section_scores.entry(title.to_owned()).or_insert(0);
        *score = score.saturating_add(points);
    }

    /// Records whether the question at `index` was answered correctly,
    /// overwriting any earlier entry for the same index.
    pub fn record_answer(&mut self, title: &str, index: usize, correct: bool) {
        self.section_progress
            .entry(title.to_owned())
            .or_default()
            .insert(index, correct);
    }

    #[must_use]
    pub fn score(&self, title: &str) -> u32 {
        self.section_scores.get(title).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn section_scores(&self) -> &BTreeMap<String, u32> {
        &self.section_scores
    }

    #[must_use]
    pub fn progress_for(&self, title: &str) -> Option<&SectionProgress> {
        self.section_progress.get(title)
    }

    /// Number of questions in the section with a recorded answer.
    #[must_use]
    pub fn answered_count(&self, title: &str) -> usize {
        self.progress_for(title).map_or(0, BTreeMap::len)
    }

    /// Number of questions in the section recorded as answered correctly.
    #[must_use]
    pub fn correct_count(&self, title: &str) -> usize {
        self.progress_for(title)
            .map_or(0, |progress| progress.values().filter(|ok| **ok).count())
    }
}
