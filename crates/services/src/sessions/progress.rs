use std::sync::Arc;

use tracing::warn;

use quiz_core::model::{PersistedProgress, QuestionBank};
use storage::repository::ProgressRepository;

/// In-memory progress snapshot plus its durable backing store.
///
/// The in-memory state is authoritative for the running process. Storage IO
/// is fail-soft in both directions: a missing or corrupt snapshot loads as
/// the zero default, and write failures are logged and swallowed so a broken
/// store degrades to "progress not saved" instead of an error.
pub struct ProgressTracker {
    repo: Arc<dyn ProgressRepository>,
    snapshot: PersistedProgress,
}

impl ProgressTracker {
    /// Read the stored snapshot once and seed a zero score for every section
    /// in the bank.
    pub async fn load(repo: Arc<dyn ProgressRepository>, bank: &QuestionBank) -> Self {
        let mut snapshot = match repo.load_progress().await {
            Ok(Some(progress)) => progress,
            Ok(None) => PersistedProgress::default(),
            Err(err) => {
                warn!(error = %err, "failed to load stored progress, starting from zero");
                PersistedProgress::default()
            }
        };
        snapshot.ensure_sections(bank.titles());

        Self { repo, snapshot }
    }

    #[must_use]
    pub fn snapshot(&self) -> &PersistedProgress {
        &self.snapshot
    }

    /// Apply one scored answer and persist the new snapshot.
    ///
    /// Persistence failures are logged and swallowed; the in-memory snapshot
    /// is updated regardless.
    pub async fn record(&mut self, title: &str, index: usize, correct: bool, points: u32) {
        self.snapshot.add_points(title, points);
        self.snapshot.record_answer(title, index, correct);

        if let Err(err) = self.repo.save_progress(&self.snapshot).await {
            warn!(error = %err, section = title, "failed to persist progress, keeping in-memory state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quiz_core::model::{AnswerKey, Question, QuestionKind, Section};
    use storage::repository::{InMemoryRepository, StorageError};

    fn build_bank() -> QuestionBank {
        let question = Question::new(
            QuestionKind::Text,
            "Capital of France?",
            Vec::new(),
            AnswerKey::Text("Paris".into()),
            None,
        )
        .unwrap();
        let section = Section::new("Geography", vec![question]).unwrap();
        QuestionBank::new(vec![section]).unwrap()
    }

    struct FailingRepository;

    #[async_trait]
    impl ProgressRepository for FailingRepository {
        async fn load_progress(&self) -> Result<Option<PersistedProgress>, StorageError> {
            Err(StorageError::Connection("down".into()))
        }

        async fn save_progress(&self, _: &PersistedProgress) -> Result<(), StorageError> {
            Err(StorageError::Connection("down".into()))
        }
    }

    #[tokio::test]
    async fn load_seeds_zero_scores_for_bank_sections() {
        let repo = Arc::new(InMemoryRepository::new());
        let tracker = ProgressTracker::load(repo, &build_bank()).await;

        assert_eq!(tracker.snapshot().score("Geography"), 0);
    }

    #[tokio::test]
    async fn record_updates_and_persists() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut tracker = ProgressTracker::load(repo.clone(), &build_bank()).await;

        tracker.record("Geography", 0, true, 15).await;

        assert_eq!(tracker.snapshot().score("Geography"), 15);
        let stored = repo.load_progress().await.unwrap().unwrap();
        assert_eq!(stored, *tracker.snapshot());
    }

    #[tokio::test]
    async fn storage_failures_leave_memory_authoritative() {
        let repo = Arc::new(FailingRepository);
        let mut tracker = ProgressTracker::load(repo, &build_bank()).await;

        tracker.record("Geography", 0, true, 15).await;
        tracker.record("Geography", 0, false, 0).await;

        assert_eq!(tracker.snapshot().score("Geography"), 15);
        assert_eq!(tracker.snapshot().correct_count("Geography"), 0);
    }

    #[tokio::test]
    async fn stored_snapshot_wins_over_default() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut stored = PersistedProgress::default();
        stored.add_points("Geography", 25);
        repo.save_progress(&stored).await.unwrap();

        let tracker = ProgressTracker::load(repo, &build_bank()).await;
        assert_eq!(tracker.snapshot().score("Geography"), 25);
    }
}
