use std::sync::Arc;

use quiz_core::time::fixed_clock;
use services::{AdvanceOutcome, BankLoader, QuizRunner};
use storage::repository::{InMemoryRepository, ProgressRepository};

const BANK: &str = r#"
{
  "sections": [
    {
      "sectionTitle": "Science",
      "questions": [
        {
          "questionType": "mcq",
          "question": "Which gas do we breathe in?",
          "options": ["O2", "CO2"],
          "answer": "O2"
        },
        {
          "questionType": "number",
          "question": "How many colors in a rainbow?",
          "answer": 7,
          "timeToAnswer": 8
        },
        {
          "questionType": "text",
          "question": "Capital of France?",
          "answer": "Paris"
        }
      ]
    }
  ]
}"#;

/// Answer a prompt the way a player who knows the material would.
fn correct_answer_for(prompt_text: &str) -> &'static str {
    match prompt_text {
        "Which gas do we breathe in?" => "O2",
        "How many colors in a rainbow?" => "7",
        "Capital of France?" => "paris",
        other => panic!("unexpected prompt: {other}"),
    }
}

#[tokio::test]
async fn full_run_persists_progress() {
    let bank = Arc::new(BankLoader::parse(BANK).expect("bank parses"));
    let repo = Arc::new(InMemoryRepository::new());
    let mut runner = QuizRunner::new(fixed_clock(), bank, repo.clone()).await;

    let mut prompt = runner.start_section(0).expect("section starts");
    loop {
        let feedback = runner
            .submit_answer(correct_answer_for(&prompt.prompt))
            .await
            .expect("answer accepted");
        assert!(feedback.is_correct, "expected {:?} to grade correct", prompt.prompt);

        match runner.advance().expect("advance") {
            AdvanceOutcome::Next(next) => prompt = next,
            AdvanceOutcome::SectionComplete(summary) => {
                assert_eq!(summary.section_title(), "Science");
                assert_eq!(summary.correct(), 3);
                assert_eq!(summary.total(), 3);
                // mcq 10 + number 13+2 (tight limit) + text 15
                assert_eq!(summary.points(), 40);
                break;
            }
        }
    }

    let stored = repo
        .load_progress()
        .await
        .expect("load")
        .expect("snapshot written");
    assert_eq!(stored.score("Science"), 40);
    assert_eq!(stored.correct_count("Science"), 3);
    assert_eq!(stored.answered_count("Science"), 3);
}

#[tokio::test]
async fn progress_survives_a_new_runner() {
    let bank = Arc::new(BankLoader::parse(BANK).expect("bank parses"));
    let repo = Arc::new(InMemoryRepository::new());

    {
        let mut runner = QuizRunner::new(fixed_clock(), bank.clone(), repo.clone()).await;
        let prompt = runner.start_section(0).expect("section starts");
        runner
            .submit_answer(correct_answer_for(&prompt.prompt))
            .await
            .expect("answer accepted");
        // Abandoning mid-run: the transient session dies with the runner,
        // the scored answer does not.
        runner.return_to_menu();
    }

    let runner = QuizRunner::new(fixed_clock(), bank, repo).await;
    let menu = runner.menu();
    assert_eq!(menu[0].answered, 1);
    assert!(menu[0].score > 0);
    assert_eq!(menu[0].completion_percent(), 33);
}
