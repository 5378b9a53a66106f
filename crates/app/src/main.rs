use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use tracing::error;
use tracing_subscriber::EnvFilter;

use quiz_core::Clock;
use quiz_core::model::QuestionKind;
use services::{
    AdvanceOutcome, AnswerFeedback, BankLoader, QuestionPrompt, QuizRunner, SectionListItem,
};
use storage::repository::Storage;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct Args {
    db_url: String,
    bank: String,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--db <sqlite_url>] [--bank <url_or_path>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:quiz.sqlite3");
    eprintln!("  --bank quiz-data.json");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DB_URL, QUIZ_BANK");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("QUIZ_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://quiz.sqlite3".into(), normalize_sqlite_url);
        let mut bank = std::env::var("QUIZ_BANK")
            .ok()
            .unwrap_or_else(|| "quiz-data.json".into());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--bank" => {
                    bank = require_value(args, "--bank")?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { db_url, bank })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

//
// ─── PRESENTER ─────────────────────────────────────────────────────────────────
//

/// Print a prompt and read one trimmed line. `None` on end of input.
fn read_line(prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

fn render_menu(items: &[SectionListItem]) {
    println!();
    println!("=== Quiz Sections ===");
    for item in items {
        println!(
            "  {}. {}  [score {}, {}/{} answered, {}%]",
            item.index + 1,
            item.title,
            item.score,
            item.answered,
            item.total,
            item.completion_percent()
        );
    }
    println!("  q. Quit");
}

fn render_prompt(prompt: &QuestionPrompt) {
    println!();
    println!("{}. {}", prompt.number, prompt.prompt);
    match prompt.kind {
        QuestionKind::Mcq => {
            for (i, option) in prompt.options.iter().enumerate() {
                println!("    {}) {}", i + 1, option);
            }
        }
        QuestionKind::Text => println!("    (enter your text answer)"),
        QuestionKind::Number => println!("    (enter your number answer)"),
    }
}

fn render_feedback(feedback: &AnswerFeedback) {
    if feedback.is_correct {
        println!("Correct! +{} points", feedback.points_awarded);
    } else {
        println!("Incorrect! Correct answer: {}", feedback.correct_answer);
    }
    println!("Score: {}", feedback.running_score);
}

/// Map mcq input back to the displayed option: a number picks from the list,
/// anything else is submitted as typed.
fn resolve_answer(prompt: &QuestionPrompt, raw: &str) -> String {
    if prompt.kind == QuestionKind::Mcq {
        if let Ok(choice) = raw.trim().parse::<usize>() {
            if let Some(option) = choice.checked_sub(1).and_then(|i| prompt.options.get(i)) {
                return option.clone();
            }
        }
    }
    raw.to_string()
}

/// Drive one section run to completion. Returns false when input ended.
async fn play_section(runner: &mut QuizRunner, index: usize) -> Result<bool, Box<dyn std::error::Error>> {
    let mut prompt = runner.start_section(index)?;

    loop {
        render_prompt(&prompt);
        let Some(raw) = read_line("> ")? else {
            runner.return_to_menu();
            return Ok(false);
        };

        let answer = resolve_answer(&prompt, &raw);
        let feedback = runner.submit_answer(&answer).await?;
        render_feedback(&feedback);

        if read_line("[Enter] to continue ")?.is_none() {
            runner.return_to_menu();
            return Ok(false);
        }

        match runner.advance()? {
            AdvanceOutcome::Next(next) => prompt = next,
            AdvanceOutcome::SectionComplete(summary) => {
                println!();
                println!("Section Complete!");
                println!("  Section: {}", summary.section_title());
                println!("  Score: {}", summary.points());
                println!("  Correct: {}/{}", summary.correct(), summary.total());
                runner.return_to_menu();
                return Ok(true);
            }
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    prepare_sqlite_file(&args.db_url)?;
    let storage = Storage::sqlite(&args.db_url).await?;

    // A failed load leaves the menu empty instead of crashing; a retry means
    // relaunching the process.
    let loader = BankLoader::new();
    let bank = if args.bank.starts_with("http://") || args.bank.starts_with("https://") {
        loader.fetch(&args.bank).await
    } else {
        BankLoader::read(Path::new(&args.bank))
    };
    let bank = match bank {
        Ok(bank) => Arc::new(bank),
        Err(err) => {
            error!(error = %err, bank = %args.bank, "failed to load the question bank");
            println!("No sections available.");
            return Ok(());
        }
    };

    let mut runner = QuizRunner::new(Clock::default_clock(), bank, storage.progress).await;

    loop {
        render_menu(&runner.menu());
        let Some(choice) = read_line("> ")? else {
            return Ok(());
        };

        match choice.trim() {
            "" => {}
            "q" | "quit" => return Ok(()),
            raw => match raw.parse::<usize>() {
                Ok(number) if number >= 1 && number <= runner.bank().len() => {
                    if !play_section(&mut runner, number - 1).await? {
                        return Ok(());
                    }
                }
                _ => println!("Pick a section number or q to quit."),
            },
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
