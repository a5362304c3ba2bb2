mod host;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use drill_core::{EngineConfigDraft, QuizMode};
use services::{ExitPolicy, JsonFileSource, NavigationIntent, SessionLauncher};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use host::Outcome;

/// Drill a deck of questions in the terminal.
#[derive(Debug, Parser)]
#[command(name = "drill", version)]
struct Args {
    /// JSON deck: `{ "questions": [...] }` or a bare array of questions.
    #[arg(long, env = "DRILL_DECK")]
    deck: PathBuf,

    /// Starting mode, `reveal` or `choice`.
    #[arg(long, env = "DRILL_MODE")]
    mode: Option<QuizMode>,

    /// Maximum number of questions in the session.
    #[arg(long, env = "DRILL_MAX")]
    max: Option<usize>,

    /// Keep the deck order.
    #[arg(long)]
    no_shuffle: bool,

    /// Number of choices shown in choice mode.
    #[arg(long, env = "DRILL_CHOICES")]
    choices: Option<usize>,

    /// Do not record wrong choices automatically.
    #[arg(long)]
    no_tracking: bool,

    /// Seed for reproducible order and choices.
    #[arg(long, env = "DRILL_SEED")]
    seed: Option<u64>,

    /// Where to go when quitting, reported instead of "back".
    #[arg(long)]
    default_exit_path: Option<String>,

    /// Print the final results as JSON.
    #[arg(long)]
    json: bool,
}

impl Args {
    fn settings(&self) -> EngineConfigDraft {
        EngineConfigDraft {
            initial_mode: self.mode,
            max_questions: self.max,
            shuffle_questions: self.no_shuffle.then_some(false),
            choice_count: self.choices,
            enable_incorrect_tracking: self.no_tracking.then_some(false),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    debug!(deck = %args.deck.display(), seed = ?args.seed, "starting drill");
    let source = JsonFileSource::new(&args.deck);
    let launched = SessionLauncher::new()
        .with_settings(args.settings())
        .with_seed(args.seed)
        .launch(&source)
        .with_context(|| format!("cannot start drill from {}", args.deck.display()))?;

    let mut exit_policy = ExitPolicy::new();
    if let Some(path) = args.default_exit_path.clone() {
        exit_policy = exit_policy.with_default_path(path);
    }
    let mut session = launched.session.with_exit_policy(exit_policy);

    if let Some(title) = launched.title {
        println!("== {title} ==");
    }
    println!("enter: reveal/next, 1-9: answer, y/n: grade, m: mode, r: reset, q: quit");

    let stdin = io::stdin();
    let outcome = host::run(&mut session, stdin.lock(), io::stdout())?;
    if let Outcome::Exited(intent) = &outcome {
        if let Some(elapsed) = session.elapsed() {
            println!("stopped after {}s", elapsed.num_seconds());
        }
        if let NavigationIntent::Navigate(path) = intent {
            println!("leaving to {path}");
        }
    }

    let results = session.summarize();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        host::print_results(&results, io::stdout())?;
    }
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(2);
    }
}
