//! Physio Study CLI
//!
//! Terminal front-end:
//! - List the muscle catalog
//! - Study it as flashcards or a self-graded quiz
//! - Send a message with attached files to the completion endpoint
//! - Generate a default config file

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use physio_study::catalog::{self, CategoryFilter, MuscleRecord};
use physio_study::chat::response::ERROR_HINT;
use physio_study::chat::{render, ChatInput, IncomingFile, PassthroughRenderer, Rendered};
use physio_study::client::{CompletionClient, ExtractionClient};
use physio_study::config::{generate_default_config, Config, LoggingConfig};
use physio_study::flashcards::{AdvanceTicket, AdvanceTimer, FlashcardState, StudyMode};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "physio-study")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Muscle flashcards and a file-aware study chat")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/physio-study/config.toml or ./config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the muscle catalog
    Catalog {
        /// Category: all, arm, leg, core, back
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Study the catalog interactively
    Study {
        /// Category: all, arm, leg, core, back
        #[arg(short, long)]
        category: Option<CategoryFilter>,
        /// Start in quiz mode
        #[arg(long)]
        quiz: bool,
    },

    /// Ask the study assistant, optionally with files attached
    Chat {
        /// Message text
        message: Option<String>,
        /// Files to attach (images, txt, md, json, pdf, docx, csv)
        #[arg(short, long = "file")]
        files: Vec<PathBuf>,
        /// Text handled as if dropped on the input (bare URLs become references)
        #[arg(long)]
        drop: Option<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_logging(&config.logging);

    match cli.command {
        Commands::Catalog { category, format } => print_catalog(category, format)?,
        Commands::Study { category, quiz } => run_study(&config, category, quiz).await?,
        Commands::Chat {
            message,
            files,
            drop,
        } => run_chat(&config, message, files, drop).await?,
        Commands::Config { output } => write_default_config(output.as_deref())?,
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_with_env(path).context("Failed to load config"),
        None => Ok(Config::load_default()),
    }
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("physio_study={}", config.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn write_default_config(output: Option<&Path>) -> Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write config to {:?}", path))?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", content),
    }
    Ok(())
}

// ---- catalog ----

fn print_catalog(category: CategoryFilter, format: OutputFormat) -> Result<()> {
    let records = catalog::filter(catalog::catalog(), category);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        OutputFormat::Table => {
            if records.is_empty() {
                println!("No muscles in this category");
                return Ok(());
            }
            println!("{:<4} {:<28} {:<6} {}", "ID", "Name", "Area", "Function");
            println!("{}", "-".repeat(72));
            for record in records {
                println!(
                    "{:<4} {:<28} {:<6} {}",
                    record.id, record.name, record.category, record.function
                );
            }
        }
    }
    Ok(())
}

// ---- study ----

/// One line of input in a study session
#[derive(Debug, Clone, PartialEq, Eq)]
enum StudyCommand {
    Next,
    Previous,
    Flip,
    Reveal,
    Grade(bool),
    Jump(usize),
    Category(CategoryFilter),
    ToggleMode,
    ResetScore,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Option<StudyCommand> {
    let mut parts = line.split_whitespace();
    let command = match (parts.next()?, parts.next()) {
        ("n", None) => StudyCommand::Next,
        ("p", None) => StudyCommand::Previous,
        ("f", None) => StudyCommand::Flip,
        ("a", None) => StudyCommand::Reveal,
        ("y", None) => StudyCommand::Grade(true),
        ("x", None) => StudyCommand::Grade(false),
        // Cards are numbered from 1 on screen
        ("g", Some(n)) => StudyCommand::Jump(n.parse::<usize>().ok()?.checked_sub(1)?),
        ("c", Some(c)) => StudyCommand::Category(c.parse().ok()?),
        ("m", None) => StudyCommand::ToggleMode,
        ("r", None) => StudyCommand::ResetScore,
        ("h" | "?", None) => StudyCommand::Help,
        ("q", None) => StudyCommand::Quit,
        _ => return None,
    };
    parts.next().is_none().then_some(command)
}

/// Apply a command; a grade hands back the ticket to schedule
fn apply_command(state: &mut FlashcardState, command: &StudyCommand) -> Option<AdvanceTicket> {
    match command {
        StudyCommand::Next => state.next(),
        StudyCommand::Previous => state.previous(),
        StudyCommand::Flip => {
            if !state.flip() {
                println!("Flip works in flashcard mode; press `a` to reveal in quiz mode");
            }
        }
        StudyCommand::Reveal => {
            if !state.reveal() {
                println!("Reveal works in quiz mode; press `f` to flip in flashcard mode");
            }
        }
        StudyCommand::Grade(correct) => {
            if state.mode() != StudyMode::Quiz || !state.show_answer() {
                println!("Reveal the answer in quiz mode before grading");
                return None;
            }
            return state.grade(*correct);
        }
        StudyCommand::Jump(index) => {
            if !state.jump_to(*index) {
                println!("No card {} (deck has {})", index + 1, state.len());
            }
        }
        StudyCommand::Category(filter) => state.select_category(*filter),
        StudyCommand::ToggleMode => state.set_mode(match state.mode() {
            StudyMode::Flashcard => StudyMode::Quiz,
            StudyMode::Quiz => StudyMode::Flashcard,
        }),
        StudyCommand::ResetScore => state.reset_score(),
        StudyCommand::Help => print_study_help(),
        StudyCommand::Quit => {}
    }
    None
}

async fn run_study(config: &Config, category: Option<CategoryFilter>, quiz: bool) -> Result<()> {
    let mut state = FlashcardState::new();
    state.select_category(category.unwrap_or(config.flashcards.default_category));
    state.set_mode(if quiz {
        StudyMode::Quiz
    } else {
        config.flashcards.default_mode
    });

    let mut timer = AdvanceTimer::new(config.flashcards.advance_delay());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    tracing::info!(filter = %state.filter(), mode = %state.mode(), "Study session started");
    print_study_help();
    print_card(&state);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let Some(command) = parse_command(line.trim()) else {
                    println!("Unknown command, `h` for help");
                    continue;
                };
                if command == StudyCommand::Quit {
                    break;
                }
                if let Some(ticket) = apply_command(&mut state, &command) {
                    timer.schedule(ticket);
                    println!("Score: {}", state.score());
                    continue;
                }
                if state.pending_advance().is_none() {
                    timer.cancel();
                }
                if command != StudyCommand::Help {
                    print_card(&state);
                }
            }
            ticket = timer.fired() => {
                if state.complete_advance(ticket) {
                    print_card(&state);
                }
            }
        }
    }

    timer.cancel();
    state.cancel_advance();
    println!("Final score: {}", state.score());
    Ok(())
}

fn print_study_help() {
    println!("Commands: n next, p previous, f flip, a reveal, y correct, x wrong,");
    println!("          g N go to card, c CATEGORY, m toggle mode, r reset score, q quit");
}

fn print_card(state: &FlashcardState) {
    println!();
    let Some(record) = state.current() else {
        println!("No cards in {}", state.filter().label());
        return;
    };

    let progress = state.progress();
    println!(
        "[{}/{}] {} {} | {} mode | Score {}",
        progress.position,
        progress.total,
        state.filter().icon(),
        state.filter().label(),
        state.mode(),
        state.score()
    );

    let answer_visible = match state.mode() {
        StudyMode::Flashcard => state.is_flipped(),
        StudyMode::Quiz => state.show_answer(),
    };
    if answer_visible {
        print_answer(record);
    } else {
        println!("Which muscle is this?");
        println!("  {}", record.image_url);
    }
}

fn print_answer(record: &MuscleRecord) {
    println!("{} {}", record.category.icon(), record.name);
    println!("  {}", record.description);
    println!("  Origin:    {}", record.origin);
    println!("  Insertion: {}", record.insertion);
    println!("  Function:  {}", record.function);
}

// ---- chat ----

async fn run_chat(
    config: &Config,
    message: Option<String>,
    files: Vec<PathBuf>,
    drop: Option<String>,
) -> Result<()> {
    let extractor = ExtractionClient::new(config.extraction.endpoint())?;
    let completion = CompletionClient::new(config.completion.endpoint())?;
    let mut chat = ChatInput::new();

    if let Some(message) = message {
        chat.set_message(message);
    }

    let mut incoming = Vec::with_capacity(files.len());
    for path in &files {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {:?}", path))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        incoming.push(IncomingFile::new(name, None, bytes));
    }

    if !incoming.is_empty() {
        let report = chat.upload(incoming, &extractor).await;
        if !report.is_clean() {
            tracing::warn!(rejected = report.rejected.len(), "Some files were not attached");
            for rejection in &report.rejected {
                eprintln!("Skipped {}: {}", rejection.name, rejection.error);
            }
        }
        if !chat.files().is_empty() {
            eprintln!("Attached: {}", chat.files().summary());
        }
    }

    if let Some(text) = drop {
        chat.drop_text(&text);
        if let Some(preview) = chat.image_preview() {
            eprintln!("Image URL shown as preview only, not sent: {}", preview);
        }
    }

    if !chat.submit(&completion).await {
        eprintln!("Nothing to send: give a message or attach at least one file.");
        std::process::exit(1);
    }

    if let Some(response) = chat.response() {
        match render(response, &PassthroughRenderer) {
            Rendered::Markup(text) => println!("{}", text),
            Rendered::Preformatted(text) => {
                eprintln!("{}", text);
                eprintln!("{}", ERROR_HINT);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("n"), Some(StudyCommand::Next));
        assert_eq!(parse_command("y"), Some(StudyCommand::Grade(true)));
        assert_eq!(parse_command("g 3"), Some(StudyCommand::Jump(2)));
        assert_eq!(parse_command("c leg"), Some(StudyCommand::Category(CategoryFilter::Leg)));
        assert_eq!(parse_command("g 0"), None);
        assert_eq!(parse_command("c neck"), None);
        assert_eq!(parse_command("n n"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn test_grade_requires_revealed_quiz_card() {
        let mut state = FlashcardState::new();
        assert_eq!(apply_command(&mut state, &StudyCommand::Grade(true)), None);
        assert_eq!(state.score().total, 0);

        apply_command(&mut state, &StudyCommand::ToggleMode);
        apply_command(&mut state, &StudyCommand::Reveal);
        let ticket = apply_command(&mut state, &StudyCommand::Grade(true));
        assert!(ticket.is_some());
        assert_eq!(state.score().correct, 1);
    }

    #[test]
    fn test_navigation_cancels_pending_advance() {
        let mut state = FlashcardState::new();
        state.set_mode(StudyMode::Quiz);
        state.reveal();
        let ticket = apply_command(&mut state, &StudyCommand::Grade(false)).unwrap();
        apply_command(&mut state, &StudyCommand::Next);
        assert_eq!(state.pending_advance(), None);
        assert!(!state.complete_advance(ticket));
    }
}
