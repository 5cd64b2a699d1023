//! # Physio Study
//!
//! Study aids for physiotherapy students: a muscle flashcard deck with a
//! self-graded quiz mode, and a chat widget that collects files, images,
//! links and dictated text into one submission for a completion service.
//!
//! ## Modules
//!
//! - [`catalog`]: The built-in muscle records and category filters
//! - [`flashcards`]: Flashcard/quiz state and the deferred advance
//! - [`chat`]: Input aggregation, submission assembly, response rendering
//! - [`client`]: HTTP clients for the completion and extraction endpoints
//! - [`config`]: TOML configuration with environment overrides
//!
//! `client` and `config` need the `native` feature (on by default). The
//! browser front-end builds the rest for `wasm32` without it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use physio_study::chat::{ChatInput, IncomingFile};
//! use physio_study::client::{CompletionClient, ExtractionClient};
//! use physio_study::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let extractor = ExtractionClient::new(config.extraction.endpoint())?;
//!     let completion = CompletionClient::new(config.completion.endpoint())?;
//!
//!     let mut chat = ChatInput::new();
//!     chat.set_message("Which muscle inserts on the radial tuberosity?");
//!     let notes = IncomingFile::new("notes.md", None, std::fs::read("notes.md")?);
//!     chat.upload(vec![notes], &extractor).await;
//!
//!     if chat.submit(&completion).await {
//!         println!("{:?}", chat.response());
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod chat;
pub mod flashcards;

#[cfg(feature = "native")]
pub mod client;
#[cfg(feature = "native")]
pub mod config;

// Re-export top-level types for convenience
pub use catalog::{Category, CategoryFilter, MuscleRecord};

pub use flashcards::{AdvanceTicket, FlashcardState, Progress, Score, StudyMode};

pub use chat::{
    ChatError, ChatInput, ChatRequest, ChatResponse, ChatResult, FileKind, IncomingFile,
    UploadedFile,
};

#[cfg(feature = "native")]
pub use client::{ClientError, CompletionClient, Endpoint, ExtractionClient};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError, LoggingConfig};
