//! Chat widget core
//!
//! File aggregation from paste, drop, picker, camera and speech; payload
//! assembly for the completion endpoint; response rendering. Everything in
//! here is target-independent: the endpoints and browser services come in
//! through the traits in [`capability`].

pub mod aggregator;
pub mod assembler;
pub mod capability;
pub mod classify;
pub mod error;
pub mod files;
pub mod ingest;
pub mod links;
pub mod response;

pub use aggregator::{
    ChatInput, ClipboardPayload, DropPayload, InputHint, PasteOutcome, Rejection, UploadReport,
};
pub use assembler::{assemble, ChatRequest};
pub use capability::{
    Camera, CapturedImage, Completion, Extractor, NoCamera, NoExtractor, NoSpeech, SpeechInput,
};
pub use classify::{classify, ExtractFormat, FileClass};
pub use error::{ChatError, ChatResult};
pub use files::{FileId, FileKind, FileSet, SelectionSummary, UploadedFile};
pub use ingest::{ingest, IncomingFile};
pub use response::{render, ChatResponse, MarkdownRenderer, PassthroughRenderer, Rendered};
