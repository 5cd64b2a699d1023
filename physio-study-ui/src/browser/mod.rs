//! Browser Capabilities
//!
//! Speech recognition, markdown rendering and file reading on top of the
//! page's JS APIs.

pub mod files;
pub mod markdown;
pub mod speech;

pub use files::{read_file, read_file_list};
pub use markdown::MarkedRenderer;
pub use speech::{set_speech_language, speech_language, BrowserSpeech};
