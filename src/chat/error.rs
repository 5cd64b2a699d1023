//! Chat error types
//!
//! Every failure is terminal for the action that triggered it and leaves the
//! file collection and message buffer untouched.

use super::classify::supported_formats_text;
use thiserror::Error;

/// Errors raised by the chat input channels and submission
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChatError {
    /// Extension and MIME type match no supported format
    #[error("Unsupported file type: {name}\n\n{}", supported_formats_text())]
    UnsupportedFileType { name: String },

    /// A `.json` file that does not parse
    #[error("Invalid JSON file {name}: {reason}")]
    InvalidJson { name: String, reason: String },

    /// Local decoding of a text file failed
    #[error("Could not read {name}: {reason}")]
    Decode { name: String, reason: String },

    /// The extraction endpoint rejected or failed the upload
    #[error("Upload failed for {name}: {message}")]
    Extraction { name: String, message: String },

    /// The completion endpoint failed
    #[error("{0}")]
    Completion(String),

    /// A browser capability is not present in this environment
    #[error("{0} is not available")]
    Unavailable(&'static str),
}

/// Result type alias for chat operations
pub type ChatResult<T> = Result<T, ChatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_lists_formats() {
        let err = ChatError::UnsupportedFileType {
            name: "setup.exe".to_string(),
        };
        let text = err.to_string();
        assert!(text.starts_with("Unsupported file type: setup.exe"));
        assert!(text.contains("jpg, jpeg, png, gif, webp, bmp"));
        assert!(text.contains("docx, pdf, txt, md"));
        assert!(text.contains("csv, json"));
    }

    #[test]
    fn test_completion_error_is_bare_message() {
        let err = ChatError::Completion("quota exceeded".to_string());
        assert_eq!(err.to_string(), "quota exceeded");
    }
}
