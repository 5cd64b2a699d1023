//! Response rendering

use super::error::ChatError;

/// Prefix tagging an error string in the response area
pub const ERROR_PREFIX: &str = "Error: ";

/// Shown under error responses
pub const ERROR_HINT: &str = "Check the API key configuration of the completion service.";

/// What the completion endpoint produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatResponse {
    Success(String),
    Failure(String),
}

impl ChatResponse {
    /// The tagged response string
    pub fn to_text(&self) -> String {
        match self {
            ChatResponse::Success(text) => text.clone(),
            ChatResponse::Failure(message) => format!("{}{}", ERROR_PREFIX, message),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ChatResponse::Failure(_))
    }
}

impl From<Result<String, ChatError>> for ChatResponse {
    fn from(result: Result<String, ChatError>) -> Self {
        match result {
            Ok(text) => ChatResponse::Success(text),
            Err(e) => ChatResponse::Failure(e.to_string()),
        }
    }
}

/// External markdown-to-markup conversion
pub trait MarkdownRenderer {
    fn render(&self, markdown: &str) -> String;
}

/// Leaves markdown as-is (terminal output)
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughRenderer;

impl MarkdownRenderer for PassthroughRenderer {
    fn render(&self, markdown: &str) -> String {
        markdown.to_string()
    }
}

/// Render-ready output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Plain preformatted text (errors)
    Preformatted(String),
    /// Output of the markdown renderer
    Markup(String),
}

/// Errors stay plain; successes go through the markdown renderer
pub fn render(response: &ChatResponse, renderer: &dyn MarkdownRenderer) -> Rendered {
    match response {
        ChatResponse::Failure(_) => Rendered::Preformatted(response.to_text()),
        ChatResponse::Success(text) => Rendered::Markup(renderer.render(text)),
    }
}
