//! Pasted and dropped text
//!
//! Decides whether a string is a single bare URL and, if so, whether it
//! points at an image.

use super::classify::IMAGE_EXTENSIONS;
use regex::Regex;
use std::sync::OnceLock;

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"https?://\S+").expect("valid URL pattern"))
}

/// Classification of a text payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PastedText {
    /// A bare URL ending in a known image extension
    ImageUrl(String),
    /// Any other bare URL
    Link(String),
    /// Everything else, including text with an embedded URL
    Text(String),
}

/// A string is a bare URL when it contains exactly one `https?://` match
/// and, trimmed, is that match.
pub fn classify_text(input: &str) -> PastedText {
    let mut matches = url_pattern().find_iter(input);
    if let (Some(only), None) = (matches.next(), matches.next()) {
        let url = only.as_str();
        if input.trim() == url {
            return if is_image_url(url) {
                PastedText::ImageUrl(url.to_string())
            } else {
                PastedText::Link(url.to_string())
            };
        }
    }
    PastedText::Text(input.to_string())
}

/// Case-insensitive substring match against `.jpg`, `.png`, ...
pub fn is_image_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .any(|ext| lower.contains(&format!(".{}", ext)))
}

/// Annotated reference line appended for a non-image link
pub fn link_reference(url: &str) -> String {
    format!(
        "🔗 URL: {}\n\nCan you analyze this link or summarize its content?",
        url
    )
}

/// Append `block` to the message buffer, separated by a blank line
pub fn append_block(buffer: &mut String, block: &str) {
    if !buffer.is_empty() {
        buffer.push_str("\n\n");
    }
    buffer.push_str(block);
}
