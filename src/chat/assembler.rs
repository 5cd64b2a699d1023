//! Submission assembly
//!
//! Builds the completion payload from the message buffer and the selected
//! files. Image bytes travel in `images`; every selected file also gets a
//! context block in the message text.

use super::files::{FileKind, UploadedFile};
use serde::{Deserialize, Serialize};

const BLOCK_SEPARATOR: &str = "\n\n---\n\n";
const ATTACHED_HEADER: &str = "=== ATTACHED FILES ===";
const DEFAULT_INSTRUCTION: &str = "Analyze the following files:";

/// Body sent to the completion endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl ChatRequest {
    pub fn image_count(&self) -> usize {
        self.images.as_ref().map_or(0, Vec::len)
    }
}

/// Assemble a submission, or `None` when there is nothing to send.
///
/// `selected` must already be filtered to the selected files, in selection
/// order.
pub fn assemble<'a, I>(message: &str, selected: I) -> Option<ChatRequest>
where
    I: IntoIterator<Item = &'a UploadedFile>,
{
    let selected: Vec<&UploadedFile> = selected.into_iter().collect();
    let text = message.trim();

    if text.is_empty() && selected.is_empty() {
        return None;
    }
    if selected.is_empty() {
        return Some(ChatRequest {
            message: message.to_string(),
            images: None,
        });
    }

    let images: Vec<String> = selected
        .iter()
        .filter(|f| f.is_image())
        .map(|f| f.content.clone())
        .collect();

    let blocks = selected
        .iter()
        .enumerate()
        .map(|(i, file)| context_block(i + 1, file))
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR);

    let message = if text.is_empty() {
        format!("{}\n\n{}", DEFAULT_INSTRUCTION, blocks)
    } else {
        format!("{}\n\n{}\n{}", message, ATTACHED_HEADER, blocks)
    };

    Some(ChatRequest {
        message,
        images: (!images.is_empty()).then_some(images),
    })
}

fn context_block(position: usize, file: &UploadedFile) -> String {
    match file.kind {
        FileKind::Image => format!(
            "[Image {}: {}]\n[Image attached for analysis]",
            position, file.name
        ),
        FileKind::Document | FileKind::Data => {
            format!("[{}: {}]\n{}", file.kind.label(), file.name, file.content)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str, data: &str) -> UploadedFile {
        UploadedFile::image(name, format!("data:image/png;base64,{}", data), 3)
    }

    fn doc(name: &str, content: &str) -> UploadedFile {
        UploadedFile::text(name, FileKind::Document, content.to_string(), 10)
    }

    #[test]
    fn test_nothing_to_send() {
        assert_eq!(assemble("", []), None);
        assert_eq!(assemble("  \n\t", []), None);
    }

    #[test]
    fn test_message_only() {
        let request = assemble("Waar hecht de biceps aan?", []).unwrap();
        assert_eq!(request.message, "Waar hecht de biceps aan?");
        assert_eq!(request.images, None);
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("images"));
    }

    #[test]
    fn test_two_images_and_text_file() {
        let files = vec![image("a.png", "AAAA"), doc("notes.txt", "origin notes"), image("b.png", "BBBB")];
        let request = assemble("Compare these", files.iter()).unwrap();

        assert_eq!(request.image_count(), 2);
        assert_eq!(
            request.images.as_deref().unwrap(),
            ["data:image/png;base64,AAAA", "data:image/png;base64,BBBB"]
        );
        assert_eq!(
            request.message,
            "Compare these\n\n=== ATTACHED FILES ===\n\
             [Image 1: a.png]\n[Image attached for analysis]\n\n---\n\n\
             [Document: notes.txt]\norigin notes\n\n---\n\n\
             [Image 3: b.png]\n[Image attached for analysis]"
        );
    }

    #[test]
    fn test_files_without_message() {
        let data = UploadedFile::text("sheet.csv", FileKind::Data, "a,b".to_string(), 3);
        let request = assemble(" ", [&data]).unwrap();
        assert_eq!(request.message, "Analyze the following files:\n\n[Data: sheet.csv]\na,b");
        assert_eq!(request.images, None);
    }

    #[test]
    fn test_image_without_message() {
        let file = image("scan.png", "AAAA");
        let request = assemble("", [&file]).unwrap();
        assert!(request.message.starts_with("Analyze the following files:\n\n[Image 1: scan.png]"));
        assert_eq!(request.image_count(), 1);
    }
}
