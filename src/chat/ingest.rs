//! Single-file upload path
//!
//! Classify, then decode locally (images, text, JSON) or hand off to the
//! extraction endpoint (pdf, docx, csv). A rejected file produces an error
//! and no `UploadedFile`.

use super::capability::Extractor;
use super::classify::{classify, ExtractFormat, FileClass, ImageFormat};
use super::error::{ChatError, ChatResult};
use super::files::{FileKind, UploadedFile};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Raw bytes of a file from any input channel
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingFile {
    pub name: String,
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

impl IncomingFile {
    pub fn new(name: impl Into<String>, mime: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.filter(|m| !m.is_empty()),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn class(&self) -> FileClass {
        classify(&self.name, self.mime.as_deref())
    }
}

/// Result of the local half of the upload path
#[derive(Debug, Clone, PartialEq)]
pub enum Prepared {
    /// Decoded in place
    Ready(UploadedFile),
    /// Must go through the extraction endpoint
    Extract(ExtractFormat),
}

/// `data:<mime>;base64,<payload>`
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Classify and decode whatever can be decoded without the network.
///
/// Unsupported files short-circuit here before any decoding.
pub fn prepare(file: &IncomingFile) -> ChatResult<Prepared> {
    match file.class() {
        FileClass::Unsupported => Err(ChatError::UnsupportedFileType {
            name: file.name.clone(),
        }),
        FileClass::Image(format) => Ok(Prepared::Ready(decode_image(file, format))),
        FileClass::Text(_) => {
            let text = decode_utf8(file)?;
            Ok(Prepared::Ready(UploadedFile::text(
                &file.name,
                FileKind::Document,
                text,
                file.size(),
            )))
        }
        FileClass::Json => {
            let text = decode_utf8(file)?;
            let value: serde_json::Value =
                serde_json::from_str(&text).map_err(|e| ChatError::InvalidJson {
                    name: file.name.clone(),
                    reason: e.to_string(),
                })?;
            let pretty = serde_json::to_string_pretty(&value).map_err(|e| ChatError::InvalidJson {
                name: file.name.clone(),
                reason: e.to_string(),
            })?;
            Ok(Prepared::Ready(UploadedFile::text(
                &file.name,
                FileKind::Data,
                pretty,
                file.size(),
            )))
        }
        FileClass::Extract(format) => Ok(Prepared::Extract(format)),
    }
}

/// Wrap extracted text into an upload
pub fn from_extracted(file: &IncomingFile, format: ExtractFormat, content: String) -> UploadedFile {
    let kind = FileClass::Extract(format).kind().unwrap_or(FileKind::Document);
    UploadedFile::text(&file.name, kind, content, file.size())
}

/// Full single-file path, including the extraction round trip
pub async fn ingest(file: IncomingFile, extractor: &dyn Extractor) -> ChatResult<UploadedFile> {
    match prepare(&file)? {
        Prepared::Ready(upload) => Ok(upload),
        Prepared::Extract(format) => {
            tracing::debug!(name = %file.name, ?format, "Sending file to extraction endpoint");
            let content = extractor.extract(&file, format).await?;
            Ok(from_extracted(&file, format, content))
        }
    }
}

/// The declared `image/*` type wins, matched the same way `classify` does
fn decode_image(file: &IncomingFile, format: ImageFormat) -> UploadedFile {
    let declared = file
        .mime
        .as_deref()
        .map(|m| m.trim().to_lowercase())
        .filter(|m| m.starts_with("image/"));
    let mime = declared
        .or_else(|| format.mime().map(str::to_string))
        .unwrap_or_else(|| "image/*".to_string());
    UploadedFile::image(&file.name, data_url(&mime, &file.bytes), file.size())
}

fn decode_utf8(file: &IncomingFile) -> ChatResult<String> {
    let text = std::str::from_utf8(&file.bytes).map_err(|e| ChatError::Decode {
        name: file.name.clone(),
        reason: e.to_string(),
    })?;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::cell::Cell;

    struct FixedExtractor {
        calls: Cell<usize>,
    }

    #[async_trait(?Send)]
    impl Extractor for FixedExtractor {
        async fn extract(&self, file: &IncomingFile, _format: ExtractFormat) -> ChatResult<String> {
            self.calls.set(self.calls.get() + 1);
            Ok(format!("extracted {}", file.name))
        }
    }

    fn extractor() -> FixedExtractor {
        FixedExtractor { calls: Cell::new(0) }
    }

    #[test]
    fn test_image_to_data_url() {
        let file = IncomingFile::new("dot.png", None, vec![1, 2, 3]);
        let Prepared::Ready(upload) = prepare(&file).unwrap() else {
            panic!("image should decode locally");
        };
        assert_eq!(upload.kind, FileKind::Image);
        assert_eq!(upload.content, "data:image/png;base64,AQID");
        assert_eq!(upload.preview, upload.content);
        assert_eq!(upload.size_bytes, 3);
        assert!(upload.selected);
    }

    #[test]
    fn test_declared_image_mime_wins() {
        let file = IncomingFile::new("Pasted Image", Some("image/gif".to_string()), vec![0]);
        let Prepared::Ready(upload) = prepare(&file).unwrap() else {
            panic!("image should decode locally");
        };
        assert!(upload.content.starts_with("data:image/gif;base64,"));
    }

    #[test]
    fn test_upper_case_image_mime_kept() {
        let file = IncomingFile::new("capture.heic", Some("IMAGE/HEIC".to_string()), vec![1]);
        let Prepared::Ready(upload) = prepare(&file).unwrap() else {
            panic!("image should decode locally");
        };
        assert_eq!(upload.kind, FileKind::Image);
        assert_eq!(upload.content, "data:image/heic;base64,AQ==");
    }

    #[test]
    fn test_text_preview() {
        let body = "a".repeat(150);
        let file = IncomingFile::new("notes.md", None, body.clone().into_bytes());
        let Prepared::Ready(upload) = prepare(&file).unwrap() else {
            panic!("text should decode locally");
        };
        assert_eq!(upload.kind, FileKind::Document);
        assert_eq!(upload.content, body);
        assert_eq!(upload.preview.len(), 103);
    }

    #[test]
    fn test_json_pretty_printed_in_order() {
        let file = IncomingFile::new("data.json", None, br#"{"z":1,"a":[true]}"#.to_vec());
        let Prepared::Ready(upload) = prepare(&file).unwrap() else {
            panic!("json should decode locally");
        };
        assert_eq!(upload.kind, FileKind::Data);
        assert_eq!(upload.content, "{\n  \"z\": 1,\n  \"a\": [\n    true\n  ]\n}");
    }

    #[test]
    fn test_invalid_json_rejected() {
        let file = IncomingFile::new("broken.json", None, b"{not json".to_vec());
        assert!(matches!(prepare(&file), Err(ChatError::InvalidJson { .. })));
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let file = IncomingFile::new("bad.txt", None, vec![0xff, 0xfe, 0x00]);
        assert!(matches!(prepare(&file), Err(ChatError::Decode { .. })));
    }

    #[test]
    fn test_bom_stripped() {
        let file = IncomingFile::new("bom.txt", None, "\u{feff}hallo".as_bytes().to_vec());
        let Prepared::Ready(upload) = prepare(&file).unwrap() else {
            panic!("text should decode locally");
        };
        assert_eq!(upload.content, "hallo");
    }

    #[tokio::test]
    async fn test_unsupported_never_reaches_extractor() {
        let extractor = extractor();
        let file = IncomingFile::new("setup.exe", None, vec![0x4d, 0x5a]);
        let result = ingest(file, &extractor).await;
        assert!(matches!(result, Err(ChatError::UnsupportedFileType { .. })));
        assert_eq!(extractor.calls.get(), 0);
    }

    #[tokio::test]
    async fn test_csv_goes_to_extractor_as_data() {
        let extractor = extractor();
        let file = IncomingFile::new("sheet.csv", None, b"a,b\n1,2".to_vec());
        let upload = ingest(file, &extractor).await.unwrap();
        assert_eq!(extractor.calls.get(), 1);
        assert_eq!(upload.kind, FileKind::Data);
        assert_eq!(upload.content, "extracted sheet.csv");
        assert_eq!(upload.size_bytes, 7);
    }

    #[tokio::test]
    async fn test_pdf_is_document() {
        let upload = ingest(IncomingFile::new("paper.pdf", None, vec![0; 4]), &extractor())
            .await
            .unwrap();
        assert_eq!(upload.kind, FileKind::Document);
    }
}
