//! File classification
//!
//! Routes an incoming file to exactly one format family by extension or
//! MIME type. Anything unrecognised is `Unsupported` and never decoded.

use super::files::FileKind;

pub const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "webp", "bmp"];
pub const DOCUMENT_EXTENSIONS: [&str; 4] = ["docx", "pdf", "txt", "md"];
pub const DATA_EXTENSIONS: [&str; 2] = ["csv", "json"];

/// Image encodings decoded in place to a data URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
    Bmp,
    /// Recognised only through an `image/*` MIME type
    Other,
}

impl ImageFormat {
    fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "gif" => Some(ImageFormat::Gif),
            "webp" => Some(ImageFormat::Webp),
            "bmp" => Some(ImageFormat::Bmp),
            _ => None,
        }
    }

    /// `None` for `Other`, whose type is whatever the file declared
    pub fn mime(&self) -> Option<&'static str> {
        match self {
            ImageFormat::Jpeg => Some("image/jpeg"),
            ImageFormat::Png => Some("image/png"),
            ImageFormat::Gif => Some("image/gif"),
            ImageFormat::Webp => Some("image/webp"),
            ImageFormat::Bmp => Some("image/bmp"),
            ImageFormat::Other => None,
        }
    }
}

/// Plain text read as UTF-8
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Plain,
    Markdown,
}

/// Binary or tabular formats sent to the extraction endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractFormat {
    Pdf,
    Docx,
    Csv,
}

impl ExtractFormat {
    pub fn mime(&self) -> &'static str {
        match self {
            ExtractFormat::Pdf => "application/pdf",
            ExtractFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExtractFormat::Csv => "text/csv",
        }
    }
}

/// Outcome of classifying one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClass {
    Image(ImageFormat),
    Text(TextFormat),
    Json,
    Extract(ExtractFormat),
    Unsupported,
}

impl FileClass {
    /// Collection kind for a supported class
    pub fn kind(&self) -> Option<FileKind> {
        match self {
            FileClass::Image(_) => Some(FileKind::Image),
            FileClass::Text(_) => Some(FileKind::Document),
            FileClass::Json => Some(FileKind::Data),
            FileClass::Extract(ExtractFormat::Csv) => Some(FileKind::Data),
            FileClass::Extract(_) => Some(FileKind::Document),
            FileClass::Unsupported => None,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, FileClass::Unsupported)
    }
}

/// Classify a file from its name and optional declared MIME type.
///
/// Images win first (extension or any `image/*` type), then text, JSON and
/// the extraction formats.
pub fn classify(name: &str, mime: Option<&str>) -> FileClass {
    let ext = extension(name);
    let mime = mime.map(|m| m.trim().to_lowercase()).unwrap_or_default();

    if let Some(format) = ext.as_deref().and_then(ImageFormat::from_extension) {
        return FileClass::Image(format);
    }
    if mime.starts_with("image/") {
        return FileClass::Image(ImageFormat::Other);
    }

    match ext.as_deref() {
        Some("txt") => FileClass::Text(TextFormat::Plain),
        Some("md") => FileClass::Text(TextFormat::Markdown),
        Some("json") => FileClass::Json,
        Some("pdf") => FileClass::Extract(ExtractFormat::Pdf),
        Some("docx") => FileClass::Extract(ExtractFormat::Docx),
        Some("csv") => FileClass::Extract(ExtractFormat::Csv),
        _ => FileClass::Unsupported,
    }
}

fn extension(name: &str) -> Option<String> {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.trim().to_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Human-readable list of accepted formats for rejection alerts
pub fn supported_formats_text() -> String {
    format!(
        "Supported formats:\n📸 Images: {}\n📄 Documents: {}\n📊 Data: {}",
        IMAGE_EXTENSIONS.join(", "),
        DOCUMENT_EXTENSIONS.join(", "),
        DATA_EXTENSIONS.join(", ")
    )
}

/// Value for an `<input type="file" accept=...>` attribute
pub fn accept_attribute() -> String {
    DOCUMENT_EXTENSIONS
        .iter()
        .chain(DATA_EXTENSIONS.iter())
        .chain(IMAGE_EXTENSIONS.iter())
        .map(|ext| format!(".{}", ext))
        .chain(std::iter::once("image/*".to_string()))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_images_by_extension() {
        assert_eq!(classify("Photo.JPG", None), FileClass::Image(ImageFormat::Jpeg));
        assert_eq!(classify("scan.webp", None), FileClass::Image(ImageFormat::Webp));
        assert_eq!(classify("a.b.bmp", None), FileClass::Image(ImageFormat::Bmp));
    }

    #[test]
    fn test_image_by_mime_only() {
        assert_eq!(
            classify("clipboard", Some("image/png")),
            FileClass::Image(ImageFormat::Other)
        );
        assert_eq!(
            classify("capture.heic", Some("IMAGE/HEIC")),
            FileClass::Image(ImageFormat::Other)
        );
    }

    #[test]
    fn test_image_mimes() {
        assert_eq!(ImageFormat::Jpeg.mime(), Some("image/jpeg"));
        assert_eq!(ImageFormat::Bmp.mime(), Some("image/bmp"));
        assert_eq!(ImageFormat::Other.mime(), None);
    }

    #[test]
    fn test_text_json_and_extract() {
        assert_eq!(classify("notes.txt", None), FileClass::Text(TextFormat::Plain));
        assert_eq!(classify("README.md", Some("text/markdown")), FileClass::Text(TextFormat::Markdown));
        assert_eq!(classify("data.json", None), FileClass::Json);
        assert_eq!(classify("paper.pdf", None), FileClass::Extract(ExtractFormat::Pdf));
        assert_eq!(classify("essay.DOCX", None), FileClass::Extract(ExtractFormat::Docx));
        assert_eq!(classify("sheet.csv", Some("text/csv")), FileClass::Extract(ExtractFormat::Csv));
    }

    #[test]
    fn test_unsupported() {
        assert_eq!(classify("setup.exe", None), FileClass::Unsupported);
        assert_eq!(classify("archive.zip", Some("application/zip")), FileClass::Unsupported);
        assert_eq!(classify("no_extension", None), FileClass::Unsupported);
        assert_eq!(classify("trailing.", None), FileClass::Unsupported);
        assert!(!FileClass::Unsupported.is_supported());
    }

    #[test]
    fn test_kinds() {
        assert_eq!(FileClass::Image(ImageFormat::Png).kind(), Some(FileKind::Image));
        assert_eq!(FileClass::Text(TextFormat::Plain).kind(), Some(FileKind::Document));
        assert_eq!(FileClass::Json.kind(), Some(FileKind::Data));
        assert_eq!(FileClass::Extract(ExtractFormat::Csv).kind(), Some(FileKind::Data));
        assert_eq!(FileClass::Extract(ExtractFormat::Pdf).kind(), Some(FileKind::Document));
        assert_eq!(FileClass::Unsupported.kind(), None);
    }

    #[test]
    fn test_accept_attribute() {
        let accept = accept_attribute();
        assert!(accept.starts_with(".docx,.pdf,.txt,.md,.csv,.json,.jpg"));
        assert!(accept.ends_with(",image/*"));
    }
}
