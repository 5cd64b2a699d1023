//! Uploaded files
//!
//! The aggregator's ordered collection of user-supplied artifacts and the
//! selection transitions over it. Selection never touches the network.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Characters kept in a text preview
pub const PREVIEW_CHARS: usize = 100;

/// Unique id of one upload
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileId(String);

impl FileId {
    pub fn generate() -> Self {
        Self(format!("file_{}", uuid::Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What an upload contributes to the submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Image,
    Document,
    Data,
}

impl FileKind {
    /// Label used in submission context blocks
    pub fn label(&self) -> &'static str {
        match self {
            FileKind::Image => "Image",
            FileKind::Document => "Document",
            FileKind::Data => "Data",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            FileKind::Image => "📸",
            FileKind::Document => "📄",
            FileKind::Data => "📊",
        }
    }
}

/// One user-supplied artifact
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadedFile {
    pub id: FileId,
    pub name: String,
    pub kind: FileKind,
    /// Truncated text, or the image data URL
    pub preview: String,
    /// Full text, or the image data URL
    pub content: String,
    pub size_bytes: u64,
    pub uploaded_at: DateTime<Utc>,
    pub selected: bool,
}

impl UploadedFile {
    /// An image whose content is a `data:` URL
    pub fn image(name: impl Into<String>, data_url: String, size_bytes: u64) -> Self {
        Self {
            id: FileId::generate(),
            name: name.into(),
            kind: FileKind::Image,
            preview: data_url.clone(),
            content: data_url,
            size_bytes,
            uploaded_at: Utc::now(),
            selected: true,
        }
    }

    /// A document or data file carrying decoded or extracted text
    pub fn text(name: impl Into<String>, kind: FileKind, content: String, size_bytes: u64) -> Self {
        Self {
            id: FileId::generate(),
            name: name.into(),
            kind,
            preview: preview_text(&content),
            content,
            size_bytes,
            uploaded_at: Utc::now(),
            selected: true,
        }
    }

    pub fn is_image(&self) -> bool {
        self.kind == FileKind::Image
    }

    /// Size for display, e.g. `12.3 KB`
    pub fn display_size(&self) -> String {
        format!("{:.1} KB", self.size_bytes as f64 / 1024.0)
    }
}

/// First [`PREVIEW_CHARS`] characters, with an ellipsis when cut
pub fn preview_text(content: &str) -> String {
    if content.chars().count() > PREVIEW_CHARS {
        let head: String = content.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        content.to_string()
    }
}

/// Insertion-ordered collection with unique ids
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileSet {
    files: Vec<UploadedFile>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a file, re-keying it if its id is already taken
    pub fn add(&mut self, mut file: UploadedFile) -> FileId {
        while self.contains(&file.id) {
            file.id = FileId::generate();
        }
        let id = file.id.clone();
        tracing::debug!(id = %id, name = %file.name, kind = ?file.kind, "File added");
        self.files.push(file);
        id
    }

    pub fn contains(&self, id: &FileId) -> bool {
        self.files.iter().any(|f| &f.id == id)
    }

    pub fn get(&self, id: &FileId) -> Option<&UploadedFile> {
        self.files.iter().find(|f| &f.id == id)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UploadedFile> {
        self.files.iter()
    }

    /// Selected files in insertion order
    pub fn selected(&self) -> impl Iterator<Item = &UploadedFile> {
        self.files.iter().filter(|f| f.selected)
    }

    pub fn selected_count(&self) -> usize {
        self.selected().count()
    }

    pub fn selected_image_count(&self) -> usize {
        self.selected().filter(|f| f.is_image()).count()
    }

    /// True when there is at least one file and all are selected
    pub fn all_selected(&self) -> bool {
        !self.files.is_empty() && self.files.iter().all(|f| f.selected)
    }

    /// Flip one file's selection. Unknown ids are ignored.
    pub fn toggle(&mut self, id: &FileId) -> bool {
        match self.files.iter_mut().find(|f| &f.id == id) {
            Some(file) => {
                file.selected = !file.selected;
                true
            }
            None => false,
        }
    }

    pub fn select_all(&mut self) {
        self.files.iter_mut().for_each(|f| f.selected = true);
    }

    pub fn deselect_all(&mut self) {
        self.files.iter_mut().for_each(|f| f.selected = false);
    }

    /// The select-all control: clears when everything is selected
    pub fn toggle_all(&mut self) {
        if self.all_selected() {
            self.deselect_all();
        } else {
            self.select_all();
        }
    }

    pub fn remove(&mut self, id: &FileId) -> Option<UploadedFile> {
        let index = self.files.iter().position(|f| &f.id == id)?;
        Some(self.files.remove(index))
    }

    pub fn summary(&self) -> SelectionSummary {
        SelectionSummary {
            total: self.len(),
            selected: self.selected_count(),
            selected_images: self.selected_image_count(),
        }
    }
}

/// Counts shown in the file manager header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionSummary {
    pub total: usize,
    pub selected: usize,
    pub selected_images: usize,
}

impl fmt::Display for SelectionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} selected", self.selected)?;
        if self.selected_images > 1 {
            write!(f, " ({} images)", self.selected_images)?;
        }
        Ok(())
    }
}
