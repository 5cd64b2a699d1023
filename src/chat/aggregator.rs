//! Chat input aggregator
//!
//! Per-view state of the chat widget: the message buffer, the uploaded file
//! collection, and the transient flags the view renders. Every input
//! channel (paste, drop, file picker, camera, speech) funnels into the
//! methods here.

use super::assembler::{assemble, ChatRequest};
use super::capability::{Camera, CapturedImage, Completion, Extractor, SpeechInput};
use super::error::{ChatError, ChatResult};
use super::files::{FileId, FileSet, UploadedFile};
use super::ingest::{ingest, prepare, IncomingFile, Prepared};
use super::links::{append_block, classify_text, link_reference, PastedText};
use super::response::ChatResponse;
use futures_util::stream::{FuturesUnordered, StreamExt};
use std::time::Duration;
use tracing::{debug, warn};

/// Name given to clipboard images that carry none
pub const PASTED_IMAGE_NAME: &str = "Pasted Image";

/// Short-lived feedback shown next to the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputHint {
    ImagePasted,
    TextPasted,
    ImageUrlLoaded,
    UrlAdded,
    TextDropped,
}

impl InputHint {
    pub fn message(&self) -> &'static str {
        match self {
            InputHint::ImagePasted => "📸 Image pasted!",
            InputHint::TextPasted => "📝 Text pasted!",
            InputHint::ImageUrlLoaded => "🖼️ Image URL loaded!",
            InputHint::UrlAdded => "🔗 URL added!",
            InputHint::TextDropped => "📝 Text dropped!",
        }
    }

    /// How long the front-end keeps the hint visible
    pub fn duration(&self) -> Duration {
        match self {
            InputHint::TextPasted | InputHint::TextDropped => Duration::from_secs(2),
            _ => Duration::from_secs(3),
        }
    }
}

/// Clipboard contents at paste time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipboardPayload {
    /// First item with an `image/*` type, if any
    pub image: Option<IncomingFile>,
    /// The `text/plain` item, if any
    pub text: Option<String>,
}

/// Whether the paste was handled here or left to the browser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteOutcome {
    /// The default paste must be suppressed
    Consumed,
    /// Let the browser insert the text
    PassThrough,
}

/// Contents of a drop event
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropPayload {
    pub files: Vec<IncomingFile>,
    pub text: Option<String>,
}

/// A file that did not make it into the collection
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub name: String,
    pub error: ChatError,
}

/// Outcome of a multi-file upload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadReport {
    /// Ids in completion order
    pub added: Vec<FileId>,
    pub rejected: Vec<Rejection>,
}

impl UploadReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Where a text payload came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextSource {
    Paste,
    Drop,
}

/// State of one chat view
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatInput {
    message: String,
    files: FileSet,
    image_preview: Option<String>,
    hint: Option<InputHint>,
    drag_over: bool,
    listening: bool,
    loading: bool,
    response: Option<ChatResponse>,
}

impl ChatInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Replace the buffer (typing)
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn files(&self) -> &FileSet {
        &self.files
    }

    pub fn files_mut(&mut self) -> &mut FileSet {
        &mut self.files
    }

    pub fn image_preview(&self) -> Option<&str> {
        self.image_preview.as_deref()
    }

    pub fn remove_image_preview(&mut self) {
        self.image_preview = None;
    }

    pub fn hint(&self) -> Option<InputHint> {
        self.hint
    }

    /// Clear `hint` if it is still the one showing
    pub fn expire_hint(&mut self, hint: InputHint) {
        if self.hint == Some(hint) {
            self.hint = None;
        }
    }

    pub fn is_drag_over(&self) -> bool {
        self.drag_over
    }

    pub fn set_drag_over(&mut self, over: bool) {
        self.drag_over = over;
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn response(&self) -> Option<&ChatResponse> {
        self.response.as_ref()
    }

    // ---- Files ----

    /// Append a decoded upload
    pub fn add_file(&mut self, file: UploadedFile) -> FileId {
        self.files.add(file)
    }

    /// Decode locally-decodable files synchronously; extraction formats are
    /// returned as `Ok(None)` for the caller to route through an extractor.
    pub fn add_local(&mut self, file: &IncomingFile) -> ChatResult<Option<FileId>> {
        match prepare(file)? {
            Prepared::Ready(upload) => Ok(Some(self.add_file(upload))),
            Prepared::Extract(_) => Ok(None),
        }
    }

    /// File-picker channel. Files are processed concurrently and appended
    /// as each finishes, so `added` follows completion order.
    pub async fn upload(&mut self, files: Vec<IncomingFile>, extractor: &dyn Extractor) -> UploadReport {
        let mut pending: FuturesUnordered<_> = files
            .into_iter()
            .map(|file| async move {
                let name = file.name.clone();
                (name, ingest(file, extractor).await)
            })
            .collect();

        let mut report = UploadReport::default();
        while let Some((name, result)) = pending.next().await {
            match result {
                Ok(upload) => report.added.push(self.files.add(upload)),
                Err(error) => {
                    warn!(name = %name, error = %error, "File rejected");
                    report.rejected.push(Rejection { name, error });
                }
            }
        }
        debug!(added = report.added.len(), rejected = report.rejected.len(), "Upload finished");
        report
    }

    /// Drag-drop channel. Text is only looked at when no files were dropped.
    pub async fn drop_payload(&mut self, payload: DropPayload, extractor: &dyn Extractor) -> UploadReport {
        self.drag_over = false;
        if !payload.files.is_empty() {
            return self.upload(payload.files, extractor).await;
        }
        if let Some(text) = payload.text.filter(|t| !t.is_empty()) {
            self.drop_text(&text);
        }
        UploadReport::default()
    }

    /// Text half of a drop
    pub fn drop_text(&mut self, text: &str) {
        self.apply_text(text, TextSource::Drop);
    }

    /// Paste channel. Images win over text.
    pub fn paste(&mut self, clipboard: ClipboardPayload) -> ChatResult<PasteOutcome> {
        if let Some(mut image) = clipboard.image {
            if image.name.trim().is_empty() {
                image.name = PASTED_IMAGE_NAME.to_string();
            }
            self.add_local(&image)?;
            self.hint = Some(InputHint::ImagePasted);
            return Ok(PasteOutcome::Consumed);
        }
        match clipboard.text {
            Some(text) => Ok(self.apply_text(&text, TextSource::Paste)),
            None => Ok(PasteOutcome::PassThrough),
        }
    }

    fn apply_text(&mut self, text: &str, source: TextSource) -> PasteOutcome {
        match classify_text(text) {
            PastedText::ImageUrl(url) => {
                debug!(url = %url, "Image URL loaded as preview");
                self.image_preview = Some(url);
                self.hint = Some(InputHint::ImageUrlLoaded);
                PasteOutcome::Consumed
            }
            PastedText::Link(url) => {
                append_block(&mut self.message, &link_reference(&url));
                self.hint = Some(InputHint::UrlAdded);
                PasteOutcome::Consumed
            }
            PastedText::Text(text) => match source {
                TextSource::Paste => {
                    self.hint = Some(InputHint::TextPasted);
                    PasteOutcome::PassThrough
                }
                TextSource::Drop => {
                    append_block(&mut self.message, &text);
                    self.hint = Some(InputHint::TextDropped);
                    PasteOutcome::Consumed
                }
            },
        }
    }

    /// Camera channel
    pub fn add_capture(&mut self, image: CapturedImage) -> FileId {
        let name = format!("Camera_{}.jpg", chrono::Local::now().format("%H:%M:%S"));
        self.add_file(UploadedFile::image(name, image.data_url, image.size_bytes))
    }

    pub async fn capture_from(&mut self, camera: &dyn Camera) -> ChatResult<Option<FileId>> {
        Ok(camera.capture().await?.map(|image| self.add_capture(image)))
    }

    // ---- Speech ----

    /// Start or stop recognition. Returns the new listening state.
    pub fn toggle_listening(&mut self, speech: &mut dyn SpeechInput, language: &str) -> ChatResult<bool> {
        if self.listening {
            speech.stop();
            self.listening = false;
        } else {
            speech.start(language)?;
            self.listening = true;
        }
        Ok(self.listening)
    }

    /// A final transcript from the recognizer
    pub fn append_transcript(&mut self, transcript: &str) {
        let transcript = transcript.trim();
        if transcript.is_empty() {
            return;
        }
        if !self.message.is_empty() {
            self.message.push(' ');
        }
        self.message.push_str(transcript);
    }

    /// Recognition ended or errored
    pub fn listening_ended(&mut self) {
        self.listening = false;
    }

    // ---- Submission ----

    /// Whether the send control is enabled
    pub fn can_submit(&self) -> bool {
        !self.loading && self.has_content()
    }

    fn has_content(&self) -> bool {
        !self.message.trim().is_empty() || self.files.selected_count() > 0
    }

    /// Assemble the payload and enter the loading state. `None` when there
    /// is nothing to send.
    pub fn begin_submit(&mut self) -> Option<ChatRequest> {
        let request = assemble(&self.message, self.files.selected())?;
        debug!(
            message_len = request.message.len(),
            images = request.image_count(),
            "Submitting"
        );
        self.loading = true;
        Some(request)
    }

    pub fn finish_submit(&mut self, result: ChatResult<String>) {
        if let Err(e) = &result {
            warn!(error = %e, "Completion failed");
        }
        self.response = Some(ChatResponse::from(result));
        self.loading = false;
    }

    /// Send once to the completion endpoint. Returns false when nothing was
    /// sent.
    pub async fn submit(&mut self, completion: &dyn Completion) -> bool {
        let Some(request) = self.begin_submit() else {
            return false;
        };
        let result = completion.complete(&request).await;
        self.finish_submit(result);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::capability::{NoCamera, NoExtractor, NoSpeech};
    use crate::chat::classify::ExtractFormat;
    use crate::chat::files::FileKind;
    use async_trait::async_trait;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct RecordingCompletion {
        requests: RefCell<Vec<ChatRequest>>,
        fail: bool,
    }

    #[async_trait(?Send)]
    impl Completion for RecordingCompletion {
        async fn complete(&self, request: &ChatRequest) -> ChatResult<String> {
            self.requests.borrow_mut().push(request.clone());
            if self.fail {
                Err(ChatError::Completion("quota exceeded".to_string()))
            } else {
                Ok("**Biceps brachii**".to_string())
            }
        }
    }

    struct EchoExtractor;

    #[async_trait(?Send)]
    impl Extractor for EchoExtractor {
        async fn extract(&self, file: &IncomingFile, _format: ExtractFormat) -> ChatResult<String> {
            Ok(format!("text of {}", file.name))
        }
    }

    #[derive(Default)]
    struct FakeSpeech {
        started: Cell<usize>,
        stopped: Cell<usize>,
    }

    impl SpeechInput for FakeSpeech {
        fn is_available(&self) -> bool {
            true
        }

        fn start(&mut self, language: &str) -> ChatResult<()> {
            assert_eq!(language, "nl-NL");
            self.started.set(self.started.get() + 1);
            Ok(())
        }

        fn stop(&mut self) {
            self.stopped.set(self.stopped.get() + 1);
        }
    }

    fn incoming(name: &str, bytes: &[u8]) -> IncomingFile {
        IncomingFile::new(name, None, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_unsupported_and_invalid_json_never_added() {
        let mut chat = ChatInput::new();
        let report = chat
            .upload(
                vec![incoming("setup.exe", b"MZ"), incoming("broken.json", b"{oops")],
                &EchoExtractor,
            )
            .await;
        assert!(chat.files().is_empty());
        assert!(report.added.is_empty());
        assert_eq!(report.rejected.len(), 2);
        assert!(!report.is_clean());
    }

    #[tokio::test]
    async fn test_upload_mixed_batch() {
        let mut chat = ChatInput::new();
        let report = chat
            .upload(
                vec![
                    incoming("a.png", &[1, 2, 3]),
                    incoming("paper.pdf", b"%PDF"),
                    incoming("notes.txt", b"hallo"),
                    incoming("virus.exe", b"MZ"),
                ],
                &EchoExtractor,
            )
            .await;
        assert_eq!(report.added.len(), 3);
        assert_eq!(report.rejected[0].name, "virus.exe");
        assert_eq!(chat.files().len(), 3);
        let pdf = chat.files().iter().find(|f| f.name == "paper.pdf").unwrap();
        assert_eq!(pdf.content, "text of paper.pdf");
    }

    #[tokio::test]
    async fn test_extraction_unavailable_rejects_only_that_file() {
        let mut chat = ChatInput::new();
        let report = chat
            .upload(vec![incoming("paper.docx", b"PK"), incoming("a.md", b"# hi")], &NoExtractor)
            .await;
        assert_eq!(report.added.len(), 1);
        assert!(matches!(report.rejected[0].error, ChatError::Extraction { .. }));
    }

    #[tokio::test]
    async fn test_empty_submit_makes_no_call() {
        let completion = RecordingCompletion::default();
        let mut chat = ChatInput::new();
        chat.set_message("   ");
        assert!(!chat.can_submit());
        assert!(!chat.submit(&completion).await);
        assert!(completion.requests.borrow().is_empty());
        assert!(!chat.is_loading());
    }

    #[tokio::test]
    async fn test_two_images_and_text_file_payload() {
        let completion = RecordingCompletion::default();
        let mut chat = ChatInput::new();
        chat.add_local(&incoming("a.png", &[1])).unwrap();
        chat.add_local(&incoming("b.jpg", &[2])).unwrap();
        chat.add_local(&incoming("notes.txt", b"insertie")).unwrap();
        chat.set_message("Wat zie je?");

        assert!(chat.submit(&completion).await);
        let requests = completion.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].image_count(), 2);

        let message = &requests[0].message;
        let first = message.find("[Image 1: a.png]").unwrap();
        let second = message.find("[Image 2: b.jpg]").unwrap();
        let third = message.find("[Document: notes.txt]").unwrap();
        assert!(first < second && second < third);

        assert_eq!(
            chat.response(),
            Some(&ChatResponse::Success("**Biceps brachii**".to_string()))
        );
        assert_eq!(chat.message(), "Wat zie je?");
    }

    #[tokio::test]
    async fn test_deselected_files_not_sent() {
        let completion = RecordingCompletion::default();
        let mut chat = ChatInput::new();
        let id = chat.add_local(&incoming("a.png", &[1])).unwrap().unwrap();
        chat.files_mut().toggle(&id);
        chat.set_message("alleen tekst");

        chat.submit(&completion).await;
        let requests = completion.requests.borrow();
        assert_eq!(requests[0].message, "alleen tekst");
        assert_eq!(requests[0].images, None);
    }

    #[tokio::test]
    async fn test_completion_failure_is_error_response() {
        let completion = RecordingCompletion {
            fail: true,
            ..Default::default()
        };
        let mut chat = ChatInput::new();
        chat.set_message("hallo");
        chat.submit(&completion).await;
        assert_eq!(chat.response().unwrap().to_text(), "Error: quota exceeded");
        assert!(!chat.is_loading());
    }

    #[test]
    fn test_loading_disables_submit() {
        let mut chat = ChatInput::new();
        chat.set_message("hallo");
        assert!(chat.can_submit());
        assert!(chat.begin_submit().is_some());
        assert!(chat.is_loading());
        assert!(!chat.can_submit());
        chat.finish_submit(Ok("klaar".to_string()));
        assert!(chat.can_submit());
    }

    #[test]
    fn test_paste_image_url_sets_preview() {
        let mut chat = ChatInput::new();
        let outcome = chat
            .paste(ClipboardPayload {
                image: None,
                text: Some("https://example.com/photo.jpg".to_string()),
            })
            .unwrap();
        assert_eq!(outcome, PasteOutcome::Consumed);
        assert_eq!(chat.image_preview(), Some("https://example.com/photo.jpg"));
        assert_eq!(chat.message(), "");
        assert_eq!(chat.hint(), Some(InputHint::ImageUrlLoaded));
    }

    #[test]
    fn test_paste_link_appends_reference() {
        let mut chat = ChatInput::new();
        chat.set_message("Lees dit");
        chat.paste(ClipboardPayload {
            image: None,
            text: Some("https://example.com/photo.jpg".to_string()),
        })
        .unwrap();

        let outcome = chat
            .paste(ClipboardPayload {
                image: None,
                text: Some("https://example.com/article".to_string()),
            })
            .unwrap();
        assert_eq!(outcome, PasteOutcome::Consumed);
        assert_eq!(chat.image_preview(), Some("https://example.com/photo.jpg"));
        assert_eq!(
            chat.message(),
            "Lees dit\n\n🔗 URL: https://example.com/article\n\nCan you analyze this link or summarize its content?"
        );
        assert_eq!(chat.hint(), Some(InputHint::UrlAdded));
    }

    #[test]
    fn test_paste_plain_text_passes_through() {
        let mut chat = ChatInput::new();
        let outcome = chat
            .paste(ClipboardPayload {
                image: None,
                text: Some("gewone tekst".to_string()),
            })
            .unwrap();
        assert_eq!(outcome, PasteOutcome::PassThrough);
        assert_eq!(chat.message(), "");
        assert_eq!(chat.hint(), Some(InputHint::TextPasted));
        assert_eq!(chat.hint().unwrap().duration(), Duration::from_secs(2));
    }

    #[test]
    fn test_paste_image_named_and_added() {
        let mut chat = ChatInput::new();
        let outcome = chat
            .paste(ClipboardPayload {
                image: Some(IncomingFile::new("", Some("image/png".to_string()), vec![1, 2, 3])),
                text: Some("ignored".to_string()),
            })
            .unwrap();
        assert_eq!(outcome, PasteOutcome::Consumed);
        let file = chat.files().iter().next().unwrap();
        assert_eq!(file.name, PASTED_IMAGE_NAME);
        assert_eq!(file.kind, FileKind::Image);
        assert_eq!(chat.hint(), Some(InputHint::ImagePasted));
    }

    #[tokio::test]
    async fn test_drop_text_appended() {
        let mut chat = ChatInput::new();
        chat.set_drag_over(true);
        chat.set_message("eerst");
        let payload = DropPayload {
            files: Vec::new(),
            text: Some("tweede regel".to_string()),
        };
        chat.drop_payload(payload, &NoExtractor).await;
        assert!(!chat.is_drag_over());
        assert_eq!(chat.message(), "eerst\n\ntweede regel");
        assert_eq!(chat.hint(), Some(InputHint::TextDropped));
    }

    #[tokio::test]
    async fn test_drop_files_ignores_text() {
        let mut chat = ChatInput::new();
        let payload = DropPayload {
            files: vec![incoming("a.txt", b"x")],
            text: Some("https://example.com/article".to_string()),
        };
        let report = chat.drop_payload(payload, &NoExtractor).await;
        assert_eq!(report.added.len(), 1);
        assert!(report.is_clean());
        assert_eq!(chat.message(), "");
    }

    #[test]
    fn test_expire_hint_only_clears_current() {
        let mut chat = ChatInput::new();
        chat.drop_text("tekst");
        chat.expire_hint(InputHint::UrlAdded);
        assert_eq!(chat.hint(), Some(InputHint::TextDropped));
        chat.expire_hint(InputHint::TextDropped);
        assert_eq!(chat.hint(), None);
    }

    #[test]
    fn test_capture_named_by_time() {
        let mut chat = ChatInput::new();
        let id = chat.add_capture(CapturedImage::from_jpeg(&[0xff, 0xd8]));
        let file = chat.files().get(&id).unwrap();
        assert!(file.name.starts_with("Camera_"));
        assert!(file.name.ends_with(".jpg"));
        assert_eq!(file.size_bytes, 2);
    }

    #[tokio::test]
    async fn test_no_camera() {
        let mut chat = ChatInput::new();
        assert_eq!(
            chat.capture_from(&NoCamera).await,
            Err(ChatError::Unavailable("Camera"))
        );
        assert!(chat.files().is_empty());
    }

    #[test]
    fn test_speech_toggle_and_transcripts() {
        let mut speech = FakeSpeech::default();
        let mut chat = ChatInput::new();
        chat.set_message("De");

        assert_eq!(chat.toggle_listening(&mut speech, "nl-NL"), Ok(true));
        chat.append_transcript("biceps");
        chat.append_transcript("brachii");
        assert_eq!(chat.message(), "De biceps brachii");
        assert_eq!(chat.toggle_listening(&mut speech, "nl-NL"), Ok(false));
        assert_eq!(speech.started.get(), 1);
        assert_eq!(speech.stopped.get(), 1);

        chat.toggle_listening(&mut speech, "nl-NL").unwrap();
        chat.listening_ended();
        assert!(!chat.is_listening());
    }

    #[test]
    fn test_speech_unavailable_stays_idle() {
        let mut chat = ChatInput::new();
        assert!(chat.toggle_listening(&mut NoSpeech, "nl-NL").is_err());
        assert!(!chat.is_listening());
    }
}
