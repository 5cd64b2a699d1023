//! HTTP API Client
//!
//! Browser implementations of the core `Completion` and `Extractor`
//! capabilities.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use physio_study::chat::{
    ChatError, ChatRequest, ChatResult, Completion, ExtractFormat, Extractor, IncomingFile,
};
use wasm_bindgen::JsValue;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";

const API_BASE_KEY: &str = "physio_api_base";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_BASE_KEY).ok().flatten())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    normalize_base(&url)
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(API_BASE_KEY, &normalize_base(url));
        }
    }
}

fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

// ============ Response Types ============

#[derive(Debug, serde::Deserialize)]
struct CompletionResponse {
    response: String,
}

#[derive(Debug, serde::Deserialize)]
struct ExtractionResponse {
    content: String,
}

#[derive(Debug, serde::Deserialize)]
struct ApiError {
    error: String,
}

/// Body `error` field, or a generic message with the status
async fn error_message(response: Response, fallback: &str) -> String {
    let status = response.status();
    match response.json::<ApiError>().await {
        Ok(body) if !body.error.is_empty() => body.error,
        _ => format!("{} ({})", fallback, status),
    }
}

// ============ Endpoints ============

/// `POST {base}/chat`
#[derive(Debug, Clone)]
pub struct HttpCompletion {
    url: String,
}

impl HttpCompletion {
    pub fn from_storage() -> Self {
        Self {
            url: format!("{}/chat", get_api_base()),
        }
    }

    async fn send(&self, request: &ChatRequest) -> Result<String, String> {
        let response = Request::post(&self.url)
            .json(request)
            .map_err(|e| format!("Request build error: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.ok() {
            return Err(error_message(response, "Request failed").await);
        }

        let body: CompletionResponse = response
            .json()
            .await
            .map_err(|e| format!("Parse error: {}", e))?;
        Ok(body.response)
    }
}

#[async_trait(?Send)]
impl Completion for HttpCompletion {
    async fn complete(&self, request: &ChatRequest) -> ChatResult<String> {
        self.send(request).await.map_err(ChatError::Completion)
    }
}

/// `POST {base}/upload-docx` as multipart field `file`
#[derive(Debug, Clone)]
pub struct HttpExtractor {
    url: String,
}

impl HttpExtractor {
    pub fn from_storage() -> Self {
        Self {
            url: format!("{}/upload-docx", get_api_base()),
        }
    }

    async fn upload(&self, file: &IncomingFile, format: ExtractFormat) -> Result<String, String> {
        let form = form_data(file, format).map_err(|e| format!("Could not build upload: {:?}", e))?;

        let response = Request::post(&self.url)
            .body(form)
            .map_err(|e| format!("Request build error: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.ok() {
            return Err(error_message(response, "Upload failed").await);
        }

        let body: ExtractionResponse = response
            .json()
            .await
            .map_err(|e| format!("Parse error: {}", e))?;
        Ok(body.content)
    }
}

#[async_trait(?Send)]
impl Extractor for HttpExtractor {
    async fn extract(&self, file: &IncomingFile, format: ExtractFormat) -> ChatResult<String> {
        self.upload(file, format)
            .await
            .map_err(|message| ChatError::Extraction {
                name: file.name.clone(),
                message,
            })
    }
}

fn form_data(file: &IncomingFile, format: ExtractFormat) -> Result<web_sys::FormData, JsValue> {
    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(file.mime.as_deref().unwrap_or_else(|| format.mime()));
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(
        &js_sys::Array::of1(&bytes),
        &options,
    )?;

    let form = web_sys::FormData::new()?;
    form.append_with_blob_and_filename("file", &blob, &file.name)?;
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base("http://localhost:3000/api/"), "http://localhost:3000/api");
        assert_eq!(normalize_base(" https://tutor.example/api "), "https://tutor.example/api");
    }
}
