//! Extraction endpoint client
//!
//! Uploads one file as multipart field `file` and reads back
//! `{ content }` with the extracted text.

use super::{api_error, build_client, map_send_error, ClientError, Endpoint};
use crate::chat::{ChatError, ChatResult, ExtractFormat, Extractor, IncomingFile};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ExtractionResponse {
    content: Option<String>,
}

pub struct ExtractionClient {
    client: Client,
    endpoint: Endpoint,
}

impl ExtractionClient {
    pub fn new(endpoint: Endpoint) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_client(endpoint.timeout)?,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub async fn upload(&self, file: &IncomingFile, format: ExtractFormat) -> Result<String, ClientError> {
        let url = &self.endpoint.url;
        let mime = file.mime.as_deref().unwrap_or_else(|| format.mime());
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(mime)?;
        let form = Form::new().part("file", part);

        tracing::debug!(url = %url, name = %file.name, size = file.size(), "Uploading for extraction");

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| map_send_error(e, url))?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body: ExtractionResponse = response.json().await?;
        body.content
            .ok_or_else(|| ClientError::InvalidResponse("missing `content` field".to_string()))
    }
}

#[async_trait(?Send)]
impl Extractor for ExtractionClient {
    async fn extract(&self, file: &IncomingFile, format: ExtractFormat) -> ChatResult<String> {
        self.upload(file, format)
            .await
            .map_err(|e| ChatError::Extraction {
                name: file.name.clone(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{ChatInput, FileKind};
    use crate::client::test_server;
    use axum::extract::Multipart;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    async fn upload_handler(mut multipart: Multipart) -> (StatusCode, Json<Value>) {
        while let Ok(Some(field)) = multipart.next_field().await {
            if field.name() != Some("file") {
                continue;
            }
            let name = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await.unwrap_or_default();
            if name.starts_with("corrupt") {
                return (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "error": "could not parse document" })),
                );
            }
            return (
                StatusCode::OK,
                Json(json!({ "content": format!("{}: {} bytes", name, bytes.len()) })),
            );
        }
        (StatusCode::BAD_REQUEST, Json(json!({ "error": "no file" })))
    }

    async fn client() -> ExtractionClient {
        let base = test_server::spawn(Router::new().route("/api/upload-docx", post(upload_handler))).await;
        ExtractionClient::new(Endpoint::new(format!("{}/api/upload-docx", base))).unwrap()
    }

    #[tokio::test]
    async fn test_extracts_content() {
        let client = client().await;
        let file = IncomingFile::new("paper.pdf", None, vec![0; 12]);
        let text = client.upload(&file, ExtractFormat::Pdf).await.unwrap();
        assert_eq!(text, "paper.pdf: 12 bytes");
    }

    #[tokio::test]
    async fn test_error_body_becomes_extraction_error() {
        let client = client().await;
        let file = IncomingFile::new("corrupt.docx", None, vec![1, 2]);
        let err = client.extract(&file, ExtractFormat::Docx).await.unwrap_err();
        assert_eq!(
            err,
            ChatError::Extraction {
                name: "corrupt.docx".to_string(),
                message: "could not parse document".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_upload_through_aggregator() {
        let client = client().await;
        let mut chat = ChatInput::new();
        let report = chat
            .upload(
                vec![
                    IncomingFile::new("sheet.csv", Some("text/csv".to_string()), b"a,b".to_vec()),
                    IncomingFile::new("corrupt.pdf", None, vec![0]),
                ],
                &client,
            )
            .await;
        assert_eq!(report.added.len(), 1);
        assert_eq!(report.rejected.len(), 1);
        let csv = chat.files().get(&report.added[0]).unwrap();
        assert_eq!(csv.kind, FileKind::Data);
        assert_eq!(csv.content, "sheet.csv: 3 bytes");
    }
}
