//! Completion endpoint client

use super::{api_error, build_client, map_send_error, ClientError, Endpoint};
use crate::chat::{ChatError, ChatRequest, ChatResult, Completion};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    response: Option<String>,
}

/// Posts `{ message, images? }` and reads back `{ response }`
pub struct CompletionClient {
    client: Client,
    endpoint: Endpoint,
}

impl CompletionClient {
    pub fn new(endpoint: Endpoint) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_client(endpoint.timeout)?,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Send one submission. Never retried.
    pub async fn send(&self, request: &ChatRequest) -> Result<String, ClientError> {
        let url = &self.endpoint.url;
        tracing::debug!(url = %url, images = request.image_count(), "Posting to completion endpoint");

        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| map_send_error(e, url))?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body: CompletionResponse = response.json().await?;
        body.response
            .ok_or_else(|| ClientError::InvalidResponse("missing `response` field".to_string()))
    }
}

#[async_trait(?Send)]
impl Completion for CompletionClient {
    async fn complete(&self, request: &ChatRequest) -> ChatResult<String> {
        self.send(request)
            .await
            .map_err(|e| ChatError::Completion(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_server;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    async fn chat_handler(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        let message = body["message"].as_str().unwrap_or_default().to_string();
        match message.as_str() {
            "fail" => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "quota exceeded" })),
            ),
            "bare" => (StatusCode::BAD_GATEWAY, Json(json!({}))),
            _ => {
                let images = body.get("images").and_then(Value::as_array).map_or(0, Vec::len);
                (
                    StatusCode::OK,
                    Json(json!({ "response": format!("{} ({} images)", message, images) })),
                )
            }
        }
    }

    async fn client() -> CompletionClient {
        let base = test_server::spawn(Router::new().route("/api/chat", post(chat_handler))).await;
        CompletionClient::new(Endpoint::new(format!("{}/api/chat", base))).unwrap()
    }

    #[tokio::test]
    async fn test_success_body() {
        let client = client().await;
        let request = ChatRequest {
            message: "hallo".to_string(),
            images: Some(vec!["data:image/png;base64,AA".to_string()]),
        };
        assert_eq!(client.send(&request).await.unwrap(), "hallo (1 images)");
    }

    #[tokio::test]
    async fn test_error_body() {
        let client = client().await;
        let request = ChatRequest {
            message: "fail".to_string(),
            images: None,
        };
        let err = client.complete(&request).await.unwrap_err();
        assert_eq!(err, ChatError::Completion("quota exceeded".to_string()));
    }

    #[tokio::test]
    async fn test_error_without_body_field() {
        let client = client().await;
        let request = ChatRequest {
            message: "bare".to_string(),
            images: None,
        };
        match client.send(&request).await {
            Err(ClientError::Api { status, message }) => {
                assert_eq!(status, 502);
                assert_eq!(message, "Request failed with status 502");
            }
            other => panic!("expected api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        let url = test_server::closed_url().await;
        let client = CompletionClient::new(Endpoint::new(url)).unwrap();
        let request = ChatRequest {
            message: "hallo".to_string(),
            images: None,
        };
        assert!(matches!(client.send(&request).await, Err(ClientError::Unavailable(_))));
    }
}
