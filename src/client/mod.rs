//! HTTP clients for the completion and extraction endpoints
//!
//! Both speak JSON back: a success body carries the payload field, a non-2xx
//! body carries `{ "error": "..." }`.

mod completion;
mod extraction;

pub use completion::CompletionClient;
pub use extraction::ExtractionClient;

use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Where an endpoint lives and how long to wait for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub url: String,
    /// `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Endpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Endpoint client errors
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Endpoint unavailable: {0}")]
    Unavailable(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-2xx status; `message` is the body's `error` field when present
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

fn build_client(timeout: Option<Duration>) -> Result<Client, ClientError> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

fn map_send_error(e: reqwest::Error, url: &str) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else if e.is_connect() {
        ClientError::Unavailable(url.to_string())
    } else {
        ClientError::Request(e)
    }
}

/// Turn a non-2xx response into `ClientError::Api`
async fn api_error(response: Response) -> ClientError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) if !body.error.is_empty() => body.error,
        _ => format!("Request failed with status {}", status.as_u16()),
    };
    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_message_only() {
        let err = ClientError::Api {
            status: 500,
            message: "quota exceeded".to_string(),
        };
        assert_eq!(err.to_string(), "quota exceeded");
    }

    #[test]
    fn test_endpoint_builder() {
        let endpoint = Endpoint::new("http://localhost:3000/api/chat").with_timeout(Duration::from_secs(30));
        assert_eq!(endpoint.timeout, Some(Duration::from_secs(30)));
    }
}
