//! HTTP client the page uses to reach the Remix Endpoint.

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::remix::handlers::{RemixRequest, RemixResponse};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remix endpoint returned status {0}")]
    Status(u16),
}

/// Anything that can turn a `RemixRequest` into remixed text.
#[async_trait]
pub trait RemixApi: Send + Sync {
    async fn remix(&self, request: &RemixRequest) -> Result<String, ClientError>;
}

/// Posts to `<endpoint>/api/remix`. One attempt, no timeout.
#[derive(Clone)]
pub struct HttpRemixClient {
    client: Client,
    endpoint: String,
}

impl HttpRemixClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl RemixApi for HttpRemixClient {
    async fn remix(&self, request: &RemixRequest) -> Result<String, ClientError> {
        let response = self
            .client
            .post(format!("{}/api/remix", self.endpoint))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let body: RemixResponse = response.json().await?;
        Ok(body.message)
    }
}
