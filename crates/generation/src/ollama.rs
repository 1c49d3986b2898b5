use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{GenerationClient, GenerationError};

/// Client for an Ollama compatible `/api/generate` endpoint.
#[derive(Clone, Debug)]
pub struct OllamaClient {
    client: Client,
    url: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    format: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaClient {
    pub fn new(
        url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url: url.into(),
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl GenerationClient for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        tracing::debug!(url = %self.url, model = %self.model, prompt, "sending generation request");

        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            format: "json",
        };

        let resp = match self.client.post(&self.url).json(&body).send().await {
            Ok(resp) => resp,
            Err(err) => {
                let err = GenerationError::from(err);
                tracing::error!(err = %err, "generation request failed");
                return Err(err);
            }
        };

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "generation endpoint returned an error");

            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = resp
            .text()
            .await
            .map_err(|e| GenerationError::Unexpected(format!("failed to read body: {e}")))?;

        let envelope: GenerateResponse = serde_json::from_str(&text).map_err(|e| {
            tracing::error!(err = %e, body = %text, "generation response has no usable `response` field");
            GenerationError::Unexpected(format!("invalid response envelope: {e}"))
        })?;

        tracing::info!(generated = %envelope.response, "generated text");

        Ok(envelope.response)
    }
}
