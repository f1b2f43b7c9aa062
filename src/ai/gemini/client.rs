use super::types::GenerateContentRequest;
use crate::models::{RawResponse, DEFAULT_BASE_URL};
use crate::{Error, Result};
use reqwest::Client;
use std::time::Duration;

/// Lightweight Gemini REST client.
///
/// Returns the raw status and body of every completed exchange; deciding
/// whether a response is usable is left to the extractor.
pub struct GeminiHttpClient {
    client: Client,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiHttpClient {
    /// Construct a Gemini client.
    ///
    /// `model` should be the bare model ID (for example `gemini-2.5-flash`);
    /// a leading `models/` path segment is stripped.
    pub fn new(model: String, timeout: Duration) -> Self {
        Self::new_with_client(model, timeout, Client::new())
    }

    pub fn new_with_client(model: String, timeout: Duration, client: Client) -> Self {
        let model = model.strip_prefix("models/").unwrap_or(&model).to_string();

        Self {
            client,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Returns the configured model ID without the `models/` prefix.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn generate_content_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Sends one `generateContent` call. No retries.
    ///
    /// Fails only when no response arrives at all (connect error, timeout);
    /// non-2xx responses are returned as-is.
    pub async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<RawResponse> {
        let response = self
            .client
            .post(self.generate_content_url())
            .timeout(self.timeout)
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to Gemini: {}", e);
                Error::Transport(e)
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read Gemini response body: {}", e);
            Error::Transport(e)
        })?;

        tracing::debug!(
            "Gemini responded with status {} ({} bytes)",
            status,
            body.len()
        );

        Ok(RawResponse { status, body })
    }
}
