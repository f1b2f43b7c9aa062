use super::client::GeminiHttpClient;
use crate::ai::AnalysisService;
use crate::models::{Config, FoodNameList, NutritionList};
use crate::pipeline::{self, FoodNames, ModelPayload, Nutrition, ResponseSchema};
use crate::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Gemini-backed implementation of [`AnalysisService`].
///
/// Holds no per-request state; one instance serves concurrent requests.
pub struct GeminiAnalyzer {
    http: GeminiHttpClient,
    api_key: Option<String>,
}

impl GeminiAnalyzer {
    pub fn new(api_key: Option<String>, model: String, timeout: Duration) -> Self {
        Self::new_with_client(api_key, model, timeout, reqwest::Client::new())
    }

    pub fn new_with_client(
        api_key: Option<String>,
        model: String,
        timeout: Duration,
        client: reqwest::Client,
    ) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(model, timeout, client),
            api_key,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
            config.request_timeout,
        )
        .with_base_url(config.gemini_base_url.clone())
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            tracing::error!("GEMINI_API_KEY is not configured; refusing to call Gemini");
            crate::Error::Config("GEMINI_API_KEY is not set".to_string())
        })
    }

    async fn run<S: ResponseSchema>(
        &self,
        api_key: &str,
        payload: ModelPayload,
    ) -> Result<S::Output> {
        tracing::info!(
            "Sending {} request to Gemini (model: {})",
            S::NAME,
            self.http.model()
        );
        let raw = self.http.generate_content(api_key, &payload).await?;
        tracing::info!("Gemini responded with status {}", raw.status);

        pipeline::extract::<S>(&raw)
    }
}

#[async_trait]
impl AnalysisService for GeminiAnalyzer {
    fn ensure_configured(&self) -> Result<()> {
        self.api_key().map(|_| ())
    }

    async fn analyze_photo(&self, image_bytes: &[u8], mime_type: &str) -> Result<FoodNameList> {
        let api_key = self.api_key()?;

        tracing::info!(
            "Analyzing photo ({} bytes, {})",
            image_bytes.len(),
            mime_type
        );
        let payload = pipeline::encode_image_request(image_bytes, mime_type);
        let names = self.run::<FoodNames>(api_key, payload).await?;

        tracing::info!("Recognised foods: {:?}", names);
        Ok(names)
    }

    async fn analyze_text(&self, text: &str) -> Result<NutritionList> {
        let api_key = self.api_key()?;

        tracing::info!("Analyzing nutrition for text: {}", text);
        let payload = pipeline::encode_text_request(text);
        let items = self.run::<Nutrition>(api_key, payload).await?;

        tracing::info!("Returning {} nutrition entries", items.len());
        Ok(items)
    }
}
