use crate::config::GeminiConfig;
use crate::error::ExtractError;
use crate::providers::{build_extraction_prompt, LlmProvider, VideoInput};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::{debug, info};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

pub struct GoogleProvider {
    client: Client,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    base_url: String,
}

impl GoogleProvider {
    /// Create a new Google Gemini provider from configuration
    pub fn new(config: &GeminiConfig, timeout: Option<Duration>) -> Result<Self, ExtractError> {
        // Try config first, then fall back to environment variable
        let api_key = config.resolve_api_key().ok_or(ExtractError::MissingApiKey)?;

        let client = Client::builder()
            .timeout(timeout.unwrap_or(Duration::from_secs(120)))
            .build()?;

        Ok(GoogleProvider {
            client,
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }
}

#[async_trait]
impl LlmProvider for GoogleProvider {
    fn provider_name(&self) -> &str {
        "google"
    }

    async fn extract_recipe(
        &self,
        video: VideoInput<'_>,
        caption: &str,
    ) -> Result<String, ExtractError> {
        info!(
            "Analyzing {} byte video with {}",
            video.bytes.len(),
            self.model
        );

        let response = self
            .client
            .post(self.endpoint())
            .json(&json!({
                "contents": [{
                    "parts": [
                        {
                            "inline_data": {
                                "mime_type": video.mime_type,
                                "data": STANDARD.encode(video.bytes)
                            }
                        },
                        { "text": build_extraction_prompt(caption) }
                    ]
                }],
                "generationConfig": {
                    "temperature": self.temperature,
                    "maxOutputTokens": self.max_tokens
                }
            }))
            .send()
            .await?;

        let response_body: Value = response.json().await?;
        debug!("Google Gemini response: {:?}", response_body);

        // Check for API error response
        if let Some(error) = response_body.get("error") {
            let error_code = error["code"].as_i64().unwrap_or(0);
            let error_message = error["message"].as_str().unwrap_or("Unknown error");
            return Err(ExtractError::ProviderError(format!(
                "Google Gemini API error ({}): {}",
                error_code, error_message
            )));
        }

        // A candidate can be split over several text parts
        let parts = response_body["candidates"][0]["content"]["parts"]
            .as_array()
            .ok_or_else(|| {
                ExtractError::ProviderError(format!(
                    "Failed to extract content from Google Gemini response: {}",
                    response_body
                ))
            })?;

        let text: String = parts
            .iter()
            .filter_map(|part| part["text"].as_str())
            .collect();

        Ok(text)
    }
}
