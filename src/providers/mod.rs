mod google;
mod prompt;

pub use google::GoogleProvider;
pub use prompt::{build_extraction_prompt, RECIPE_EXTRACTION_PROMPT};

use crate::error::ExtractError;
use async_trait::async_trait;

/// A video file handed to a provider as inline data
pub struct VideoInput<'a> {
    pub bytes: &'a [u8],
    pub mime_type: &'a str,
}

/// Unified trait for generative AI providers that can watch a video
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "google")
    fn provider_name(&self) -> &str;

    /// Ask the model for a recipe; returns the raw response text
    async fn extract_recipe(
        &self,
        video: VideoInput<'_>,
        caption: &str,
    ) -> Result<String, ExtractError>;
}
