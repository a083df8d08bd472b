use crate::config::AppConfig;
use crate::error::ExtractError;
use crate::fetchers::{RequestFetcher, TikwmFetcher};
use crate::model::Recipe;
use crate::parser::parse_recipe_response;
use crate::providers::{GoogleProvider, LlmProvider, VideoInput};
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;

const VIDEO_MIME_TYPE: &str = "video/mp4";

/// Turns a TikTok URL into a [`Recipe`].
///
/// The three steps (metadata lookup, video download, AI analysis) run
/// strictly in sequence since each needs the previous result. Nothing is
/// retried.
pub struct RecipeExtractor {
    tikwm: TikwmFetcher,
    downloader: RequestFetcher,
    provider: Option<Arc<dyn LlmProvider>>,
}

impl RecipeExtractor {
    pub fn new(
        tikwm: TikwmFetcher,
        downloader: RequestFetcher,
        provider: Option<Arc<dyn LlmProvider>>,
    ) -> Self {
        Self {
            tikwm,
            downloader,
            provider,
        }
    }

    /// Build the extractor once at startup.
    ///
    /// A missing Gemini key is not fatal here: every extraction then fails
    /// with [`ExtractError::MissingApiKey`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ExtractError> {
        let timeout = Some(Duration::from_secs(config.timeout));

        let provider: Option<Arc<dyn LlmProvider>> =
            match GoogleProvider::new(&config.gemini, timeout) {
                Ok(provider) => Some(Arc::new(provider)),
                Err(ExtractError::MissingApiKey) => {
                    warn!("GEMINI_API_KEY is not configured; extraction requests will fail");
                    None
                }
                Err(e) => return Err(e),
            };

        Ok(Self::new(
            TikwmFetcher::new(&config.tikwm.base_url, timeout)?,
            RequestFetcher::new(timeout)?,
            provider,
        ))
    }

    pub fn downloader(&self) -> &RequestFetcher {
        &self.downloader
    }

    /// Download the cover image of `recipe`. Failures are logged and yield
    /// `None`, so the PDF falls back to the layout without an image.
    pub async fn fetch_cover(&self, recipe: &Recipe) -> Option<Vec<u8>> {
        let url = recipe.cover_image_url()?;
        match self.downloader.fetch_bytes(url).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!("Could not fetch cover image {}: {}", url, e);
                None
            }
        }
    }

    pub async fn extract(&self, url: &str) -> Result<Recipe, ExtractError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ExtractError::MissingUrl);
        }

        let provider = self.provider.as_ref().ok_or(ExtractError::MissingApiKey)?;

        let video = self.tikwm.fetch(url).await?;
        info!(
            "Video found ({}s), caption: {:?}",
            video.duration, video.title
        );

        let bytes = self.downloader.fetch_bytes(video.playback_url()).await?;
        info!("Video downloaded: {} bytes", bytes.len());

        info!("Analyzing video with {}", provider.provider_name());
        let text = provider
            .extract_recipe(
                VideoInput {
                    bytes: &bytes,
                    mime_type: VIDEO_MIME_TYPE,
                },
                &video.title,
            )
            .await?;

        let mut recipe = parse_recipe_response(&text)?;
        recipe.cover_image = video.cover.filter(|cover| !cover.is_empty());
        recipe.source_url = Some(url.to_string());

        info!(
            "Recipe extracted: {} ({} ingredients, {} steps)",
            recipe.title,
            recipe.ingredients.len(),
            recipe.instructions.len()
        );

        Ok(recipe)
    }
}
