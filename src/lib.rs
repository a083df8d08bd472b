pub mod config;
pub mod error;
pub mod fetchers;
pub mod model;
pub mod parser;
pub mod pdf;
pub mod pipeline;
pub mod providers;
pub mod server;
pub mod view;

use log::debug;
use std::sync::Arc;

pub use crate::config::AppConfig;
pub use crate::error::{ExtractError, PdfError};
pub use crate::model::Recipe;
pub use crate::pdf::{PdfGenerator, RenderedPdf};
pub use crate::pipeline::RecipeExtractor;

/// Extract a recipe from a TikTok URL using configuration from
/// `config.toml` and the environment.
pub async fn extract_recipe(url: &str) -> Result<Recipe, ExtractError> {
    let config = AppConfig::load()?;
    let extractor = RecipeExtractor::from_config(&config)?;
    let recipe = extractor.extract(url).await?;
    debug!("{:#?}", recipe);
    Ok(recipe)
}

/// Render `recipe` as a PDF, downloading its cover image when it has one.
pub async fn render_recipe_pdf(
    extractor: &RecipeExtractor,
    recipe: Recipe,
) -> Result<RenderedPdf, PdfError> {
    let generator = Arc::new(PdfGenerator::new());
    let claim = generator.begin(&recipe)?;
    let cover_bytes = extractor.fetch_cover(&recipe).await;
    let cover = pdf::load_cover(cover_bytes.as_deref());
    claim.render(&recipe, cover.as_ref())
}
