pub mod layout;
pub mod markup;
pub mod metrics;
mod render;

pub use layout::{layout_recipe, LayoutConfig, LayoutDocument, PageGeometry};
pub use render::{render_pdf, CoverImage};

use crate::error::PdfError;
use crate::model::Recipe;
use log::{debug, warn};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

/// File stem for a recipe: every character outside `[A-Za-z0-9]` becomes
/// `_`, and letters are lowercased.
pub fn pdf_file_stem(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

pub fn pdf_file_name(title: &str) -> String {
    format!("{}_recipe.pdf", pdf_file_stem(title))
}

/// Lay out and render `recipe` in one step.
pub fn generate_pdf(recipe: &Recipe, cover: Option<&CoverImage>) -> Result<Vec<u8>, PdfError> {
    let config = LayoutConfig {
        geometry: PageGeometry::A4,
        with_cover: cover.is_some(),
    };
    let layout = layout_recipe(recipe, &config);
    debug!(
        "Laid out '{}' on {} page(s)",
        recipe.title,
        layout.pages.len()
    );
    render_pdf(&layout, cover, &recipe.title)
}

/// Decode cover image bytes, falling back to a layout without an image.
pub fn load_cover(bytes: Option<&[u8]>) -> Option<CoverImage> {
    match CoverImage::from_bytes(bytes?) {
        Ok(cover) => Some(cover),
        Err(e) => {
            warn!("Ignoring cover image: {}", e);
            None
        }
    }
}

/// A finished document and the name it should be saved under.
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Renders PDFs while refusing a second render of the same file before the
/// first one finished. An in-flight render is never cancelled.
#[derive(Debug, Default)]
pub struct PdfGenerator {
    in_flight: Mutex<HashSet<String>>,
}

/// A claimed file name. The claim is released when this is dropped, so it
/// can be held across a cover download and moved into a blocking task.
#[derive(Debug)]
pub struct InFlight {
    generator: Arc<PdfGenerator>,
    file_name: String,
}

impl InFlight {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Render `recipe` under this claim.
    pub fn render(
        &self,
        recipe: &Recipe,
        cover: Option<&CoverImage>,
    ) -> Result<RenderedPdf, PdfError> {
        let bytes = generate_pdf(recipe, cover)?;
        Ok(RenderedPdf {
            file_name: self.file_name.clone(),
            bytes,
        })
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.generator.names().remove(&self.file_name);
    }
}

impl PdfGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    fn names(&self) -> MutexGuard<'_, HashSet<String>> {
        // The set stays consistent even if a holder panicked
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Claim the file name of `recipe`, failing if a render for it is
    /// already running.
    pub fn begin(self: &Arc<Self>, recipe: &Recipe) -> Result<InFlight, PdfError> {
        let file_name = pdf_file_name(&recipe.title);
        if !self.names().insert(file_name.clone()) {
            return Err(PdfError::InProgress(file_name));
        }
        Ok(InFlight {
            generator: Arc::clone(self),
            file_name,
        })
    }

    pub fn is_busy(&self, file_name: &str) -> bool {
        self.names().contains(file_name)
    }

    /// Claim, render and release in one call.
    pub fn generate(
        self: &Arc<Self>,
        recipe: &Recipe,
        cover: Option<&CoverImage>,
    ) -> Result<RenderedPdf, PdfError> {
        self.begin(recipe)?.render(recipe, cover)
    }
}
