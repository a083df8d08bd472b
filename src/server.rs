use crate::config::AppConfig;
use crate::error::{ExtractError, PdfError};
use crate::model::Recipe;
use crate::pdf::{load_cover, PdfGenerator, RenderedPdf};
use crate::pipeline::RecipeExtractor;
use crate::view::{page_shell, PageState};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Form, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{error, info, warn};
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<RecipeExtractor>,
    pub pdf: Arc<PdfGenerator>,
    /// Directory of static page assets
    pub assets_dir: PathBuf,
}

impl AppState {
    pub fn new(extractor: RecipeExtractor) -> Self {
        Self {
            extractor: Arc::new(extractor),
            pdf: Arc::new(PdfGenerator::new()),
            assets_dir: PathBuf::from("public"),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ExtractError> {
        let mut state = Self::new(RecipeExtractor::from_config(config)?);
        state.assets_dir = PathBuf::from(&config.server.assets_dir);
        Ok(state)
    }
}

/// Failure of a request, rendered as `{ "error": ..., "details"?: ... }`.
#[derive(Debug)]
pub enum ApiError {
    Extract(ExtractError),
    Pdf(PdfError),
    InvalidRequest(JsonRejection),
    InvalidRecipe(serde_json::Error),
    Internal(String),
}

impl From<ExtractError> for ApiError {
    fn from(e: ExtractError) -> Self {
        Self::Extract(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection)
    }
}

impl From<PdfError> for ApiError {
    fn from(e: PdfError) -> Self {
        Self::Pdf(e)
    }
}

const UNEXPECTED: &str = "An unexpected error occurred";

impl ApiError {
    /// Status, client-facing message and optional details.
    pub fn parts(&self) -> (StatusCode, String, Option<String>) {
        match self {
            Self::Extract(e) => match e {
                ExtractError::MissingUrl | ExtractError::VideoUnavailable { .. } => {
                    (StatusCode::BAD_REQUEST, e.to_string(), None)
                }
                ExtractError::MissingApiKey | ExtractError::IncompleteRecipe => {
                    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string(), None)
                }
                ExtractError::ParseError { raw, .. } => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    e.to_string(),
                    Some(raw.clone()),
                ),
                ExtractError::FetchError(source) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch video data".to_string(),
                    Some(source.to_string()),
                ),
                ExtractError::ProviderError(_)
                | ExtractError::HeaderError(_)
                | ExtractError::ConfigError(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    UNEXPECTED.to_string(),
                    Some(e.to_string()),
                ),
            },
            Self::Pdf(PdfError::InProgress(file_name)) => (
                StatusCode::CONFLICT,
                "PDF generation already in progress".to_string(),
                Some(file_name.clone()),
            ),
            Self::Pdf(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate PDF".to_string(),
                Some(e.to_string()),
            ),
            Self::InvalidRequest(rejection) => (
                StatusCode::BAD_REQUEST,
                "Invalid request body".to_string(),
                Some(rejection.body_text()),
            ),
            Self::InvalidRecipe(e) => (
                StatusCode::BAD_REQUEST,
                "Invalid recipe data".to_string(),
                Some(e.to_string()),
            ),
            Self::Internal(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                UNEXPECTED.to_string(),
                Some(details.clone()),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, details) = self.parts();

        if status.is_server_error() {
            error!("{}: {}", message, details.as_deref().unwrap_or(""));
        } else {
            warn!("{} {}", status.as_u16(), message);
        }

        let body = match details {
            Some(details) => json!({ "error": message, "details": details }),
            None => json!({ "error": message }),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ExtractRequest {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecipeForm {
    #[serde(default)]
    pub recipe: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/recipe", post(recipe_page))
        .route("/recipe/pdf", post(recipe_pdf_form))
        .route("/api/extract-recipe", post(extract_recipe))
        .route("/api/recipe-pdf", post(recipe_pdf))
        .nest_service("/creators", ServeDir::new(state.assets_dir.join("creators")))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `host:port` and serve until the process is stopped.
pub async fn serve(state: AppState, host: &str, port: u16) -> std::io::Result<()> {
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on {}", addr);
    axum::serve(listener, router(state)).await
}

async fn index() -> Result<Html<String>, ApiError> {
    let page = page_shell(&PageState::default()).map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Html(page))
}

async fn recipe_page(
    State(state): State<AppState>,
    Form(form): Form<ExtractRequest>,
) -> Result<Html<String>, ApiError> {
    let url = form.url.unwrap_or_default();
    let page = match state.extractor.extract(&url).await {
        Ok(recipe) => page_shell(&PageState {
            url: &url,
            recipe: Some(&recipe),
            error: None,
        }),
        Err(e) => {
            let (_, message, _) = ApiError::from(e).parts();
            warn!("Extraction failed for {:?}: {}", url, message);
            page_shell(&PageState {
                url: &url,
                recipe: None,
                error: Some(&message),
            })
        }
    };
    page.map(Html).map_err(|e| ApiError::Internal(e.to_string()))
}

pub async fn extract_recipe(
    State(state): State<AppState>,
    body: Result<Json<ExtractRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body?;
    let url = body.url.unwrap_or_default();
    let recipe = state.extractor.extract(&url).await?;
    Ok(Json(json!({ "recipe": recipe })))
}

pub async fn recipe_pdf(
    State(state): State<AppState>,
    body: Result<Json<Recipe>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(recipe) = body?;
    let rendered = render(&state, recipe).await?;
    Ok(pdf_response(rendered))
}

async fn recipe_pdf_form(
    State(state): State<AppState>,
    Form(form): Form<RecipeForm>,
) -> Result<Response, ApiError> {
    let recipe: Recipe = serde_json::from_str(&form.recipe).map_err(ApiError::InvalidRecipe)?;
    let rendered = render(&state, recipe).await?;
    Ok(pdf_response(rendered))
}

/// Claim the file name, fetch the cover best-effort, then lay out and
/// write the PDF off the async runtime. The claim is held until the
/// render finished.
async fn render(state: &AppState, recipe: Recipe) -> Result<RenderedPdf, ApiError> {
    let claim = state.pdf.begin(&recipe)?;
    let cover_bytes = state.extractor.fetch_cover(&recipe).await;

    let rendered = tokio::task::spawn_blocking(move || {
        let cover = load_cover(cover_bytes.as_deref());
        claim.render(&recipe, cover.as_ref())
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    info!(
        "Rendered {} ({} bytes)",
        rendered.file_name,
        rendered.bytes.len()
    );
    Ok(rendered)
}

fn pdf_response(rendered: RenderedPdf) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", rendered.file_name);
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        rendered.bytes,
    )
        .into_response()
}
