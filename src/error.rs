use thiserror::Error;

/// Errors that can occur while extracting a recipe from a video URL
#[derive(Error, Debug)]
pub enum ExtractError {
    /// No URL was submitted
    #[error("TikTok URL is required")]
    MissingUrl,

    /// The Gemini credential was not configured at startup
    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,

    /// The downloader API answered with a non-zero status code
    #[error("Failed to fetch TikTok video. Please check the URL.")]
    VideoUnavailable { code: i64, message: String },

    /// Any outbound HTTP call failed
    #[error("Failed to fetch video data: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The AI service answered with an error object or an unexpected shape
    #[error("AI service error: {0}")]
    ProviderError(String),

    /// The model's text could not be parsed as JSON, even after removing fences
    #[error("Failed to parse recipe from AI response")]
    ParseError { raw: String, source: serde_json::Error },

    /// The parsed object lacks a title, ingredients or instructions
    #[error("Incomplete recipe data received from AI")]
    IncompleteRecipe,

    /// Error parsing HTTP headers
    #[error("Header parse error: {0}")]
    HeaderError(#[from] reqwest::header::InvalidHeaderValue),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

/// Errors that can occur while laying out or writing a recipe PDF
#[derive(Error, Debug)]
pub enum PdfError {
    /// Another render of the same document has not finished yet
    #[error("PDF generation already in progress for {0}")]
    InProgress(String),

    /// The cover image bytes could not be decoded or re-encoded
    #[error("Failed to process cover image: {0}")]
    ImageError(#[from] image::ImageError),

    /// Assembling the PDF objects failed
    #[error("Failed to build PDF: {0}")]
    DocumentError(#[from] lopdf::Error),

    /// Writing the finished document failed
    #[error("Failed to write PDF: {0}")]
    IoError(#[from] std::io::Error),
}
