use serde::{Deserialize, Serialize};

/// A recipe as extracted from a cooking video.
///
/// `ingredients` and `instructions` may carry inline `<strong>` markup
/// around ingredient mentions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl Recipe {
    /// Cover image URL, ignoring empty strings.
    pub fn cover_image_url(&self) -> Option<&str> {
        self.cover_image.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// Source URL, ignoring empty strings.
    pub fn source_link(&self) -> Option<&str> {
        self.source_url.as_deref().filter(|url| !url.trim().is_empty())
    }
}
