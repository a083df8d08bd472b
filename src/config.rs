use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Gemini generative AI settings
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// tikwm downloader API settings
    #[serde(default)]
    pub tikwm: TikwmConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

/// Configuration for the Gemini provider
#[derive(Debug, Deserialize, Clone)]
pub struct GeminiConfig {
    /// API key for authentication (can also be set via GEMINI_API_KEY)
    pub api_key: Option<String>,
    /// Model identifier (e.g., "gemini-2.5-flash")
    #[serde(default = "default_model")]
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Base URL for the API endpoint (for proxies and tests)
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            base_url: default_gemini_base_url(),
        }
    }
}

impl GeminiConfig {
    /// Configured key, falling back to the GEMINI_API_KEY environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
    }
}

/// Configuration for the tikwm downloader API
#[derive(Debug, Deserialize, Clone)]
pub struct TikwmConfig {
    #[serde(default = "default_tikwm_base_url")]
    pub base_url: String,
}

impl Default for TikwmConfig {
    fn default() -> Self {
        Self {
            base_url: default_tikwm_base_url(),
        }
    }
}

/// Configuration for the HTTP server
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Static assets served under `/creators`
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            assets_dir: default_assets_dir(),
        }
    }
}

// Default value functions
fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_temperature() -> f32 {
    0.4
}

fn default_max_tokens() -> u32 {
    8192
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_tikwm_base_url() -> String {
    "https://www.tikwm.com".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_assets_dir() -> String {
    "public".to_string()
}

fn default_timeout() -> u64 {
    120
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with TIKTOK_RECIPE__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: TIKTOK_RECIPE__GEMINI__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the precedence rules.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: TIKTOK_RECIPE__GEMINI__API_KEY
        .add_source(
            Environment::with_prefix("TIKTOK_RECIPE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_model(), "gemini-2.5-flash");
        assert_eq!(default_port(), 3000);
        assert_eq!(default_timeout(), 120);
        assert_eq!(default_tikwm_base_url(), "https://www.tikwm.com");
    }

    #[test]
    fn test_app_config_default_has_no_key() {
        let config = AppConfig::default();
        assert!(config.gemini.api_key.is_none());
        assert_eq!(config.gemini.max_tokens, 8192);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_configured_key_wins_over_environment() {
        let config = GeminiConfig {
            api_key: Some("from-config".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("from-config"));
    }

    #[test]
    fn test_blank_configured_key_is_rejected() {
        let config = GeminiConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(config.resolve_api_key().is_none());
    }

    #[test]
    fn test_load_config_without_file() {
        let result = load_config();
        assert!(result.is_ok());
    }
}
