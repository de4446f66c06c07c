use serde::Deserialize;

/// DocLens runtime configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// SQLite database path
    pub db_path: String,
    /// API key for the OpenAI-compatible extraction provider
    pub openai_api_key: Option<String>,
    /// Base URL of the extraction provider
    pub openai_base_url: String,
    /// Vision model used for extraction
    pub model: String,
    /// Origins allowed by the CORS layer
    pub allowed_origins: Vec<String>,
    /// Running environment ("development" or "production")
    pub environment: String,
    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
            db_path: "doclens.db".to_string(),
            openai_api_key: None,
            openai_base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o".to_string(),
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:3000".to_string(),
            ],
            environment: "development".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_address: std::env::var("DOCLENS_BIND").unwrap_or(defaults.bind_address),
            port: std::env::var("DOCLENS_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            db_path: std::env::var("DOCLENS_DB").unwrap_or(defaults.db_path),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            openai_base_url: std::env::var("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            model: std::env::var("DOCLENS_MODEL").unwrap_or(defaults.model),
            allowed_origins: std::env::var("DOCLENS_ALLOWED_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(|origin| origin.trim().to_string())
                        .filter(|origin| !origin.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.allowed_origins),
            environment: std::env::var("DOCLENS_ENV").unwrap_or(defaults.environment),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_development_friendly() {
        let config = Config::default();
        assert_eq!(config.environment, "development");
        assert_eq!(config.port, 3000);
        assert!(!config.allowed_origins.is_empty());
    }
}
