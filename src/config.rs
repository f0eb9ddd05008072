use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,

    // Database
    pub database_path: String,

    // Translation API (LibreTranslate-compatible)
    pub translate_api_url: String,
    pub translate_api_key: Option<String>,

    // Auth
    pub api_token: String,
    pub operator_id: String,

    // Cache
    pub cache_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Server
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),

            // Database
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "faq.db".to_string()),

            // Translation API
            translate_api_url: std::env::var("TRANSLATE_API_URL")
                .unwrap_or_else(|_| "https://libretranslate.com".to_string()),
            translate_api_key: std::env::var("TRANSLATE_API_KEY").ok(),

            // Auth - bearer token for mutating endpoints
            api_token: std::env::var("API_TOKEN").context("API_TOKEN not set")?,
            operator_id: std::env::var("OPERATOR_ID").unwrap_or_else(|_| "admin".to_string()),

            // Cache
            cache_ttl_secs: std::env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
        })
    }
}
