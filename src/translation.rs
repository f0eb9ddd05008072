use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::Config;
use crate::faq::Language;
use crate::retry::{with_retry, RetryConfig};

/// Request body for a LibreTranslate-compatible `/translate` endpoint
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Client for the external text-translation service.
///
/// The one promise this adapter makes is that `translate` never fails
/// observably: after the retry budget is spent, it logs the error and hands
/// back the input text unchanged. A translation outage therefore populates
/// the secondary-language fields with English rather than failing the write.
#[derive(Clone)]
pub struct Translator {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    retry: RetryConfig,
}

impl Translator {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build translation HTTP client")?;

        Ok(Self {
            client,
            base_url: config.translate_api_url.trim_end_matches('/').to_string(),
            api_key: config.translate_api_key.clone(),
            retry: RetryConfig::translation(),
        })
    }

    /// Translate English text into the target language, falling back to the
    /// original text on any persistent error.
    pub async fn translate(&self, text: &str, target: Language) -> String {
        let result = with_retry(&self.retry, "translate", || self.request(text, target)).await;

        match result {
            Ok(translated) => translated,
            Err(e) => {
                warn!(
                    "Translation to '{}' failed, falling back to original text: {:#}",
                    target.code(),
                    e
                );
                text.to_string()
            }
        }
    }

    async fn request(&self, text: &str, target: Language) -> Result<String> {
        let request = TranslateRequest {
            q: text,
            source: Language::En.code(),
            target: target.code(),
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self
            .client
            .post(format!("{}/translate", self.base_url))
            .json(&request)
            .send()
            .await
            .context("Failed to send request to translation API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Translation API error ({}): {}", status, body);
        }

        let translated: TranslateResponse = response
            .json()
            .await
            .context("Failed to parse translation response")?;

        Ok(translated.translated_text)
    }
}
