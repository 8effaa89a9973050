//! Generative Language API (Gemini) client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use shopadvisor_core::CapabilityError;

use crate::error::GenerationError;
use crate::generator::{GenerationOptions, TextGenerator};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// The key travels in this header, never in the URL.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Keys shorter than this are rejected before any network call.
const MIN_API_KEY_LEN: usize = 20;

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("failed to build configured HTTP client ({e}); using defaults");
                Client::new()
            });
        Self { config, client }
    }

    fn model_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn validated_key(&self) -> Result<&str, CapabilityError> {
        let key = self
            .config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| CapabilityError::credential_missing("GEMINI_API_KEY is not set"))?;

        if key.len() < MIN_API_KEY_LEN || key.chars().any(char::is_whitespace) {
            return Err(CapabilityError::credential_malformed(
                "GEMINI_API_KEY does not look like an API key",
            ));
        }
        Ok(key)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn initialize(&self) -> Result<(), CapabilityError> {
        let key = self.validated_key()?;

        // Probe: model metadata lookup is cheap and exercises auth + routing.
        let response = self
            .client
            .get(self.model_url())
            .header(API_KEY_HEADER, key)
            .send()
            .await
            .map_err(|e| CapabilityError::connection(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CapabilityError::probe(format!(
                "model lookup returned {status}: {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        info!(model = %self.config.model, "gemini probe succeeded");
        Ok(())
    }

    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String, GenerationError> {
        let key = self
            .validated_key()
            .map_err(|e| GenerationError::Unavailable(e.to_string()))?;

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: options.temperature,
                max_output_tokens: options.max_output_tokens,
            },
        };

        debug!(model = %self.config.model, prompt_chars = prompt.len(), "sending generateContent");

        let response = self
            .client
            .post(format!("{}:generateContent", self.model_url()))
            .header(API_KEY_HEADER, key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::from_status(status.as_u16(), body));
        }

        let body: GeminiResponse = response.json().await?;
        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GenerationError::Format("response contained no text".to_string()));
        }
        Ok(text)
    }
}

// -------------------------
// Wire types
// -------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}
