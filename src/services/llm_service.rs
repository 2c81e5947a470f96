use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::LlmError;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Configuration for LLM service
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub enabled: bool,
    pub provider: String,
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub max_tokens: usize,
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: "gemini".to_string(),
            api_key: None,
            model: "gemini-3-flash-preview".to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            max_tokens: 150,
            temperature: 0.7,
        }
    }
}

/// Trait for LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion from a prompt
    async fn generate_completion(&self, prompt: String) -> Result<String, LlmError>;
}

/// Gemini generateContent request/response structures
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    max_output_tokens: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsage>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

impl GeminiResponse {
    /// Text of the first candidate, parts concatenated.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        Some(content.parts.iter().map(|p| p.text.as_str()).collect())
    }
}

/// Gemini provider implementation
pub struct GeminiProvider {
    api_key: String,
    model: String,
    base_url: String,
    max_tokens: usize,
    temperature: f32,
    client: Client,
}

impl GeminiProvider {
    pub fn new(config: &LlmConfig, api_key: String) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| LlmError::NetworkError(e.to_string()))?;

        Ok(Self {
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    async fn call_gemini(&self, request: &GeminiRequest) -> Result<GeminiResponse, LlmError> {
        let response = self.client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else {
                    LlmError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();

        if status == 429 {
            return Err(LlmError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::ApiError(format!("HTTP {}: {}", status, error_text)));
        }

        response.json::<GeminiResponse>()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn generate_completion(&self, prompt: String) -> Result<String, LlmError> {
        info!("Generating LLM completion (model: {}, max_tokens: {})", self.model, self.max_tokens);

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_tokens,
            },
        };

        let response = self.call_gemini(&request).await?;

        if let Some(usage) = &response.usage_metadata {
            info!("LLM completion generated. Tokens: {} prompt + {} completion = {} total",
                  usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count);
        }

        response
            .text()
            .ok_or_else(|| LlmError::InvalidResponse("No candidates in response".to_string()))
    }
}

/// LLM service with provider abstraction
pub struct LlmService {
    provider: Option<Arc<dyn LlmProvider>>,
}

impl LlmService {
    pub fn new(config: LlmConfig) -> Self {
        let provider = if config.enabled {
            match config.api_key.as_deref() {
                Some(api_key) if !api_key.is_empty() => {
                    info!("Initializing LLM service with provider: {}", config.provider);
                    match config.provider.as_str() {
                        "gemini" => match GeminiProvider::new(&config, api_key.to_string()) {
                            Ok(provider) => Some(Arc::new(provider) as Arc<dyn LlmProvider>),
                            Err(e) => {
                                warn!("Failed to create Gemini provider: {}. LLM features disabled.", e);
                                None
                            }
                        },
                        _ => {
                            warn!("Unknown LLM provider: {}. LLM features disabled.", config.provider);
                            None
                        }
                    }
                }
                Some(_) => {
                    warn!("LLM API key is empty. LLM features disabled.");
                    None
                }
                None => {
                    warn!("LLM API key not configured. LLM features disabled.");
                    None
                }
            }
        } else {
            info!("LLM features are disabled in configuration");
            None
        };

        Self { provider }
    }

    pub fn with_provider(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    pub fn disabled() -> Self {
        Self { provider: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn generate_completion(&self, prompt: String) -> Result<String, LlmError> {
        let provider = self.provider.as_ref()
            .ok_or(LlmError::Disabled)?;

        provider.generate_completion(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoProvider;

    #[async_trait]
    impl LlmProvider for EchoProvider {
        async fn generate_completion(&self, prompt: String) -> Result<String, LlmError> {
            Ok(format!("echo: {}", prompt))
        }
    }

    #[test]
    fn test_llm_config_default() {
        let config = LlmConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.provider, "gemini");
        assert_eq!(config.model, "gemini-3-flash-preview");
        assert_eq!(config.max_tokens, 150);
        assert_eq!(config.temperature, 0.7);
    }

    #[test]
    fn test_llm_service_disabled_by_default() {
        let service = LlmService::new(LlmConfig::default());
        assert!(!service.is_enabled());
    }

    #[test]
    fn test_llm_service_requires_api_key() {
        let config = LlmConfig {
            enabled: true,
            api_key: Some(String::new()),
            ..LlmConfig::default()
        };
        assert!(!LlmService::new(config).is_enabled());
    }

    #[test]
    fn test_llm_service_rejects_unknown_provider() {
        let config = LlmConfig {
            enabled: true,
            provider: "unknown".to_string(),
            api_key: Some("key".to_string()),
            ..LlmConfig::default()
        };
        assert!(!LlmService::new(config).is_enabled());
    }

    #[test]
    fn test_llm_service_enabled_with_gemini_key() {
        let config = LlmConfig {
            enabled: true,
            api_key: Some("key".to_string()),
            ..LlmConfig::default()
        };
        assert!(LlmService::new(config).is_enabled());
    }

    #[tokio::test]
    async fn test_llm_service_returns_disabled_error() {
        let service = LlmService::disabled();

        let result = service.generate_completion("test".to_string()).await;
        assert!(matches!(result, Err(LlmError::Disabled)));
    }

    #[tokio::test]
    async fn test_llm_service_uses_injected_provider() {
        let service = LlmService::with_provider(Arc::new(EchoProvider));

        let result = service.generate_completion("hi".to_string()).await.unwrap();
        assert_eq!(result, "echo: hi");
    }

    #[test]
    fn test_gemini_response_text_joins_parts() {
        let json = r#"{
            "candidates": [{"content": {"parts": [{"text": "Tech led. "}, {"text": "Energy lagged."}]}}],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5, "totalTokenCount": 15}
        }"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("Tech led. Energy lagged.".to_string()));
    }

    #[test]
    fn test_gemini_response_without_candidates() {
        let response: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_gemini_request_shape() {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: "prompt".to_string() }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: 0.5,
                max_output_tokens: 150,
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "prompt");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 150);
    }

    #[test]
    fn test_endpoint_uses_model_and_base_url() {
        let config = LlmConfig {
            base_url: "http://localhost:9999/".to_string(),
            ..LlmConfig::default()
        };
        let provider = GeminiProvider::new(&config, "key".to_string()).unwrap();
        assert_eq!(
            provider.endpoint(),
            "http://localhost:9999/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }
}
