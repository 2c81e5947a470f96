use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::services::llm_service::{LlmConfig, DEFAULT_GEMINI_BASE_URL};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub simulated_latency: Duration,
    pub llm: LlmConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            simulated_latency: Duration::from_millis(800),
            llm: LlmConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup; unset or unparseable values
    /// keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();
        let llm_defaults = defaults.llm.clone();

        let llm = LlmConfig {
            enabled: parse_or(&lookup, "LLM_ENABLED", llm_defaults.enabled),
            provider: lookup("LLM_PROVIDER")
                .map(|p| p.to_lowercase())
                .unwrap_or(llm_defaults.provider),
            api_key: lookup("GEMINI_API_KEY").or_else(|| lookup("API_KEY")),
            model: lookup("LLM_MODEL").unwrap_or(llm_defaults.model),
            base_url: lookup("LLM_BASE_URL").unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            max_tokens: parse_or(&lookup, "LLM_MAX_TOKENS", llm_defaults.max_tokens),
            temperature: parse_or(&lookup, "LLM_TEMPERATURE", llm_defaults.temperature),
        };

        Self {
            host: parse_or(&lookup, "HOST", defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port),
            simulated_latency: Duration::from_millis(parse_or(
                &lookup,
                "SIMULATED_LATENCY_MS",
                defaults.simulated_latency.as_millis() as u64,
            )),
            llm,
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid value for {}: {:?}, using default", key, raw);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.simulated_latency, Duration::from_millis(800));
        assert!(!config.llm.enabled);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_reads_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("SIMULATED_LATENCY_MS", "0"),
            ("LLM_ENABLED", "true"),
            ("LLM_PROVIDER", "Gemini"),
            ("API_KEY", "secret"),
            ("LLM_MAX_TOKENS", "200"),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.simulated_latency, Duration::ZERO);
        assert!(config.llm.enabled);
        assert_eq!(config.llm.provider, "gemini");
        assert_eq!(config.llm.api_key.as_deref(), Some("secret"));
        assert_eq!(config.llm.max_tokens, 200);
    }

    #[test]
    fn test_gemini_key_takes_precedence() {
        let config = config_from(&[("API_KEY", "generic"), ("GEMINI_API_KEY", "gemini")]);
        assert_eq!(config.llm.api_key.as_deref(), Some("gemini"));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[("PORT", "not-a-port"), ("LLM_TEMPERATURE", "warm")]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.llm.temperature, 0.7);
    }
}
