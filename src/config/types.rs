//! Configuration types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::server::ServerConfig;

/// AI provider kind.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Gemini,
    Claude,
}

/// Configuration for the generative-language client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Provider to use (gemini or claude).
    #[serde(default)]
    pub provider: ProviderKind,
    /// Model to use for answer generation.
    #[serde(default = "default_model")]
    pub model: String,
    /// Response length cap in tokens.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Base URL for the API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Environment variable name for the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_max_tokens() -> u32 {
    300
}

fn default_temperature() -> f32 {
    0.3
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
        }
    }
}

/// Configuration for the prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Contact email offered as the next step for pricing questions.
    #[serde(default = "default_contact_email")]
    pub contact_email: String,
    /// Environment variable that overrides `contact_email` when set.
    #[serde(default = "default_contact_email_env")]
    pub contact_email_env: String,
}

fn default_contact_email() -> String {
    "hello@celesteiq.com".to_string()
}

fn default_contact_email_env() -> String {
    "SUPPORT_EMAIL".to_string()
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            contact_email: default_contact_email(),
            contact_email_env: default_contact_email_env(),
        }
    }
}

impl PromptConfig {
    /// Resolve the contact email, preferring the environment variable.
    #[must_use]
    pub fn resolve_contact_email(&self) -> String {
        std::env::var(&self.contact_email_env)
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| self.contact_email.clone())
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Generative-language client settings.
    pub ai: AiConfig,
    /// Prompt template settings.
    pub prompt: PromptConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Path to the knowledge base JSON file.
    #[serde(default = "default_knowledge_base")]
    pub knowledge_base: PathBuf,
}

fn default_knowledge_base() -> PathBuf {
    PathBuf::from("data/packages.json")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ai: AiConfig::default(),
            prompt: PromptConfig::default(),
            server: ServerConfig::default(),
            knowledge_base: default_knowledge_base(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.provider, ProviderKind::Gemini);
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.max_tokens, 300);
        assert!((config.temperature - 0.3).abs() < f32::EPSILON);
        assert_eq!(
            config.base_url,
            "https://generativelanguage.googleapis.com/v1beta"
        );
        assert_eq!(config.api_key_env, "GEMINI_API_KEY");
    }

    #[test]
    fn test_ai_config_deserialize_gemini() {
        let toml = r#"
            provider = "gemini"
            model = "gemini-2.0-flash"
            max_tokens = 300
            temperature = 0.3
        "#;
        let config: AiConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.provider, ProviderKind::Gemini);
        assert_eq!(config.max_tokens, 300);
        // Omitted fields fall back to defaults.
        assert_eq!(config.api_key_env, "GEMINI_API_KEY");
    }

    #[test]
    fn test_ai_config_deserialize_claude() {
        let toml = r#"
            provider = "claude"
            model = "claude-sonnet-4-20250514"
            max_tokens = 1024
            base_url = "https://api.anthropic.com"
            api_key_env = "ANTHROPIC_API_KEY"
        "#;
        let config: AiConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.provider, ProviderKind::Claude);
        assert_eq!(config.base_url, "https://api.anthropic.com");
        assert_eq!(config.api_key_env, "ANTHROPIC_API_KEY");
    }

    #[test]
    fn test_prompt_config_defaults() {
        let config = PromptConfig::default();
        assert_eq!(config.contact_email, "hello@celesteiq.com");
        assert_eq!(config.contact_email_env, "SUPPORT_EMAIL");
    }

    #[test]
    fn test_contact_email_env_override() {
        let config = PromptConfig {
            contact_email: "file@celesteiq.com".to_string(),
            contact_email_env: "PRESALES_TEST_SUPPORT_EMAIL".to_string(),
        };

        std::env::remove_var("PRESALES_TEST_SUPPORT_EMAIL");
        assert_eq!(config.resolve_contact_email(), "file@celesteiq.com");

        std::env::set_var("PRESALES_TEST_SUPPORT_EMAIL", "env@celesteiq.com");
        assert_eq!(config.resolve_contact_email(), "env@celesteiq.com");
        std::env::remove_var("PRESALES_TEST_SUPPORT_EMAIL");
    }

    #[test]
    fn test_empty_env_value_falls_back_to_file() {
        let config = PromptConfig {
            contact_email: "file@celesteiq.com".to_string(),
            contact_email_env: "PRESALES_TEST_EMPTY_EMAIL".to_string(),
        };
        std::env::set_var("PRESALES_TEST_EMPTY_EMAIL", "");
        assert_eq!(config.resolve_contact_email(), "file@celesteiq.com");
        std::env::remove_var("PRESALES_TEST_EMPTY_EMAIL");
    }

    #[test]
    fn test_app_config_default_knowledge_base_path() {
        let config = AppConfig::default();
        assert_eq!(config.knowledge_base, PathBuf::from("data/packages.json"));
    }

    #[test]
    fn test_app_config_sections_parse() {
        let toml = r#"
            knowledge_base = "data/packages.json"

            [ai]
            provider = "gemini"
            max_tokens = 256

            [prompt]
            contact_email = "sales@celesteiq.com"

            [server]
            port = 8080
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.knowledge_base, PathBuf::from("data/packages.json"));
        assert_eq!(config.ai.max_tokens, 256);
        assert_eq!(config.prompt.contact_email, "sales@celesteiq.com");
        assert_eq!(config.server.port, 8080);
    }
}
